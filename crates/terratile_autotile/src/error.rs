//! Error type and result alias for the autotile engine

use terratile_core::{CornerSignature, TerrainId, TilesetError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AutotileError>;

#[derive(Debug, Error)]
pub enum AutotileError {
    /// Malformed index input, fatal at load time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No tile for the computed signature, nor for the uniform fallback
    #[error("no tile for signature ({signature}) at cell ({x}, {y}) and no uniform fallback")]
    UnresolvedSignature {
        x: u32,
        y: u32,
        signature: CornerSignature,
    },

    #[error("cell ({x}, {y}) uses undeclared terrain {terrain}")]
    UnknownTerrain { x: u32, y: u32, terrain: TerrainId },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Tileset(#[from] TilesetError),
}

impl AutotileError {
    /// Coordinates of the failing cell, for per-cell errors
    pub fn cell(&self) -> Option<(u32, u32)> {
        match self {
            AutotileError::UnresolvedSignature { x, y, .. }
            | AutotileError::UnknownTerrain { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }
}
