//! Core data structures for terratile
//!
//! This crate provides the plain data the autotile engine consumes and produces:
//! - `Terrain` / `TerrainId` - Named ground materials in overlay order
//! - `CornerSignature` - Terrain of each of a tile's four quadrants
//! - `TileRecord` / `TerrainTileset` - The parsed tileset descriptor
//! - `TerrainGrid` - Per-cell terrain input
//! - `TileGrid` - Per-cell resolved tile output
//!
//! There is no algorithm here; see `terratile_autotile` for resolution.

mod grid;
mod signature;
mod terrain;
mod tileset;

pub use grid::{TerrainGrid, TileGrid};
pub use signature::{CornerSignature, ParseSignatureError};
pub use terrain::{Terrain, TerrainId};
pub use tileset::{load_tileset, parse_tileset, save_tileset, TerrainTileset, TileRecord};

use thiserror::Error;

/// Errors that can occur when loading tilesets or building grids
#[derive(Debug, Error)]
pub enum TilesetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
}
