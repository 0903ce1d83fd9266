//! Tileset descriptor with per-tile terrain annotations
//!
//! A `TerrainTileset` is what an external descriptor parser hands the core:
//! the ordered terrain list plus one `TileRecord` per tile image.

use crate::signature::CornerSignature;
use crate::terrain::{Terrain, TerrainId};
use crate::TilesetError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// A single tile image and its optional terrain corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub tile_id: u32,
    /// `None` marks a decorative tile that never takes part in autotiling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<CornerSignature>,
}

impl TileRecord {
    /// A terrain tile with the given corners
    pub fn terrain(tile_id: u32, signature: CornerSignature) -> Self {
        Self {
            tile_id,
            signature: Some(signature),
        }
    }

    /// A decorative tile with no terrain annotation
    pub fn decorative(tile_id: u32) -> Self {
        Self {
            tile_id,
            signature: None,
        }
    }

    pub fn is_terrain(&self) -> bool {
        self.signature.is_some()
    }
}

/// Parsed tileset: terrains in overlay order plus every tile record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainTileset {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// Tile size in pixels (assumes square tiles)
    #[serde(default)]
    pub tile_size: u32,
    /// Terrains in declaration order; later entries overlay earlier ones
    pub terrains: Vec<Terrain>,
    #[serde(default)]
    pub tiles: Vec<TileRecord>,
}

impl TerrainTileset {
    pub fn new(name: String, tile_size: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            tile_size,
            terrains: Vec::new(),
            tiles: Vec::new(),
        }
    }

    /// Add a new terrain, returning its id
    pub fn add_terrain(&mut self, terrain: Terrain) -> TerrainId {
        self.terrains.push(terrain);
        self.terrains.len() - 1
    }

    /// Add a tile record
    pub fn add_tile(&mut self, record: TileRecord) {
        self.tiles.push(record);
    }

    /// Get terrain id by name
    pub fn terrain_id(&self, name: &str) -> Option<TerrainId> {
        self.terrains.iter().position(|t| t.name == name)
    }

    /// Look up any tile, terrain or decorative, by id
    pub fn tile(&self, tile_id: u32) -> Option<&TileRecord> {
        self.tiles.iter().find(|t| t.tile_id == tile_id)
    }

    /// Tiles that carry a corner signature
    pub fn terrain_tiles(&self) -> impl Iterator<Item = &TileRecord> {
        self.tiles.iter().filter(|t| t.is_terrain())
    }

    /// Total number of tile records, including decorative tiles
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

/// Load a tileset from a JSON file
pub fn load_tileset(path: &Path) -> Result<TerrainTileset, TilesetError> {
    let content = std::fs::read_to_string(path)?;
    parse_tileset(&content)
}

/// Parse a tileset from a JSON string
pub fn parse_tileset(json: &str) -> Result<TerrainTileset, TilesetError> {
    Ok(serde_json::from_str(json)?)
}

/// Save a tileset to a JSON file
pub fn save_tileset(tileset: &TerrainTileset, path: &Path) -> Result<(), TilesetError> {
    let content = serde_json::to_string_pretty(tileset)?;
    std::fs::write(path, content)?;
    Ok(())
}
