//! Terrain types

use serde::{Deserialize, Serialize};

/// Index of a terrain within a tileset's terrain list.
///
/// Terrains are ordered by declaration: a lower index is a base material,
/// a higher index overlays it.
pub type TerrainId = usize;

/// A terrain type within a tileset (e.g., "Grass", "Dirt", "Water")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    pub name: String,
    /// Representative tile for this terrain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_tile: Option<u32>,
}

impl Terrain {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon_tile: None,
        }
    }

    /// Set the representative tile
    pub fn with_icon_tile(mut self, tile_id: u32) -> Self {
        self.icon_tile = Some(tile_id);
        self
    }
}
