//! Terrain tile index
//!
//! Immutable lookup table from corner signature to the tiles that draw it,
//! built once from a tileset's records and shared by every resolve call.

use crate::error::{AutotileError, Result};
use std::collections::{HashMap, HashSet};
use terratile_core::{CornerSignature, Terrain, TerrainId, TerrainTileset, TileRecord};
use tracing::{debug, warn};

/// Signature → tile ids (ascending), plus the ordered terrain list
#[derive(Debug, Clone)]
pub struct TerrainTileIndex {
    terrains: Vec<Terrain>,
    by_signature: HashMap<CornerSignature, Vec<u32>>,
}

impl TerrainTileIndex {
    /// Build the index from a terrain list and tile records.
    ///
    /// Records without a signature are skipped. Every corner of every
    /// signature must reference a declared terrain, and tile ids must be unique.
    pub fn build<'a>(
        terrains: Vec<Terrain>,
        records: impl IntoIterator<Item = &'a TileRecord>,
    ) -> Result<Self> {
        if terrains.is_empty() {
            return Err(AutotileError::Configuration(
                "tileset declares no terrains".to_string(),
            ));
        }

        let mut seen_ids = HashSet::new();
        let mut by_signature: HashMap<CornerSignature, Vec<u32>> = HashMap::new();

        for record in records {
            if !seen_ids.insert(record.tile_id) {
                return Err(AutotileError::Configuration(format!(
                    "tile {} is declared more than once",
                    record.tile_id
                )));
            }

            let Some(signature) = record.signature else {
                continue;
            };

            for (position, &terrain) in signature.terrains().iter().enumerate() {
                if terrain >= terrains.len() {
                    return Err(AutotileError::Configuration(format!(
                        "tile {} {} corner references terrain {}, but only {} terrains are declared",
                        record.tile_id,
                        CornerSignature::position_name(position),
                        terrain,
                        terrains.len()
                    )));
                }
            }

            by_signature
                .entry(signature)
                .or_default()
                .push(record.tile_id);
        }

        for tiles in by_signature.values_mut() {
            tiles.sort_unstable();
        }

        let index = Self {
            terrains,
            by_signature,
        };

        for (id, terrain) in index.terrains.iter().enumerate() {
            if index.uniform_tiles(id).is_none() {
                warn!(
                    "terrain '{}' ({}) has no uniform tile; cells of it cannot fall back",
                    terrain.name, id
                );
            }
        }

        debug!(
            "built terrain index: {} terrains, {} signatures, {} terrain tiles",
            index.terrains.len(),
            index.by_signature.len(),
            index.by_signature.values().map(Vec::len).sum::<usize>()
        );

        Ok(index)
    }

    /// Build the index from a parsed tileset
    pub fn from_tileset(tileset: &TerrainTileset) -> Result<Self> {
        Self::build(tileset.terrains.clone(), &tileset.tiles)
    }

    /// Tiles drawing exactly this signature, in ascending id order
    pub fn lookup(&self, signature: &CornerSignature) -> Option<&[u32]> {
        self.by_signature.get(signature).map(Vec::as_slice)
    }

    /// Tiles whose four corners are all `terrain`
    pub fn uniform_tiles(&self, terrain: TerrainId) -> Option<&[u32]> {
        self.lookup(&CornerSignature::uniform(terrain))
    }

    /// Every signature present in the index
    pub fn signatures(&self) -> impl Iterator<Item = &CornerSignature> {
        self.by_signature.keys()
    }

    /// Declared terrains in overlay order
    pub fn terrains(&self) -> &[Terrain] {
        &self.terrains
    }

    pub fn terrain_count(&self) -> usize {
        self.terrains.len()
    }

    pub fn contains_terrain(&self, terrain: TerrainId) -> bool {
        terrain < self.terrains.len()
    }

    /// Number of distinct signatures
    pub fn len(&self) -> usize {
        self.by_signature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_signature.is_empty()
    }
}
