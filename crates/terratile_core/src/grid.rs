//! Row-major grids for terrain input and resolved tile output

use crate::terrain::TerrainId;
use crate::TilesetError;
use serde::{Deserialize, Serialize};

/// Per-cell terrain assignments, owned by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainGrid {
    pub width: u32,
    pub height: u32,
    /// Row-major cells, `y * width + x`
    pub cells: Vec<TerrainId>,
}

impl TerrainGrid {
    /// Wrap existing row-major cells
    pub fn new(width: u32, height: u32, cells: Vec<TerrainId>) -> Result<Self, TilesetError> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(TilesetError::InvalidGrid(format!(
                "{}x{} grid needs {} cells, got {}",
                width,
                height,
                expected,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// A grid with every cell set to one terrain
    pub fn filled(width: u32, height: u32, terrain: TerrainId) -> Self {
        Self {
            width,
            height,
            cells: vec![terrain; width as usize * height as usize],
        }
    }

    /// Build from rows of terrain ids; all rows must have the same length
    pub fn from_rows(rows: &[Vec<TerrainId>]) -> Result<Self, TilesetError> {
        let height = rows.len() as u32;
        let width = rows.first().map(|r| r.len()).unwrap_or(0) as u32;
        if let Some(bad) = rows.iter().position(|r| r.len() as u32 != width) {
            return Err(TilesetError::InvalidGrid(format!(
                "row {} has {} cells, expected {}",
                bad,
                rows[bad].len(),
                width
            )));
        }
        Self::new(width, height, rows.concat())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the stored cell count matches `width * height`
    pub fn is_consistent(&self) -> bool {
        self.cells.len() == self.width as usize * self.height as usize
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// Terrain at a cell, `None` when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<TerrainId> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.cells.get(idx).copied()
    }

    /// Set terrain at a cell. Returns false when out of bounds.
    pub fn set(&mut self, x: u32, y: u32, terrain: TerrainId) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.cells[idx] = terrain;
        true
    }
}

/// Resolved tile ids, same shape as the terrain grid they came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    pub width: u32,
    pub height: u32,
    /// Row-major tile ids, `y * width + x`
    pub tiles: Vec<u32>,
}

impl TileGrid {
    pub fn new(width: u32, height: u32, tiles: Vec<u32>) -> Result<Self, TilesetError> {
        let expected = width as usize * height as usize;
        if tiles.len() != expected {
            return Err(TilesetError::InvalidGrid(format!(
                "{}x{} grid needs {} tiles, got {}",
                width,
                height,
                expected,
                tiles.len()
            )));
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Tile at a cell, `None` when out of bounds
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Set tile at a cell. Returns false when out of bounds.
    pub fn set(&mut self, x: u32, y: u32, tile_id: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.tiles[idx] = tile_id;
        true
    }

    /// Iterate rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.tiles.chunks(self.width.max(1) as usize)
    }
}
