//! Corner signature computation
//!
//! Each corner of a cell is shared by the cell itself, two edge-adjacent
//! neighbours and one diagonal neighbour. A corner rule picks one terrain
//! from those cells. Grid rows grow downward: north is `y - 1`.

use crate::config::{CornerRule, Neighborhood};
use terratile_core::{CornerSignature, TerrainGrid, TerrainId};

/// Neighbour offsets as (dx, dy)
pub mod offsets {
    pub const N: (i32, i32) = (0, -1);
    pub const NE: (i32, i32) = (1, -1);
    pub const E: (i32, i32) = (1, 0);
    pub const SE: (i32, i32) = (1, 1);
    pub const S: (i32, i32) = (0, 1);
    pub const SW: (i32, i32) = (-1, 1);
    pub const W: (i32, i32) = (-1, 0);
    pub const NW: (i32, i32) = (-1, -1);
}

/// For each corner in signature order: (edge, edge, diagonal)
const CORNER_NEIGHBORS: [[(i32, i32); 3]; 4] = [
    [offsets::N, offsets::W, offsets::NW], // Top-Left
    [offsets::N, offsets::E, offsets::NE], // Top-Right
    [offsets::S, offsets::W, offsets::SW], // Bottom-Left
    [offsets::S, offsets::E, offsets::SE], // Bottom-Right
];

/// Terrain of a cell's 3x3 block; out-of-bounds cells read as the centre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    pub center: TerrainId,
    /// Row-major 3x3 block, centre at index 4
    block: [TerrainId; 9],
}

impl Neighbors {
    /// Sample the block around `(x, y)`.
    ///
    /// The caller guarantees `(x, y)` is inside the grid.
    pub fn sample(grid: &TerrainGrid, x: i32, y: i32) -> Self {
        let center = grid.get(x, y).unwrap_or_default();
        let mut block = [center; 9];
        for dy in -1..=1 {
            for dx in -1..=1 {
                if let Some(terrain) = grid.get(x + dx, y + dy) {
                    block[((dy + 1) * 3 + dx + 1) as usize] = terrain;
                }
            }
        }
        Self { center, block }
    }

    /// Build from an explicit 3x3 block (row-major, centre at index 4)
    pub fn from_block(block: [TerrainId; 9]) -> Self {
        Self {
            center: block[4],
            block,
        }
    }

    /// Terrain at an offset in -1..=1
    pub fn at(&self, (dx, dy): (i32, i32)) -> TerrainId {
        self.block[((dy + 1) * 3 + dx + 1) as usize]
    }

    /// Whether every cell in the block matches the centre
    pub fn is_uniform(&self) -> bool {
        self.block.iter().all(|&t| t == self.center)
    }
}

/// Compute the corner signature for a sampled block
pub fn corner_signature(
    neighbors: &Neighbors,
    neighborhood: Neighborhood,
    rule: CornerRule,
) -> CornerSignature {
    let mut corners = [neighbors.center; 4];
    if neighbors.is_uniform() {
        return CornerSignature(corners);
    }

    for (corner, [edge_a, edge_b, diagonal]) in corners.iter_mut().zip(CORNER_NEIGHBORS) {
        let mut voters = [neighbors.center; 4];
        voters[1] = neighbors.at(edge_a);
        voters[2] = neighbors.at(edge_b);
        let voters = if neighborhood.uses_diagonals() {
            voters[3] = neighbors.at(diagonal);
            &voters[..]
        } else {
            &voters[..3]
        };

        *corner = match rule {
            CornerRule::Majority => majority(neighbors.center, voters),
            CornerRule::Overlay => voters.iter().copied().max().unwrap_or(neighbors.center),
        };
    }

    CornerSignature(corners)
}

/// Terrain with strictly more votes than every other, else `fallback`
fn majority(fallback: TerrainId, voters: &[TerrainId]) -> TerrainId {
    let mut best: Option<(TerrainId, usize)> = None;
    let mut tied = false;

    for (i, &candidate) in voters.iter().enumerate() {
        // count each terrain once, at its first occurrence
        if voters[..i].contains(&candidate) {
            continue;
        }
        let votes = voters.iter().filter(|&&t| t == candidate).count();
        match best {
            Some((_, best_votes)) if votes < best_votes => {}
            Some((_, best_votes)) if votes == best_votes => tied = true,
            _ => {
                best = Some((candidate, votes));
                tied = false;
            }
        }
    }

    match best {
        Some((terrain, _)) if !tied => terrain,
        _ => fallback,
    }
}
