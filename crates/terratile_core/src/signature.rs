//! Corner signatures
//!
//! A signature records which terrain occupies each quadrant of a tile image.
//! It is the key used to pick a tile for a local terrain configuration.

use crate::terrain::TerrainId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Terrain at each corner of a tile: (top-left, top-right, bottom-left, bottom-right)
///
/// Equality is positional. A signature and its mirror are different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CornerSignature(pub [TerrainId; 4]);

impl CornerSignature {
    pub const TOP_LEFT: usize = 0;
    pub const TOP_RIGHT: usize = 1;
    pub const BOTTOM_LEFT: usize = 2;
    pub const BOTTOM_RIGHT: usize = 3;

    pub const fn new(
        top_left: TerrainId,
        top_right: TerrainId,
        bottom_left: TerrainId,
        bottom_right: TerrainId,
    ) -> Self {
        Self([top_left, top_right, bottom_left, bottom_right])
    }

    /// Signature with one terrain in all four corners
    pub const fn uniform(terrain: TerrainId) -> Self {
        Self([terrain; 4])
    }

    pub fn top_left(&self) -> TerrainId {
        self.0[Self::TOP_LEFT]
    }

    pub fn top_right(&self) -> TerrainId {
        self.0[Self::TOP_RIGHT]
    }

    pub fn bottom_left(&self) -> TerrainId {
        self.0[Self::BOTTOM_LEFT]
    }

    pub fn bottom_right(&self) -> TerrainId {
        self.0[Self::BOTTOM_RIGHT]
    }

    /// Terrain at a corner position (0-3, TL, TR, BL, BR)
    pub fn get(&self, position: usize) -> Option<TerrainId> {
        self.0.get(position).copied()
    }

    /// All four corner terrains in signature order
    pub fn terrains(&self) -> &[TerrainId; 4] {
        &self.0
    }

    /// The terrain shared by all four corners, if any
    pub fn is_uniform(&self) -> Option<TerrainId> {
        let first = self.0[0];
        self.0.iter().all(|&t| t == first).then_some(first)
    }

    /// Highest terrain id referenced by any corner
    pub fn max_terrain(&self) -> TerrainId {
        self.0.iter().copied().max().unwrap_or_default()
    }

    /// Name of a corner position, for diagnostics
    pub fn position_name(position: usize) -> &'static str {
        match position {
            0 => "Top-Left",
            1 => "Top-Right",
            2 => "Bottom-Left",
            3 => "Bottom-Right",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for CornerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [tl, tr, bl, br] = self.0;
        write!(f, "{tl},{tr},{bl},{br}")
    }
}

/// Error returned when a `"a,b,c,d"` signature string is malformed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid corner signature '{input}': expected four comma-separated terrain ids")]
pub struct ParseSignatureError {
    pub input: String,
}

impl FromStr for CornerSignature {
    type Err = ParseSignatureError;

    /// Parses the comma-separated form used by tileset terrain attributes,
    /// e.g. `"0,0,0,2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSignatureError {
            input: s.to_string(),
        };

        let mut corners = [0; 4];
        let mut parts = s.split(',');
        for corner in corners.iter_mut() {
            let part = parts.next().ok_or_else(err)?;
            *corner = part.trim().parse().map_err(|_| err())?;
        }
        if parts.next().is_some() {
            return Err(err());
        }

        Ok(Self(corners))
    }
}
