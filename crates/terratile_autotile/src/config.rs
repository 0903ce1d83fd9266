//! Resolver configuration
//!
//! Controls which neighbours a corner consults, how a corner picks its terrain,
//! and how visual variants sharing one signature are chosen.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Which neighbours take part in a corner vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Neighborhood {
    /// Edge-adjacent neighbours only (N, E, S, W)
    Four,
    /// Edge-adjacent plus diagonal neighbours
    #[default]
    Eight,
}

impl Neighborhood {
    /// Whether diagonal neighbours vote on corners
    pub fn uses_diagonals(&self) -> bool {
        matches!(self, Neighborhood::Eight)
    }
}

/// How a corner picks one terrain from the cells sharing it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CornerRule {
    /// Terrain with strictly more votes than any other wins, ties go to the cell itself
    #[default]
    Majority,
    /// Highest terrain in overlay order wins
    Overlay,
}

/// How to choose among several tiles sharing a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum VariantPolicy {
    /// `variants[(y * width + x) % len]`
    #[default]
    CellIndex,
    /// Always the lowest tile id
    First,
    /// Seeded pick per cell; reproducible for a given seed
    Seeded { seed: u64 },
}

/// Configuration for a `Resolver`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub neighborhood: Neighborhood,
    pub corner_rule: CornerRule,
    pub variant: VariantPolicy,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML table, e.g.
    ///
    /// ```toml
    /// neighborhood = "eight"
    /// corner_rule = "overlay"
    /// variant = { kind = "seeded", seed = 7 }
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn with_corner_rule(mut self, corner_rule: CornerRule) -> Self {
        self.corner_rule = corner_rule;
        self
    }

    pub fn with_variant(mut self, variant: VariantPolicy) -> Self {
        self.variant = variant;
        self
    }
}
