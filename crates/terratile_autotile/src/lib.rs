//! Corner-signature terrain autotiling
//!
//! This crate picks a tile image for every cell of a terrain grid so that
//! boundaries between terrains line up across neighbouring tiles.
//!
//! # Features
//! - Immutable signature index, shareable across threads
//! - Majority or overlay-order corner rules, 4- or 8-neighbourhood
//! - Deterministic variant selection for tiles sharing a signature
//! - Uniform-tile fallback for terrain junctions the tileset never drew
//! - Row-band and 3x3 incremental re-resolution
//!
//! # Example
//!
//! ```rust,ignore
//! use terratile_autotile::{Resolver, ResolverConfig, TerrainTileIndex};
//! use terratile_core::{load_tileset, TerrainGrid};
//!
//! let tileset = load_tileset(Path::new("wood_tileset.json"))?;
//! let index = TerrainTileIndex::from_tileset(&tileset)?;
//! let resolver = Resolver::new(&index, ResolverConfig::default());
//!
//! let grid = TerrainGrid::filled(16, 16, 0);
//! let tiles = resolver.resolve(&grid)?;
//! ```

pub mod config;
pub mod corners;
pub mod error;
pub mod index;
pub mod resolver;

// Re-export main types at crate root
pub use config::{CornerRule, Neighborhood, ResolverConfig, VariantPolicy};
pub use corners::{corner_signature, Neighbors};
pub use error::{AutotileError, Result};
pub use index::TerrainTileIndex;
pub use resolver::{ResolveReport, Resolver, UnresolvedCell};

// Re-export terratile_core
pub use terratile_core;
