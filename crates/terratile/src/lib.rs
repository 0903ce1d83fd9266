//! terratile - terrain-aware autotiling
//!
//! Single import for the data types and the resolver.
//!
//! ```rust,ignore
//! use terratile::prelude::*;
//!
//! let tileset = parse_tileset(json)?;
//! let index = TerrainTileIndex::from_tileset(&tileset)?;
//! let tiles = Resolver::new(&index, ResolverConfig::default()).resolve(&grid)?;
//! ```

pub use terratile_autotile;
pub use terratile_core;

pub mod prelude {
    pub use terratile_autotile::{
        AutotileError, CornerRule, Neighborhood, ResolveReport, Resolver, ResolverConfig,
        TerrainTileIndex, UnresolvedCell, VariantPolicy,
    };
    pub use terratile_core::{
        load_tileset, parse_tileset, save_tileset, CornerSignature, Terrain, TerrainGrid,
        TerrainId, TerrainTileset, TileGrid, TileRecord, TilesetError,
    };
}
