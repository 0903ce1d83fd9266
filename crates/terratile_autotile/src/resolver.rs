//! Autotile resolver
//!
//! Turns a grid of per-cell terrain into a grid of tile ids. Each cell reads
//! only its own 3x3 block, so resolution is a pure function of the grid, the
//! index and the config.

use crate::config::{ResolverConfig, VariantPolicy};
use crate::corners::{corner_signature, Neighbors};
use crate::error::{AutotileError, Result};
use crate::index::TerrainTileIndex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use terratile_core::{CornerSignature, TerrainGrid, TileGrid};
use tracing::{debug, trace, warn};

/// A cell with no tile for its signature and no uniform fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnresolvedCell {
    pub x: u32,
    pub y: u32,
    pub signature: CornerSignature,
}

impl From<UnresolvedCell> for AutotileError {
    fn from(cell: UnresolvedCell) -> Self {
        AutotileError::UnresolvedSignature {
            x: cell.x,
            y: cell.y,
            signature: cell.signature,
        }
    }
}

/// Result of a resolve that keeps going past unresolved cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveReport {
    pub width: u32,
    pub height: u32,
    /// Row-major, `None` where the cell could not be resolved
    pub tiles: Vec<Option<u32>>,
    pub unresolved: Vec<UnresolvedCell>,
    /// Cells drawn with their uniform tile because the exact signature was missing
    pub fallbacks: usize,
}

impl ResolveReport {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Fill unresolved cells with a placeholder tile
    pub fn into_tile_grid(self, placeholder: u32) -> TileGrid {
        TileGrid {
            width: self.width,
            height: self.height,
            tiles: self
                .tiles
                .into_iter()
                .map(|t| t.unwrap_or(placeholder))
                .collect(),
        }
    }
}

/// How a single cell was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolved {
    Exact(u32),
    Fallback(u32),
}

impl Resolved {
    fn tile(self) -> u32 {
        match self {
            Resolved::Exact(tile) | Resolved::Fallback(tile) => tile,
        }
    }
}

/// Resolves terrain grids against a shared, immutable index
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    index: &'a TerrainTileIndex,
    config: ResolverConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a TerrainTileIndex, config: ResolverConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &'a TerrainTileIndex {
        self.index
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve every cell of the grid
    pub fn resolve(&self, grid: &TerrainGrid) -> Result<TileGrid> {
        let tiles = self.resolve_rows(grid, 0..grid.height)?;
        Ok(TileGrid {
            width: grid.width,
            height: grid.height,
            tiles,
        })
    }

    /// Resolve a band of rows, returned row-major.
    ///
    /// Rows read their neighbours above and below the band, so bands can be
    /// resolved independently and concatenated.
    pub fn resolve_rows(&self, grid: &TerrainGrid, rows: Range<u32>) -> Result<Vec<u32>> {
        self.check_shape(grid)?;
        if rows.start > rows.end || rows.end > grid.height {
            return Err(AutotileError::InvalidGrid(format!(
                "rows {}..{} outside grid of height {}",
                rows.start, rows.end, grid.height
            )));
        }
        self.check_terrains(grid, 0..grid.width, expand(&rows, grid.height))?;

        let mut tiles =
            Vec::with_capacity((rows.end - rows.start) as usize * grid.width as usize);
        let mut fallbacks = 0usize;
        for y in rows.clone() {
            for x in 0..grid.width {
                let resolved = self.resolve_unchecked(grid, x, y)?;
                if let Resolved::Fallback(_) = resolved {
                    fallbacks += 1;
                }
                tiles.push(resolved.tile());
            }
        }

        debug!(
            "resolved rows {}..{} of {}x{} grid ({} fallbacks)",
            rows.start, rows.end, grid.width, grid.height, fallbacks
        );
        Ok(tiles)
    }

    /// Resolve a single cell
    pub fn resolve_cell(&self, grid: &TerrainGrid, x: u32, y: u32) -> Result<u32> {
        self.check_shape(grid)?;
        self.check_cell(grid, x, y)?;
        self.check_terrains(
            grid,
            expand(&(x..x + 1), grid.width),
            expand(&(y..y + 1), grid.height),
        )?;
        Ok(self.resolve_unchecked(grid, x, y)?.tile())
    }

    /// The corner signature computed for a cell
    pub fn signature_at(&self, grid: &TerrainGrid, x: u32, y: u32) -> Result<CornerSignature> {
        self.check_shape(grid)?;
        self.check_cell(grid, x, y)?;
        let neighbors = Neighbors::sample(grid, x as i32, y as i32);
        Ok(corner_signature(
            &neighbors,
            self.config.neighborhood,
            self.config.corner_rule,
        ))
    }

    /// Resolve every cell, collecting unresolved cells instead of stopping.
    ///
    /// Grid-level problems (shape, undeclared terrain) are still errors.
    pub fn resolve_report(&self, grid: &TerrainGrid) -> Result<ResolveReport> {
        self.check_shape(grid)?;
        self.check_terrains(grid, 0..grid.width, 0..grid.height)?;

        let mut report = ResolveReport {
            width: grid.width,
            height: grid.height,
            tiles: Vec::with_capacity(grid.len()),
            unresolved: Vec::new(),
            fallbacks: 0,
        };

        for y in 0..grid.height {
            for x in 0..grid.width {
                match self.resolve_unchecked(grid, x, y) {
                    Ok(resolved) => {
                        if let Resolved::Fallback(_) = resolved {
                            report.fallbacks += 1;
                        }
                        report.tiles.push(Some(resolved.tile()));
                    }
                    Err(cell) => {
                        warn!(
                            "no tile for signature ({}) at ({}, {})",
                            cell.signature, cell.x, cell.y
                        );
                        report.tiles.push(None);
                        report.unresolved.push(cell);
                    }
                }
            }
        }

        Ok(report)
    }

    /// Re-resolve the 3x3 block around `(x, y)` after its terrain changed
    pub fn refresh_around(
        &self,
        grid: &TerrainGrid,
        tiles: &mut TileGrid,
        x: u32,
        y: u32,
    ) -> Result<()> {
        self.check_shape(grid)?;
        self.check_cell(grid, x, y)?;
        if tiles.width != grid.width
            || tiles.height != grid.height
            || tiles.tiles.len() != grid.len()
        {
            return Err(AutotileError::InvalidGrid(format!(
                "tile grid is {}x{}, terrain grid is {}x{}",
                tiles.width, tiles.height, grid.width, grid.height
            )));
        }

        let cols = expand(&(x..x + 1), grid.width);
        let rows = expand(&(y..y + 1), grid.height);
        self.check_terrains(
            grid,
            expand(&cols, grid.width),
            expand(&rows, grid.height),
        )?;

        let mut updates = Vec::with_capacity(9);
        for ty in rows {
            for tx in cols.clone() {
                updates.push((tx, ty, self.resolve_unchecked(grid, tx, ty)?.tile()));
            }
        }
        for (tx, ty, tile) in updates {
            tiles.set(tx, ty, tile);
        }

        Ok(())
    }

    /// Resolve one cell. Shape, bounds and terrain ids are already checked.
    fn resolve_unchecked(
        &self,
        grid: &TerrainGrid,
        x: u32,
        y: u32,
    ) -> std::result::Result<Resolved, UnresolvedCell> {
        let neighbors = Neighbors::sample(grid, x as i32, y as i32);
        let signature = corner_signature(
            &neighbors,
            self.config.neighborhood,
            self.config.corner_rule,
        );

        if let Some(variants) = self.index.lookup(&signature) {
            return Ok(Resolved::Exact(self.select_variant(variants, x, y, grid.width)));
        }

        trace!(
            "signature ({}) at ({}, {}) not in tileset, using uniform terrain {}",
            signature,
            x,
            y,
            neighbors.center
        );

        match self.index.uniform_tiles(neighbors.center) {
            Some(variants) => Ok(Resolved::Fallback(
                self.select_variant(variants, x, y, grid.width),
            )),
            None => Err(UnresolvedCell { x, y, signature }),
        }
    }

    /// Pick one of several tiles sharing a signature
    fn select_variant(&self, variants: &[u32], x: u32, y: u32, width: u32) -> u32 {
        let cell = y as u64 * width as u64 + x as u64;
        let pick = match self.config.variant {
            VariantPolicy::CellIndex => (cell % variants.len() as u64) as usize,
            VariantPolicy::First => 0,
            VariantPolicy::Seeded { seed } => {
                let mut rng =
                    SmallRng::seed_from_u64(seed ^ cell.wrapping_mul(0x9E37_79B9_7F4A_7C15));
                rng.gen_range(0..variants.len())
            }
        };
        variants[pick]
    }

    fn check_shape(&self, grid: &TerrainGrid) -> Result<()> {
        if !grid.is_consistent() {
            return Err(AutotileError::InvalidGrid(format!(
                "{}x{} grid has {} cells",
                grid.width,
                grid.height,
                grid.len()
            )));
        }
        Ok(())
    }

    fn check_cell(&self, grid: &TerrainGrid, x: u32, y: u32) -> Result<()> {
        if x >= grid.width || y >= grid.height {
            return Err(AutotileError::InvalidGrid(format!(
                "cell ({}, {}) outside {}x{} grid",
                x, y, grid.width, grid.height
            )));
        }
        Ok(())
    }

    /// Every cell in the region must use a declared terrain
    fn check_terrains(
        &self,
        grid: &TerrainGrid,
        cols: Range<u32>,
        rows: Range<u32>,
    ) -> Result<()> {
        for y in rows {
            for x in cols.clone() {
                let idx = y as usize * grid.width as usize + x as usize;
                let terrain = grid.cells[idx];
                if !self.index.contains_terrain(terrain) {
                    return Err(AutotileError::UnknownTerrain { x, y, terrain });
                }
            }
        }
        Ok(())
    }
}

/// Grow a range by one on each side, clamped to `0..limit`
fn expand(range: &Range<u32>, limit: u32) -> Range<u32> {
    range.start.saturating_sub(1)..(range.end + 1).min(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CornerRule, Neighborhood};
    use terratile_core::{Terrain, TileRecord};

    const G: usize = 0;
    const D: usize = 1;
    const W: usize = 2;

    fn terrains() -> Vec<Terrain> {
        vec![
            Terrain::new("Grass"),
            Terrain::new("Dirt"),
            Terrain::new("Water"),
        ]
    }

    fn index_of(records: &[(u32, [usize; 4])]) -> TerrainTileIndex {
        let records: Vec<TileRecord> = records
            .iter()
            .map(|&(id, sig)| TileRecord::terrain(id, CornerSignature(sig)))
            .collect();
        TerrainTileIndex::build(terrains(), &records).unwrap()
    }

    fn basic_index() -> TerrainTileIndex {
        index_of(&[
            (0, [G, G, G, G]),
            (19, [D, D, D, D]),
            (22, [W, W, W, W]),
            (5, [G, G, G, W]),
            (6, [G, G, W, W]),
        ])
    }

    #[test]
    fn test_uniform_grid() {
        let index = basic_index();
        let resolver = Resolver::new(&index, ResolverConfig::default());
        let grid = TerrainGrid::filled(4, 3, W);

        let tiles = resolver.resolve(&grid).unwrap();
        assert_eq!(tiles.width, 4);
        assert_eq!(tiles.height, 3);
        assert!(tiles.tiles.iter().all(|&t| t == 22));
    }

    #[test]
    fn test_single_cell_grid() {
        let index = basic_index();
        let resolver = Resolver::new(&index, ResolverConfig::default());
        let grid = TerrainGrid::filled(1, 1, D);
        assert_eq!(resolver.resolve(&grid).unwrap().tiles, vec![19]);
    }

    #[test]
    fn test_empty_grid() {
        let index = basic_index();
        let resolver = Resolver::new(&index, ResolverConfig::default());
        let grid = TerrainGrid::filled(0, 0, G);
        assert!(resolver.resolve(&grid).unwrap().tiles.is_empty());
    }

    #[test]
    fn test_variant_selection_by_cell_index() {
        let index = index_of(&[(5, [G; 4]), (9, [G; 4]), (14, [G; 4])]);
        let resolver = Resolver::new(&index, ResolverConfig::default());
        let grid = TerrainGrid::filled(10, 3, G);

        // (2 * 10 + 3) % 3 == 2
        assert_eq!(resolver.resolve_cell(&grid, 3, 2).unwrap(), 14);
        assert_eq!(resolver.resolve_cell(&grid, 0, 0).unwrap(), 5);
        assert_eq!(resolver.resolve_cell(&grid, 1, 0).unwrap(), 9);
    }

    #[test]
    fn test_variant_first_and_seeded() {
        let index = index_of(&[(5, [G; 4]), (9, [G; 4]), (14, [G; 4])]);
        let grid = TerrainGrid::filled(8, 8, G);

        let first = Resolver::new(&index, ResolverConfig::new().with_variant(VariantPolicy::First));
        assert!(first.resolve(&grid).unwrap().tiles.iter().all(|&t| t == 5));

        let config = ResolverConfig::new().with_variant(VariantPolicy::Seeded { seed: 7 });
        let seeded = Resolver::new(&index, config);
        let a = seeded.resolve(&grid).unwrap();
        let b = seeded.resolve(&grid).unwrap();
        assert_eq!(a, b);
        assert!(a.tiles.iter().all(|t| [5, 9, 14].contains(t)));
    }

    #[test]
    fn test_missing_signature_falls_back_to_uniform() {
        let index = basic_index();
        let config = ResolverConfig::new().with_corner_rule(CornerRule::Overlay);
        let resolver = Resolver::new(&index, config);
        // Dirt next to water: (D, W, D, W) is not in the index
        let grid = TerrainGrid::from_rows(&[vec![D, W]]).unwrap();

        let tiles = resolver.resolve(&grid).unwrap();
        assert_eq!(tiles.tiles, vec![19, 22]);
        assert_eq!(
            resolver.signature_at(&grid, 0, 0).unwrap(),
            CornerSignature::new(D, W, D, W)
        );

        let report = resolver.resolve_report(&grid).unwrap();
        assert!(report.is_complete());
        assert_eq!(report.fallbacks, 1);
    }

    #[test]
    fn test_unresolved_without_uniform_tile() {
        // no uniform dirt tile
        let index = index_of(&[(0, [G, G, G, G]), (22, [W, W, W, W])]);
        let resolver = Resolver::new(&index, ResolverConfig::default());
        let grid = TerrainGrid::from_rows(&[vec![G, G], vec![G, D]]).unwrap();

        match resolver.resolve(&grid) {
            Err(AutotileError::UnresolvedSignature { x, y, signature }) => {
                assert_eq!((x, y), (1, 1));
                assert_eq!(signature, CornerSignature::new(G, D, D, D));
            }
            other => panic!("expected unresolved signature, got {:?}", other),
        }
    }

    #[test]
    fn test_report_collects_unresolved_cells() {
        let index = index_of(&[(0, [G, G, G, G])]);
        let resolver = Resolver::new(&index, ResolverConfig::default());
        let grid = TerrainGrid::from_rows(&[vec![G, W, G], vec![G, G, W]]).unwrap();

        let report = resolver.resolve_report(&grid).unwrap();
        assert!(!report.is_complete());
        let cells: Vec<_> = report.unresolved.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(cells, vec![(1, 0), (2, 1)]);

        let tiles = report.into_tile_grid(999);
        assert_eq!(tiles.tiles, vec![0, 999, 0, 0, 0, 999]);
    }

    #[test]
    fn test_unknown_terrain_in_grid() {
        let index = basic_index();
        let resolver = Resolver::new(&index, ResolverConfig::default());
        let grid = TerrainGrid::from_rows(&[vec![G, G], vec![G, 7]]).unwrap();

        match resolver.resolve(&grid) {
            Err(AutotileError::UnknownTerrain { x, y, terrain }) => {
                assert_eq!((x, y, terrain), (1, 1, 7));
            }
            other => panic!("expected unknown terrain, got {:?}", other),
        }
    }

    #[test]
    fn test_inconsistent_grid_rejected() {
        let index = basic_index();
        let resolver = Resolver::new(&index, ResolverConfig::default());
        let grid = TerrainGrid {
            width: 3,
            height: 3,
            cells: vec![G; 4],
        };
        assert!(matches!(
            resolver.resolve(&grid),
            Err(AutotileError::InvalidGrid(_))
        ));
        assert!(matches!(
            resolver.resolve_cell(&TerrainGrid::filled(2, 2, G), 2, 0),
            Err(AutotileError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_resolve_rows_matches_full_resolve() {
        let index = basic_index();
        let config = ResolverConfig::new().with_corner_rule(CornerRule::Overlay);
        let resolver = Resolver::new(&index, config);
        let grid = TerrainGrid::from_rows(&[
            vec![G, G, G, G],
            vec![G, G, G, G],
            vec![W, W, W, W],
            vec![W, W, W, W],
        ])
        .unwrap();

        let full = resolver.resolve(&grid).unwrap();
        let mut banded = resolver.resolve_rows(&grid, 0..2).unwrap();
        banded.extend(resolver.resolve_rows(&grid, 2..4).unwrap());
        assert_eq!(full.tiles, banded);
        // the grass row above the water draws the shoreline
        assert_eq!(full.get(0, 1), Some(6));

        assert!(resolver.resolve_rows(&grid, 3..5).is_err());
    }

    #[test]
    fn test_idempotent() {
        let index = basic_index();
        let resolver = Resolver::new(&index, ResolverConfig::default());
        let grid = TerrainGrid::from_rows(&[vec![G, W, D], vec![D, G, W], vec![W, D, G]]).unwrap();
        assert_eq!(resolver.resolve(&grid).unwrap(), resolver.resolve(&grid).unwrap());
    }

    #[test]
    fn test_refresh_around_matches_full_resolve() {
        let index = basic_index();
        let config = ResolverConfig::new()
            .with_corner_rule(CornerRule::Overlay)
            .with_neighborhood(Neighborhood::Eight);
        let resolver = Resolver::new(&index, config);

        let mut grid = TerrainGrid::filled(5, 5, G);
        let mut tiles = resolver.resolve(&grid).unwrap();

        grid.set(2, 2, W);
        resolver.refresh_around(&grid, &mut tiles, 2, 2).unwrap();
        assert_eq!(tiles, resolver.resolve(&grid).unwrap());

        grid.set(0, 4, W);
        resolver.refresh_around(&grid, &mut tiles, 0, 4).unwrap();
        assert_eq!(tiles, resolver.resolve(&grid).unwrap());
    }

    #[test]
    fn test_refresh_around_rejects_mismatched_tiles() {
        let index = basic_index();
        let resolver = Resolver::new(&index, ResolverConfig::default());
        let grid = TerrainGrid::filled(3, 3, G);
        let mut tiles = TileGrid::new(2, 2, vec![0; 4]).unwrap();
        assert!(matches!(
            resolver.refresh_around(&grid, &mut tiles, 0, 0),
            Err(AutotileError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_resolver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TerrainTileIndex>();
        assert_send_sync::<Resolver<'static>>();
    }
}
