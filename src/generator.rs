//! Cave map generation pipeline
//!
//! Stages run strictly in order, each consuming the previous stage's grid:
//! random cells -> smoothing -> connectivity repair -> tile selection.

use log::{debug, info};
use rayon::prelude::*;

use crate::cells::generate_random_cells;
use crate::connectivity::{enforce_connectivity, AccessMap, ConnectivityStats};
use crate::error::GenerationError;
use crate::grid::CaveMap;
use crate::params::CaveParams;
use crate::seeds::MapSeeds;
use crate::smoothing::smooth_cells;
use crate::tilemap::Tilemap;
use crate::tiles::select_tiles;

/// Result of one generation run.
#[derive(Clone, Debug)]
pub struct GeneratedMap {
    pub seeds: MapSeeds,
    /// Final wall/open layout
    pub cells: CaveMap,
    /// Tile index per cell, same size as `cells`
    pub tiles: Tilemap<u8>,
    pub stats: ConnectivityStats,
}

/// Generate the wall/open layout only, without picking tiles.
/// Also returns the flood fill marks of the connectivity repair.
pub fn generate_cells(
    params: &CaveParams,
    seeds: &MapSeeds,
) -> Result<(CaveMap, AccessMap, ConnectivityStats), GenerationError> {
    params.validate()?;

    let mut rng = seeds.cells_rng();
    let mut cells =
        generate_random_cells(params.width, params.height, params.wall_probability, &mut rng);
    debug!("Seeded {} open cells of {}", cells.open_count(), params.cell_count());

    smooth_cells(&mut cells, params.smoothing_iterations, params.smoothing_threshold);
    debug!("After smoothing: {} open cells", cells.open_count());

    let (access, stats) = enforce_connectivity(&mut cells)?;
    Ok((cells, access, stats))
}

/// Run the whole pipeline for one map.
pub fn generate_map(
    params: &CaveParams,
    seeds: &MapSeeds,
) -> Result<GeneratedMap, GenerationError> {
    let (cells, _, stats) = generate_cells(params, seeds)?;
    let tiles = select_tiles(&cells, &mut seeds.variation_rng());

    info!(
        "Generated {}x{} map (seed {}): {} open cells, {} sealed, {} holes kept",
        params.width,
        params.height,
        seeds.master,
        cells.open_count(),
        stats.sealed,
        stats.preserved_holes,
    );

    Ok(GeneratedMap {
        seeds: seeds.clone(),
        cells,
        tiles,
        stats,
    })
}

/// Generate `count` maps in parallel.
///
/// Each map gets seeds derived from `master` and its index, and owns all of
/// its buffers, so results do not depend on scheduling. Results are returned
/// in index order.
pub fn generate_batch(
    params: &CaveParams,
    master: u64,
    count: usize,
) -> Result<Vec<GeneratedMap>, GenerationError> {
    params.validate()?;
    (0..count)
        .into_par_iter()
        .map(|index| generate_map(params, &MapSeeds::for_batch_item(master, index)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn small_params() -> CaveParams {
        CaveParams {
            width: 48,
            height: 40,
            ..Default::default()
        }
    }

    #[test]
    fn test_same_seeds_same_map() {
        let params = small_params();
        let seeds = MapSeeds::from_master(2024);

        let a = generate_map(&params, &seeds).unwrap();
        let b = generate_map(&params, &seeds).unwrap();

        assert_eq!(a.cells, b.cells);
        assert_eq!(a.tiles, b.tiles);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_variation_seed_leaves_layout_alone() {
        let params = small_params();
        let a = generate_map(&params, &MapSeeds::builder(11).variation(1).build()).unwrap();
        let b = generate_map(&params, &MapSeeds::builder(11).variation(2).build()).unwrap();

        assert_eq!(a.cells, b.cells);
    }

    #[test]
    fn test_invalid_params_rejected_up_front() {
        let params = CaveParams { width: 1, ..Default::default() };
        let err = generate_map(&params, &MapSeeds::from_master(1)).unwrap_err();

        assert!(matches!(err, GenerationError::Config(ConfigError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_batch_matches_individual_runs() {
        let params = small_params();
        let batch = generate_batch(&params, 99, 3).unwrap();

        assert_eq!(batch.len(), 3);
        for (index, map) in batch.iter().enumerate() {
            let single = generate_map(&params, &MapSeeds::for_batch_item(99, index)).unwrap();
            assert_eq!(map.cells, single.cells);
            assert_eq!(map.tiles, single.tiles);
        }
    }
}
