//! Seed management for cave map generation
//!
//! Each random stage gets its own seed, derived from a master seed, so the
//! cosmetic tile variation never disturbs the cave layout.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeds for the random stages of one map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Initial wall/open cell placement
    pub cells: u64,
    /// Cosmetic tile variation bits
    pub variation: u64,
}

impl MapSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            cells: derive_seed(master, "cells"),
            variation: derive_seed(master, "variation"),
        }
    }

    /// Seeds for the `index`-th map of a batch.
    pub fn for_batch_item(master: u64, index: usize) -> Self {
        let mut hasher = DefaultHasher::new();
        master.hash(&mut hasher);
        index.hash(&mut hasher);
        Self::from_master(hasher.finish())
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(master: u64) -> MapSeedsBuilder {
        MapSeedsBuilder::new(master)
    }

    pub fn cells_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.cells)
    }

    pub fn variation_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.variation)
    }
}

impl Default for MapSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

/// Builder for customizing individual seeds while deriving others from master
pub struct MapSeedsBuilder {
    seeds: MapSeeds,
}

impl MapSeedsBuilder {
    pub fn new(master: u64) -> Self {
        Self {
            seeds: MapSeeds::from_master(master),
        }
    }

    /// Override the cell placement seed
    pub fn cells(mut self, seed: u64) -> Self {
        self.seeds.cells = seed;
        self
    }

    /// Override the tile variation seed
    pub fn variation(mut self, seed: u64) -> Self {
        self.seeds.variation = seed;
        self
    }

    pub fn build(self) -> MapSeeds {
        self.seeds
    }
}

/// Derive a sub-seed from a master seed and a stage name.
fn derive_seed(master: u64, stage: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    stage.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for MapSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MapSeeds {{ master: {}, cells: {}, variation: {} }}",
            self.master, self.cells, self.variation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        let seeds1 = MapSeeds::from_master(12345);
        let seeds2 = MapSeeds::from_master(12345);

        assert_eq!(seeds1, seeds2);
    }

    #[test]
    fn test_stages_get_different_seeds() {
        let seeds = MapSeeds::from_master(12345);
        assert_ne!(seeds.cells, seeds.variation);
    }

    #[test]
    fn test_builder_override() {
        let seeds = MapSeeds::builder(12345).variation(99999).build();

        assert_eq!(seeds.variation, 99999);
        assert_eq!(seeds.cells, MapSeeds::from_master(12345).cells);
    }

    #[test]
    fn test_batch_items_differ() {
        let first = MapSeeds::for_batch_item(7, 0);
        let second = MapSeeds::for_batch_item(7, 1);

        assert_ne!(first.master, second.master);
        assert_eq!(first, MapSeeds::for_batch_item(7, 0));
    }
}
