//! Cave map generation library
//!
//! Generates cave-like wall maps for tile-based rendering: random cells,
//! cellular automaton smoothing, a thick-brush connectivity repair, and
//! tile index selection. Re-exports modules for use by the binary and tests.

pub mod atlas;
pub mod cells;
pub mod connectivity;
pub mod error;
pub mod export;
pub mod floor;
pub mod generator;
pub mod grid;
pub mod output;
pub mod params;
pub mod render;
pub mod seeds;
pub mod smoothing;
pub mod tilemap;
pub mod tiles;
