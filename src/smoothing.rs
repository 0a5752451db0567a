//! Cellular automaton smoothing
//!
//! Majority filter over the 3x3 block: a cell becomes wall when the block
//! holds more than `threshold` walls (out-of-bounds cells count as walls).
//! Each pass reads only the previous generation and writes into a second
//! buffer, which is swapped in once the pass is complete.

use log::debug;

use crate::grid::{CaveMap, Cell};

/// Run one smoothing pass from `src` into `dst`. Both maps must have the same size.
fn smooth_into(src: &CaveMap, dst: &mut CaveMap, threshold: u8) {
    debug_assert_eq!((src.width(), src.height()), (dst.width(), dst.height()));
    for y in 0..src.height() {
        for x in 0..src.width() {
            let walls = src.walls_in_block(x as i32, y as i32);
            let cell = if walls > threshold { Cell::Wall } else { Cell::Open };
            dst.set(x, y, cell);
        }
    }
}

/// Apply a single smoothing pass and return the new generation.
pub fn smooth_once(map: &CaveMap, threshold: u8) -> CaveMap {
    let mut next = map.clone();
    smooth_into(map, &mut next, threshold);
    next
}

/// Apply `iterations` smoothing passes in place.
///
/// Stops early once a pass leaves the map unchanged, since every further
/// pass would produce the same grid.
pub fn smooth_cells(map: &mut CaveMap, iterations: usize, threshold: u8) {
    let mut back = map.clone();
    for pass in 0..iterations {
        smooth_into(map, &mut back, threshold);
        std::mem::swap(map, &mut back);
        if *map == back {
            debug!("Smoothing reached a fixed point after {} of {} passes", pass + 1, iterations);
            break;
        }
    }
}
