//! Random initial cell placement

use rand::Rng;

use crate::grid::{CaveMap, Cell};

/// Fill a fresh map where each cell is independently a wall with
/// probability `wall_probability`. Cells are drawn in row-major order.
pub fn generate_random_cells(
    width: usize,
    height: usize,
    wall_probability: f32,
    rng: &mut impl Rng,
) -> CaveMap {
    let mut map = CaveMap::new_with(width, height, Cell::Open);
    for y in 0..height {
        for x in 0..width {
            if rng.gen::<f32>() < wall_probability {
                map.set(x, y, Cell::Wall);
            }
        }
    }
    map
}
