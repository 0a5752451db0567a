//! Tile index selection for cave maps
//!
//! Open cells are indexed by which orthogonal neighbors are walls:
//!
//! ```text
//!   +---+---+---+
//!   |   | 3 |   |
//!   +---+---+---+
//!   | 2 |   | 0 |
//!   +---+---+---+
//!   |   | 1 |   |
//!   +---+---+---+
//! ```
//!
//! Bits 4..6 pick one of several drawings of the same pattern. Wall cells
//! all use the solid wall tile.

use rand::Rng;

use crate::grid::CaveMap;
use crate::tilemap::{Tilemap, ORTHOGONAL_OFFSETS};

/// Bits encoding which orthogonal neighbors are walls.
pub const ADJACENCY_MASK: u8 = 0x0f;

/// Bits where cosmetic tile variations are encoded.
pub const VARIATION_MASK: u8 = 0x70;

/// Index of the solid wall tile.
pub const WALL_TILE_INDEX: u8 = 0x80;

const _: () = assert!(ADJACENCY_MASK & VARIATION_MASK == 0);
const _: () = assert!(WALL_TILE_INDEX & (ADJACENCY_MASK | VARIATION_MASK) == 0);

pub const BIT_RIGHT: u8 = 1 << 0;
pub const BIT_DOWN: u8 = 1 << 1;
pub const BIT_LEFT: u8 = 1 << 2;
pub const BIT_UP: u8 = 1 << 3;

/// Adjacency bits for the cell at (x, y). Out-of-bounds neighbors count as walls.
pub fn adjacency_bits(map: &CaveMap, x: i32, y: i32) -> u8 {
    ORTHOGONAL_OFFSETS
        .iter()
        .enumerate()
        .fold(0, |bits, (i, &(dx, dy))| {
            bits | (map.cell_at(x + dx, y + dy).wall_value() << i)
        })
}

/// Pick a tile index for every cell.
///
/// One variation draw is taken per open cell, in row-major order. Variation
/// bits are masked to `VARIATION_MASK` so they never alter adjacency bits.
pub fn select_tiles(map: &CaveMap, rng: &mut impl Rng) -> Tilemap<u8> {
    let mut tiles = Tilemap::new_with(map.width(), map.height(), WALL_TILE_INDEX);
    for y in 0..map.height() {
        for x in 0..map.width() {
            if map.get(x, y).is_wall() {
                continue;
            }
            let variation = rng.gen::<u8>() & VARIATION_MASK;
            tiles.set(x, y, adjacency_bits(map, x as i32, y as i32) | variation);
        }
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Always returns the same byte pattern.
    struct ConstantRng(u8);

    impl RngCore for ConstantRng {
        fn next_u32(&mut self) -> u32 {
            u32::from_le_bytes([self.0; 4])
        }

        fn next_u64(&mut self) -> u64 {
            u64::from_le_bytes([self.0; 8])
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(self.0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_right_and_down_walls() {
        let map = CaveMap::from_rows(&[
            "...",
            "..#",
            ".#.",
        ]);

        assert_eq!(adjacency_bits(&map, 1, 1), 0b0011);

        for variation in [0x00u8, 0xff, 0x5a, 0xa5] {
            let tiles = select_tiles(&map, &mut ConstantRng(variation));
            let index = *tiles.get(1, 1);
            assert_eq!(index & ADJACENCY_MASK, 0b0011);
            assert_eq!(index & !(ADJACENCY_MASK | VARIATION_MASK), 0);
        }
    }

    #[test]
    fn test_walls_get_solid_tile() {
        let map = CaveMap::from_rows(&["#.", ".#"]);
        let tiles = select_tiles(&map, &mut ConstantRng(0xff));

        assert_eq!(*tiles.get(0, 0), WALL_TILE_INDEX);
        assert_eq!(*tiles.get(1, 1), WALL_TILE_INDEX);
        // (1, 0): right and up are outside, left is wall, down is wall
        assert_eq!(*tiles.get(1, 0), BIT_RIGHT | BIT_DOWN | BIT_LEFT | BIT_UP | VARIATION_MASK);
    }

    #[test]
    fn test_edges_read_as_walls() {
        let map = CaveMap::new_with(3, 3, Cell::Open);

        assert_eq!(adjacency_bits(&map, 0, 0), BIT_LEFT | BIT_UP);
        assert_eq!(adjacency_bits(&map, 2, 2), BIT_RIGHT | BIT_DOWN);
        assert_eq!(adjacency_bits(&map, 1, 1), 0);
    }

    #[test]
    fn test_variation_is_seeded() {
        let map = CaveMap::new_with(16, 16, Cell::Open);
        let a = select_tiles(&map, &mut ChaCha8Rng::seed_from_u64(5));
        let b = select_tiles(&map, &mut ChaCha8Rng::seed_from_u64(5));

        assert_eq!(a, b);
        assert!(a.as_slice().iter().any(|&t| t & VARIATION_MASK != 0));
    }
}
