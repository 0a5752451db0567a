//! Random floor tile maps with matching edges
//!
//! Each floor tile index carries the pattern of its right and bottom edges
//! in bits 1 and 0, and the pattern of its top and left edges in bits 6 and
//! 7. Copying the neighbors' edge bits makes adjacent tiles line up:
//!
//! ```text
//!            +-----+
//!            |     |
//!            |    1|
//!            |  0  |
//!            +-----+
//!   +-----+  +-----+
//!   |     |  |  6  |  bit 6 = bit 0 of the tile above
//!   |    1|  |7 ?  |  bit 7 = bit 1 of the tile to the left
//!   |  0  |  |     |  bits 0..5 are random
//!   +-----+  +-----+
//! ```

use rand::Rng;

use crate::tilemap::Tilemap;

/// Reference floor map size in tiles.
pub const FLOOR_MAP_WIDTH: usize = 16;
pub const FLOOR_MAP_HEIGHT: usize = 9;

const RANDOM_BITS: u8 = 0x3f;

/// Generate a floor tile map.
///
/// An invisible random row above the map and an invisible random tile left
/// of each row provide the edges for the first row and column.
pub fn generate_floor_tiles(width: usize, height: usize, rng: &mut impl Rng) -> Tilemap<u8> {
    let mut tiles = Tilemap::new_with(width, height, 0u8);
    let mut previous_row: Vec<u8> = (0..width).map(|_| rng.gen()).collect();

    for y in 0..height {
        let mut previous_tile: u8 = rng.gen();
        for (x, above) in previous_row.iter_mut().enumerate() {
            let tile =
                ((previous_tile & 2) << 6) | ((*above & 1) << 6) | (rng.gen::<u8>() & RANDOM_BITS);
            tiles.set(x, y, tile);
            *above = tile;
            previous_tile = tile;
        }
    }

    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_edges_match_neighbors() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let tiles = generate_floor_tiles(FLOOR_MAP_WIDTH, FLOOR_MAP_HEIGHT, &mut rng);

        for y in 0..FLOOR_MAP_HEIGHT {
            for x in 0..FLOOR_MAP_WIDTH {
                let tile = *tiles.get(x, y);
                if x > 0 {
                    let left = *tiles.get(x - 1, y);
                    assert_eq!((tile >> 7) & 1, (left >> 1) & 1, "left edge at ({}, {})", x, y);
                }
                if y > 0 {
                    let above = *tiles.get(x, y - 1);
                    assert_eq!((tile >> 6) & 1, above & 1, "top edge at ({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_floor_is_seeded() {
        let a = generate_floor_tiles(8, 8, &mut ChaCha8Rng::seed_from_u64(1));
        let b = generate_floor_tiles(8, 8, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(a, b);
    }
}
