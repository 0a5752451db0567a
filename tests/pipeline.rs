use cave_tiles::atlas::{generate_wall_atlas, AtlasLayout, TileAtlas};
use cave_tiles::connectivity::{flood_fill, seed_center, Reach};
use cave_tiles::generator::{generate_cells, generate_map};
use cave_tiles::params::CaveParams;
use cave_tiles::render::{render_tiles, OPAQUE_WHITE};
use cave_tiles::seeds::MapSeeds;
use cave_tiles::tiles::{
    adjacency_bits, ADJACENCY_MASK, VARIATION_MASK, WALL_TILE_INDEX,
};

const SEEDS: [u64; 6] = [1, 7, 42, 1234, 98765, 31337];

#[test]
fn test_open_cells_outside_refill_are_holes() {
    let params = CaveParams::default();

    for &seed in SEEDS.iter() {
        let (cells, repair, stats) = generate_cells(&params, &MapSeeds::from_master(seed)).unwrap();

        // Refill the final map: sealing never touches a brush block, so the
        // same centers are reached again and only hole-rule cells are missed
        let refill = flood_fill(&cells, seed_center(&cells)).unwrap();

        for (x, y, cell) in cells.iter() {
            let kept = repair.get(x, y);
            if cell.is_open() {
                assert!(kept.is_kept(), "seed {}: ({}, {}) open but unmarked", seed, x, y);
            }
            let expected = match kept {
                Reach::Hole => Reach::Unreached,
                other => other,
            };
            assert_eq!(refill.get(x, y), expected, "seed {}: cell ({}, {})", seed, x, y);
        }
        assert_eq!(repair.hole_count(), stats.preserved_holes);
        assert_eq!(refill.reached_count(), stats.reached);
    }
}

#[test]
fn test_seed_block_always_open() {
    let params = CaveParams {
        wall_probability: 0.9,
        ..Default::default()
    };

    for &seed in SEEDS.iter() {
        let map = generate_map(&params, &MapSeeds::from_master(seed)).unwrap();
        let (cx, cy) = seed_center(&map.cells);
        for y in cy - 1..=cy + 1 {
            for x in cx - 1..=cx + 1 {
                assert!(map.cells.is_open(x, y), "seed {}: ({}, {})", seed, x, y);
            }
        }
        let access = flood_fill(&map.cells, (cx, cy)).unwrap();
        assert!(access.is_reached(cx as usize, cy as usize));
    }
}

#[test]
fn test_tile_indices_match_final_cells() {
    let params = CaveParams::default();
    let map = generate_map(&params, &MapSeeds::from_master(5)).unwrap();

    assert_eq!(map.tiles.width, map.cells.width());
    assert_eq!(map.tiles.height, map.cells.height());

    for (x, y, cell) in map.cells.iter() {
        let index = *map.tiles.get(x, y);
        if cell.is_wall() {
            assert_eq!(index, WALL_TILE_INDEX);
        } else {
            assert_eq!(index & ADJACENCY_MASK, adjacency_bits(&map.cells, x as i32, y as i32));
            assert_eq!(index & !(ADJACENCY_MASK | VARIATION_MASK), 0);
        }
    }
}

#[test]
fn test_runs_are_reproducible() {
    let params = CaveParams::default();
    let seeds = MapSeeds::from_master(77);

    let a = generate_map(&params, &seeds).unwrap();
    let b = generate_map(&params, &seeds).unwrap();

    assert_eq!(a.cells, b.cells);
    assert_eq!(a.tiles.as_slice(), b.tiles.as_slice());
}

#[test]
fn test_rendered_map_uses_atlas_tiles() {
    let params = CaveParams {
        width: 32,
        height: 24,
        ..Default::default()
    };
    let map = generate_map(&params, &MapSeeds::from_master(3)).unwrap();
    let atlas =
        TileAtlas::from_gray_alpha(generate_wall_atlas(8).unwrap(), AtlasLayout::WALL).unwrap();

    let img = render_tiles(&map.tiles, &atlas, OPAQUE_WHITE).unwrap();
    assert_eq!(img.dimensions(), (32 * 8, 24 * 8));

    for (x, y, cell) in map.cells.iter() {
        let (px, py) = (x as u32 * 8 + 4, y as u32 * 8 + 4);
        if cell.is_wall() {
            // Solid wall tile covers the whole cell
            assert_eq!(img.get_pixel(px, py).0, [0, 0xff]);
        }
    }
}
