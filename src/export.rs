//! Export of generated maps as JSON tile data and ASCII previews

use std::fs::File;
use std::io::{BufWriter, Write};

use serde::Serialize;

use crate::error::OutputError;
use crate::grid::CaveMap;
use crate::tilemap::Tilemap;
use crate::tiles::{ADJACENCY_MASK, VARIATION_MASK, WALL_TILE_INDEX};

/// Tile indices plus the bit conventions a renderer needs to interpret them.
#[derive(Debug, Serialize)]
pub struct TileExport<'a> {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub adjacency_mask: u8,
    pub variation_mask: u8,
    pub wall_tile: u8,
    /// Row-major tile indices
    pub tiles: &'a [u8],
}

impl<'a> TileExport<'a> {
    pub fn new(tiles: &'a Tilemap<u8>, seed: u64) -> Self {
        Self {
            seed,
            width: tiles.width,
            height: tiles.height,
            adjacency_mask: ADJACENCY_MASK,
            variation_mask: VARIATION_MASK,
            wall_tile: WALL_TILE_INDEX,
            tiles: tiles.as_slice(),
        }
    }

    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }
}

/// Write the tile export for a map to a JSON file.
pub fn export_tiles_json(tiles: &Tilemap<u8>, seed: u64, path: &str) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_string(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    TileExport::new(tiles, seed)
        .write_json(&mut writer)
        .map_err(|source| OutputError::Json {
            path: path.to_string(),
            source,
        })?;
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_string(),
        source,
    })
}

/// Render a map as text: `#` for walls, `.` for open cells.
pub fn ascii_preview(map: &CaveMap) -> String {
    let mut out = String::with_capacity((map.width() + 1) * map.height());
    for y in 0..map.height() {
        for x in 0..map.width() {
            out.push(if map.get(x, y).is_wall() { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}
