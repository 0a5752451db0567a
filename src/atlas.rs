//! Tile atlases: fixed grids of equal-size tile images
//!
//! Tile `i` lives at column `i % columns`, row `i / columns`. With 16
//! columns the low nibble of a tile index picks the column and the high
//! nibble picks the row.

use std::path::Path;

use image::{DynamicImage, GrayAlphaImage, LumaA};

use crate::error::{AtlasError, ConfigError};
use crate::tiles::WALL_TILE_INDEX;

/// Smallest tile size the wall drawings fit into.
pub const MIN_WALL_TILE_SIZE: u32 = 8;

/// Geometry of a tile atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasLayout {
    /// Tile size in pixels
    pub tile_size: u32,
    pub columns: u32,
    pub rows: u32,
}

impl AtlasLayout {
    /// 8x8 wall tiles: 8 rows of adjacency patterns plus a row of specials.
    pub const WALL: AtlasLayout = AtlasLayout { tile_size: 8, columns: 16, rows: 9 };

    /// 64x64 floor tiles covering every 8-bit index.
    pub const FLOOR: AtlasLayout = AtlasLayout { tile_size: 64, columns: 16, rows: 16 };

    pub fn with_tile_size(self, tile_size: u32) -> Self {
        Self { tile_size, ..self }
    }

    /// Atlas image size in pixels.
    pub fn image_size(&self) -> (u32, u32) {
        (self.tile_size * self.columns, self.tile_size * self.rows)
    }

    pub fn tile_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Top-left pixel of a tile, or `None` if the atlas has no such tile.
    pub fn tile_origin(&self, index: u8) -> Option<(u32, u32)> {
        let index = u32::from(index);
        if index >= self.tile_count() {
            return None;
        }
        let col = index % self.columns;
        let row = index / self.columns;
        Some((col * self.tile_size, row * self.tile_size))
    }
}

/// A loaded tile atlas in 8-bit gray + alpha.
pub struct TileAtlas {
    layout: AtlasLayout,
    pixels: GrayAlphaImage,
}

impl TileAtlas {
    /// Load an atlas image from disk.
    pub fn open(path: impl AsRef<Path>, layout: AtlasLayout) -> Result<Self, AtlasError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| AtlasError::Image {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_image(&img, layout)
    }

    /// Create an atlas from a decoded image, checking its size against the layout.
    pub fn from_image(img: &DynamicImage, layout: AtlasLayout) -> Result<Self, AtlasError> {
        Self::from_gray_alpha(img.to_luma_alpha8(), layout)
    }

    pub fn from_gray_alpha(
        pixels: GrayAlphaImage,
        layout: AtlasLayout,
    ) -> Result<Self, AtlasError> {
        let expected = layout.image_size();
        let actual = pixels.dimensions();
        if expected != actual {
            return Err(AtlasError::DimensionMismatch { expected, actual });
        }
        Ok(Self { layout, pixels })
    }

    pub fn layout(&self) -> AtlasLayout {
        self.layout
    }

    pub fn tile_size(&self) -> u32 {
        self.layout.tile_size
    }

    /// Pixel (u, v) of tile `index`, if the tile exists.
    pub fn tile_pixel(&self, index: u8, u: u32, v: u32) -> Option<LumaA<u8>> {
        let (ox, oy) = self.layout.tile_origin(index)?;
        Some(*self.pixels.get_pixel(ox + u, oy + v))
    }

    pub fn image(&self) -> &GrayAlphaImage {
        &self.pixels
    }
}

// =============================================================================
// WALL ATLAS GENERATION
// =============================================================================

const OPAQUE_BLACK: LumaA<u8> = LumaA([0, 0xff]);

/// Draw an opaque black rectangle. Pixels start out black and transparent.
fn rect(img: &mut GrayAlphaImage, x: u32, y: u32, w: u32, h: u32) {
    for iy in y..y + h {
        for ix in x..x + w {
            img.put_pixel(ix, iy, OPAQUE_BLACK);
        }
    }
}

/// Draw the wall atlas consumed by the cave map renderer.
///
/// Tiles 0x00..=0x7f: column = adjacency bits (which sides are walls),
/// row = variation. Even rows draw a dashed edge, odd rows a solid edge
/// with a raised middle; variation bits 1 and 2 add corner details. Two
/// adjacent wall sides also get a rounded inside corner.
/// Tile 0x80 is solid wall, 0x81 and 0x82 are alignment debug squares.
pub fn generate_wall_atlas(tile_size: u32) -> Result<GrayAlphaImage, ConfigError> {
    if tile_size < MIN_WALL_TILE_SIZE {
        return Err(ConfigError::InvalidTileSize {
            actual: tile_size,
            min: MIN_WALL_TILE_SIZE,
        });
    }
    let layout = AtlasLayout::WALL.with_tile_size(tile_size);
    let (width, height) = layout.image_size();
    let mut img = GrayAlphaImage::new(width, height);

    for ty in 0..8 {
        for tx in 0..16 {
            draw_wall_adjacent_tile(&mut img, tx, ty, tile_size);
        }
    }

    // Solid wall
    let (wx, wy) = layout.tile_origin(WALL_TILE_INDEX).unwrap_or((0, height - tile_size));
    rect(&mut img, wx, wy, tile_size, tile_size);

    draw_debug_tiles(&mut img, tile_size, height - tile_size);
    Ok(img)
}

fn draw_wall_adjacent_tile(img: &mut GrayAlphaImage, tx: u32, ty: u32, s: u32) {
    let x = tx * s;
    let y = ty * s;
    let solid = ty & 1 != 0;
    let detail_a = ty & 2 != 0;
    let detail_b = ty & 4 != 0;

    if tx & 1 != 0 {
        // Right
        if !solid {
            rect(img, x + s - 1, y + 1, 1, 2);
            rect(img, x + s - 1, y + s - 3, 1, 2);
            if detail_a {
                rect(img, x + s - 1, y, 1, 1);
            }
            if detail_b {
                rect(img, x + s - 1, y + s - 1, 1, 1);
            }
        } else {
            rect(img, x + s - 1, y, 1, s);
            rect(img, x + s - 2, y + 3, 1, s - 6);
            if detail_a {
                rect(img, x + s - 2, y + 2, 1, 1);
            }
            if detail_b {
                rect(img, x + s - 2, y + s - 3, 1, 1);
            }
        }
    }
    if tx & 2 != 0 {
        // Down
        if !solid {
            rect(img, x + 1, y + s - 1, 2, 1);
            rect(img, x + s - 3, y + s - 1, 2, 1);
            if detail_a {
                rect(img, x + s - 1, y + s - 1, 1, 1);
            }
            if detail_b {
                rect(img, x, y + s - 1, 1, 1);
            }
        } else {
            rect(img, x, y + s - 1, s, 1);
            rect(img, x + 3, y + s - 2, s - 6, 1);
            if detail_a {
                rect(img, x + s - 3, y + s - 2, 1, 1);
            }
            if detail_b {
                rect(img, x + 2, y + s - 2, 1, 1);
            }
        }
    }
    if tx & 4 != 0 {
        // Left
        if !solid {
            rect(img, x, y + 1, 1, 2);
            rect(img, x, y + s - 3, 1, 2);
            if detail_a {
                rect(img, x, y + s - 1, 1, 1);
            }
            if detail_b {
                rect(img, x, y, 1, 1);
            }
        } else {
            rect(img, x, y, 1, s);
            rect(img, x + 1, y + 3, 1, s - 6);
            if detail_a {
                rect(img, x + 1, y + s - 3, 1, 1);
            }
            if detail_b {
                rect(img, x + 1, y + 2, 1, 1);
            }
        }
    }
    if tx & 8 != 0 {
        // Up
        if !solid {
            rect(img, x + 1, y, 2, 1);
            rect(img, x + s - 3, y, 2, 1);
            if detail_a {
                rect(img, x, y, 1, 1);
            }
            if detail_b {
                rect(img, x + s - 1, y, 1, 1);
            }
        } else {
            rect(img, x, y, s, 1);
            rect(img, x + 3, y + 1, s - 6, 1);
            if detail_a {
                rect(img, x + 2, y + 1, 1, 1);
            }
            if detail_b {
                rect(img, x + s - 3, y + 1, 1, 1);
            }
        }
    }

    // Rounded inside corners, drawn as 5-step staircases
    for step in 0..5 {
        let run = step + 1;
        if tx & 3 == 3 {
            // Down right
            rect(img, x + s - run, y + s - 5 + step, run, 1);
        }
        if tx & 6 == 6 {
            // Down left
            rect(img, x, y + s - 5 + step, run, 1);
        }
        if tx & 12 == 12 {
            // Up left
            rect(img, x, y + 4 - step, run, 1);
        }
        if tx & 9 == 9 {
            // Up right
            rect(img, x + s - run, y + 4 - step, run, 1);
        }
    }
}

/// Squares used for checking tile alignment: solid outline, then dotted outline.
fn draw_debug_tiles(img: &mut GrayAlphaImage, s: u32, y: u32) {
    rect(img, s, y, s, 1);
    rect(img, s, y + s - 1, s, 1);
    rect(img, s, y, 1, s);
    rect(img, s * 2 - 1, y, 1, s);

    for v in 0..s {
        for u in ((v & 1)..s).step_by(2) {
            if u == 0 || v == 0 || u == s - 1 || v == s - 1 {
                rect(img, s * 2 + u, y + v, 1, 1);
            }
        }
    }
}
