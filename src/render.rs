//! Tile map rendering
//!
//! Composites atlas tiles onto a background. Only atlas pixels with non-zero
//! alpha are copied, so transparent parts of a tile leave the background
//! (or whatever was drawn before) untouched.

use image::{GrayAlphaImage, LumaA};

use crate::atlas::TileAtlas;
use crate::error::RenderError;
use crate::tilemap::Tilemap;

/// Opaque white, the background for wall maps.
pub const OPAQUE_WHITE: LumaA<u8> = LumaA([0xff, 0xff]);

/// Fully transparent black, the background for floor maps.
pub const TRANSPARENT: LumaA<u8> = LumaA([0, 0]);

/// Copy the non-transparent pixels of tile `index` to (dest_x, dest_y).
fn write_tile(img: &mut GrayAlphaImage, atlas: &TileAtlas, index: u8, dest_x: u32, dest_y: u32) {
    let size = atlas.tile_size();
    for v in 0..size {
        for u in 0..size {
            if let Some(pixel) = atlas.tile_pixel(index, u, v) {
                if pixel[1] != 0 {
                    img.put_pixel(dest_x + u, dest_y + v, pixel);
                }
            }
        }
    }
}

/// Render a tile index map. Each map cell becomes one atlas tile.
pub fn render_tiles(
    tiles: &Tilemap<u8>,
    atlas: &TileAtlas,
    background: LumaA<u8>,
) -> Result<GrayAlphaImage, RenderError> {
    let layout = atlas.layout();

    // Check every index before drawing anything
    for (x, y, &index) in tiles.iter() {
        if layout.tile_origin(index).is_none() {
            return Err(RenderError::TileOutOfRange {
                index,
                x,
                y,
                tiles: layout.tile_count(),
            });
        }
    }

    let size = layout.tile_size;
    let img_width = tiles.width as u32 * size;
    let img_height = tiles.height as u32 * size;
    let mut img = GrayAlphaImage::from_pixel(img_width, img_height, background);

    for (x, y, &index) in tiles.iter() {
        write_tile(&mut img, atlas, index, x as u32 * size, y as u32 * size);
    }

    Ok(img)
}
