//! Sprite rasterization to image buffers

use std::collections::HashMap;

use image::{Rgba, RgbaImage};

use crate::color::resolve;
use crate::error::{check_pixel_size, check_raster_size, CodecError, Result};
use crate::models::{RasterBuffer, Sprite};

/// Rasterize a sprite into an RGBA buffer at the given pixel size.
///
/// Every grid cell becomes a full `pixel_size x pixel_size` block of its
/// palette color (nearest-neighbor, no blending), so the output is
/// `cols * pixel_size` wide and `rows * pixel_size` tall.
///
/// # Examples
///
/// ```
/// use spritegrid::models::Sprite;
/// use spritegrid::renderer::rasterize;
///
/// let sprite = Sprite::new([".R", "R."], [('.', "transparent"), ('R', "#FF0000")]);
/// let image = rasterize(&sprite, 4).unwrap();
/// assert_eq!(image.dimensions(), (8, 8));
/// assert_eq!(image.get_pixel(4, 0).0, [255, 0, 0, 255]);
/// assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
/// ```
///
/// # Errors
///
/// - [`CodecError::InvalidPixelSize`] if `pixel_size` is zero
/// - [`CodecError::EmptyGrid`] if the grid has no rows or no columns
/// - [`CodecError::IrregularGrid`] if rows differ in length
/// - [`CodecError::UnknownSymbol`] if a cell's symbol is not in the palette
/// - [`CodecError::InvalidColorFormat`] if a used palette value does not resolve
/// - [`CodecError::RasterTooLarge`] if the scaled size does not fit an image buffer
pub fn rasterize(sprite: &Sprite, pixel_size: u32) -> Result<RasterBuffer> {
    check_pixel_size(pixel_size)?;
    let cells = parse_grid(&sprite.grid)?;

    let rows = cells.len() as u64;
    let cols = cells[0].len() as u64;
    let (width, height) = check_raster_size(
        cols.saturating_mul(u64::from(pixel_size)),
        rows.saturating_mul(u64::from(pixel_size)),
    )?;

    // Resolve each palette entry once, on first use
    let mut color_cache: HashMap<char, Rgba<u8>> = HashMap::new();
    let mut image = RgbaImage::new(width, height);

    for (r, row) in cells.iter().enumerate() {
        for (c, &symbol) in row.iter().enumerate() {
            let color = match color_cache.get(&symbol) {
                Some(&rgba) => rgba,
                None => {
                    let value = sprite.palette.get(&symbol).ok_or(CodecError::UnknownSymbol {
                        symbol,
                        row: r,
                        col: c,
                    })?;
                    let rgba = resolve(value)?;
                    color_cache.insert(symbol, rgba);
                    rgba
                }
            };
            fill_block(&mut image, c as u32, r as u32, pixel_size, color);
        }
    }

    log::debug!(
        "rasterized {}x{} grid{} at pixel size {}",
        cols,
        rows,
        sprite
            .name
            .as_ref()
            .map(|n| format!(" '{}'", n))
            .unwrap_or_default(),
        pixel_size
    );

    Ok(image)
}

/// Split grid rows into symbol cells, checking the grid is non-empty and rectangular.
fn parse_grid(grid: &[String]) -> Result<Vec<Vec<char>>> {
    let cells: Vec<Vec<char>> = grid.iter().map(|row| row.chars().collect()).collect();

    let width = match cells.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(CodecError::EmptyGrid),
    };

    for (row, symbols) in cells.iter().enumerate() {
        if symbols.len() != width {
            return Err(CodecError::IrregularGrid {
                row,
                expected: width,
                found: symbols.len(),
            });
        }
    }

    Ok(cells)
}

/// Fill the block for grid cell (col, row) with one color.
fn fill_block(image: &mut RgbaImage, col: u32, row: u32, pixel_size: u32, color: Rgba<u8>) {
    let x0 = col * pixel_size;
    let y0 = row * pixel_size;
    for y in y0..y0 + pixel_size {
        for x in x0..x0 + pixel_size {
            image.put_pixel(x, y, color);
        }
    }
}
