//! Spritesheet composition - packs sprites into a horizontal strip

use image::RgbaImage;

use crate::color::TRANSPARENT;
use crate::error::{check_raster_size, CodecError, Result};
use crate::models::{RasterBuffer, Sprite};
use crate::renderer::rasterize;

/// Rasterize sprites and lay them out left-to-right in input order.
///
/// - Sheet height is the tallest sprite; shorter sprites are top-aligned.
/// - Sheet width is the sum of sprite widths plus `padding` between neighbours.
/// - Padding columns and the area below shorter sprites stay fully transparent.
///
/// # Examples
///
/// ```
/// use spritegrid::models::Sprite;
/// use spritegrid::spritesheet::compose;
///
/// let a = Sprite::new(["AA"], [('A', "#000000")]);
/// let b = Sprite::new(["B", "B"], [('B', "#FFFFFF")]);
/// let sheet = compose(&[a, b], 2, 3).unwrap();
/// assert_eq!(sheet.dimensions(), (4 + 3 + 2, 4));
/// ```
///
/// # Errors
///
/// [`CodecError::EmptySheet`] for an empty slice,
/// [`CodecError::RasterTooLarge`] when the strip is wider than an image can be,
/// otherwise any [`rasterize`] error of the first failing sprite.
pub fn compose(sprites: &[Sprite], pixel_size: u32, padding: u32) -> Result<RasterBuffer> {
    if sprites.is_empty() {
        return Err(CodecError::EmptySheet);
    }

    let frames = sprites
        .iter()
        .map(|sprite| rasterize(sprite, pixel_size))
        .collect::<Result<Vec<_>>>()?;

    let widths: Vec<u32> = frames.iter().map(|f| f.width()).collect();
    let height = frames.iter().map(|f| f.height()).max().unwrap_or(0);
    let (width, height) = check_raster_size(strip_width(&widths, padding), u64::from(height))?;

    let mut sheet = RgbaImage::from_pixel(width, height, TRANSPARENT);
    for (frame, dest_x) in frames.iter().zip(strip_offsets(&widths, padding)) {
        // Strip width fits in u32, so every offset does too
        let dest_x = dest_x as u32;
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                sheet.put_pixel(dest_x + x, y, *frame.get_pixel(x, y));
            }
        }
    }

    Ok(sheet)
}

/// X offset of each frame in a horizontal strip with the given padding.
///
/// Returns `None` when an offset does not fit in `u32`.
pub fn frame_offsets(widths: &[u32], padding: u32) -> Option<Vec<u32>> {
    strip_offsets(widths, padding)
        .map(|x| u32::try_from(x).ok())
        .collect()
}

/// Total width of a strip: all frame widths plus `padding` between neighbours.
pub fn strip_width(widths: &[u32], padding: u32) -> u64 {
    let gaps = widths.len().saturating_sub(1) as u64;
    widths.iter().map(|&w| u64::from(w)).sum::<u64>() + gaps * u64::from(padding)
}

fn strip_offsets(widths: &[u32], padding: u32) -> impl Iterator<Item = u64> + '_ {
    widths.iter().scan(0u64, move |x, &width| {
        let offset = *x;
        *x += u64::from(width) + u64::from(padding);
        Some(offset)
    })
}
