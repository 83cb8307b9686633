//! Spritesheet splitting - the inverse of [`compose`](crate::spritesheet::compose)

use image::imageops;

use crate::error::{check_pixel_size, CodecError, Result};
use crate::import::quantize;
use crate::models::{RasterBuffer, Sprite};

/// Number of sprites that exactly tile a sheet of `sheet_width` pixels.
///
/// # Errors
///
/// [`CodecError::InvalidSheetLayout`] if no whole number of sprites
/// (at least one) reproduces the sheet width.
pub fn sprite_count(sheet_width: u32, sprite_width: u32, padding: u32) -> Result<u32> {
    let layout_error = CodecError::InvalidSheetLayout {
        sheet_width,
        sprite_width,
        padding,
    };
    if sprite_width == 0 {
        return Err(layout_error);
    }

    let stride = u64::from(sprite_width) + u64::from(padding);
    let count = (u64::from(sheet_width) + u64::from(padding)) / stride;
    if count == 0 || count * stride - u64::from(padding) != u64::from(sheet_width) {
        return Err(layout_error);
    }

    Ok(count as u32)
}

/// Cut a horizontal sheet into sprite rasters without decoding them.
///
/// Crop `i` starts at x = `i * (sprite_width + padding)`, y = 0 and is
/// `sprite_width` wide and `min(sprite_height, sheet height)` tall.
pub fn slice_sheet(
    sheet: &RasterBuffer,
    sprite_width: u32,
    sprite_height: u32,
    padding: u32,
) -> Result<Vec<RasterBuffer>> {
    let count = sprite_count(sheet.width(), sprite_width, padding)?;
    if sprite_height == 0 {
        return Err(CodecError::InvalidSheetLayout {
            sheet_width: sheet.width(),
            sprite_width,
            padding,
        });
    }

    let height = sprite_height.min(sheet.height());
    let stride = u64::from(sprite_width) + u64::from(padding);
    let frames = (0..u64::from(count))
        .map(|i| {
            // The layout tiles the sheet, so every crop starts inside it
            let x = (i * stride) as u32;
            imageops::crop_imm(sheet, x, 0, sprite_width, height).to_image()
        })
        .collect();

    Ok(frames)
}

/// Split a sheet into sprites, quantizing each crop on its own.
///
/// Each sprite gets its own symbol alphabet, so one color can carry
/// different symbols in different sprites. Sprites come back unnamed.
///
/// # Examples
///
/// ```
/// use spritegrid::models::Sprite;
/// use spritegrid::spritesheet::compose;
/// use spritegrid::split::split;
///
/// let a = Sprite::new(["A"], [('A', "#FF0000")]);
/// let b = Sprite::new(["B"], [('B', "#0000FF")]);
/// let sheet = compose(&[a, b], 8, 4).unwrap();
///
/// let sprites = split(&sheet, 8, 8, 4, 8).unwrap();
/// assert_eq!(sprites.len(), 2);
/// assert_eq!(sprites[1].palette[&'A'], "#0000FF");
/// ```
///
/// # Errors
///
/// - [`CodecError::InvalidPixelSize`] if `pixel_size` is zero
/// - [`CodecError::InvalidSheetLayout`] if the layout does not tile the sheet
/// - any [`quantize`] error of the first failing crop
pub fn split(
    sheet: &RasterBuffer,
    sprite_width: u32,
    sprite_height: u32,
    padding: u32,
    pixel_size: u32,
) -> Result<Vec<Sprite>> {
    check_pixel_size(pixel_size)?;

    let frames = slice_sheet(sheet, sprite_width, sprite_height, padding)?;
    log::debug!(
        "splitting {}x{} sheet into {} sprites of {}x{}",
        sheet.width(),
        sheet.height(),
        frames.len(),
        sprite_width,
        sprite_height
    );

    frames
        .iter()
        .map(|frame| quantize(frame, pixel_size))
        .collect()
}
