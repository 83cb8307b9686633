//! Raster quantization: rebuilding a grid + palette from an image.
//!
//! Each `pixel_size x pixel_size` block becomes one grid cell. The block's
//! color is the pixel at its top-left corner; blocks produced by
//! [`rasterize`](crate::renderer::rasterize) are uniform, so that sample is
//! exact for them. Hand-edited images with mixed blocks decode using the corner
//! sample only.
//!
//! Distinct colors receive symbols from [`SYMBOL_ALPHABET`] in the order they
//! are first met scanning row-major from `(0, 0)`.

mod detection;

pub use detection::detect_pixel_size;

use image::Rgba;

use crate::color::{canonicalize, normalize};
use crate::error::{check_pixel_size, CodecError, Result};
use crate::models::{Palette, RasterBuffer, Sprite};

/// Symbols handed out to quantized colors, in assignment order.
pub const SYMBOL_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Maximum number of distinct colors a quantized sprite can hold.
pub const MAX_COLORS: usize = SYMBOL_ALPHABET.len();

/// Ordered color -> symbol association list.
///
/// Lookup is a linear scan; the list never grows past [`MAX_COLORS`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteAssignment {
    entries: Vec<(Rgba<u8>, char)>,
}

impl PaletteAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbol for `color`, assigning the next free one on first encounter.
    ///
    /// # Errors
    ///
    /// [`CodecError::PaletteOverflow`] when a new color arrives after all
    /// symbols are taken.
    pub fn symbol_for(&mut self, color: Rgba<u8>) -> Result<char> {
        if let Some(symbol) = self.get(color) {
            return Ok(symbol);
        }

        let symbol = SYMBOL_ALPHABET
            .chars()
            .nth(self.entries.len())
            .ok_or(CodecError::PaletteOverflow { limit: MAX_COLORS })?;
        self.entries.push((color, symbol));
        Ok(symbol)
    }

    /// Symbol previously assigned to `color`, if any.
    pub fn get(&self, color: Rgba<u8>) -> Option<char> {
        self.entries
            .iter()
            .find(|(c, _)| *c == color)
            .map(|&(_, symbol)| symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert into a palette of canonical color values, in assignment order.
    pub fn into_palette(self) -> Result<Palette> {
        self.entries
            .into_iter()
            .map(|(color, symbol)| Ok::<_, CodecError>((symbol, canonicalize(color)?)))
            .collect()
    }
}

/// Rebuild a sprite from a raster at the given pixel size.
///
/// The returned sprite is unnamed; callers attach a name from their own
/// context (usually the file stem).
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use spritegrid::import::quantize;
///
/// let mut image = RgbaImage::from_pixel(4, 2, Rgba([0, 0, 0, 0]));
/// for y in 0..2 {
///     for x in 2..4 {
///         image.put_pixel(x, y, Rgba([0, 0, 255, 255]));
///     }
/// }
///
/// let sprite = quantize(&image, 2).unwrap();
/// assert_eq!(sprite.grid, vec!["AB"]);
/// assert_eq!(sprite.palette[&'A'], "transparent");
/// assert_eq!(sprite.palette[&'B'], "#0000FF");
/// ```
///
/// # Errors
///
/// - [`CodecError::InvalidPixelSize`] if `pixel_size` is zero
/// - [`CodecError::EmptyGrid`] if the raster has no pixels
/// - [`CodecError::DimensionMismatch`] if either dimension is not a multiple
///   of `pixel_size`
/// - [`CodecError::PaletteOverflow`] on the 37th distinct color
/// - [`CodecError::InvalidColorFormat`] if a sampled pixel has partial alpha
pub fn quantize(raster: &RasterBuffer, pixel_size: u32) -> Result<Sprite> {
    check_pixel_size(pixel_size)?;

    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return Err(CodecError::EmptyGrid);
    }
    if width % pixel_size != 0 || height % pixel_size != 0 {
        return Err(CodecError::DimensionMismatch {
            width,
            height,
            pixel_size,
        });
    }

    let cols = width / pixel_size;
    let rows = height / pixel_size;

    let mut assignment = PaletteAssignment::new();
    let mut grid = Vec::with_capacity(rows as usize);

    for r in 0..rows {
        let mut row = String::with_capacity(cols as usize);
        for c in 0..cols {
            let sample = normalize(*raster.get_pixel(c * pixel_size, r * pixel_size));
            let is_new = assignment.get(sample).is_none();
            let symbol = assignment.symbol_for(sample)?;
            if is_new {
                // Reject partial alpha at the first cell that shows it
                canonicalize(sample)?;
                log::trace!("cell ({}, {}) introduces color {:?} as '{}'", r, c, sample.0, symbol);
            }
            row.push(symbol);
        }
        grid.push(row);
    }

    log::debug!(
        "quantized {}x{} raster into {}x{} grid with {} colors",
        width,
        height,
        cols,
        rows,
        assignment.len()
    );

    Ok(Sprite {
        name: None,
        grid,
        palette: assignment.into_palette()?,
    })
}
