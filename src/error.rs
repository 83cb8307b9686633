//! Error taxonomy for the sprite codec
//!
//! Every failure is local and synchronous. Variants carry enough context
//! (row, column, symbol or dimensions) to point at the offending input.

use thiserror::Error;

/// Error type for encode/decode failures in the codec core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Grid rows have unequal lengths
    #[error("irregular grid: row {row} has {found} cells, expected {expected}")]
    IrregularGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Grid has no rows, or its rows have no cells (or a raster has no pixels)
    #[error("grid must have at least one row and one column")]
    EmptyGrid,
    /// Grid references a symbol absent from the palette
    #[error("unknown symbol '{symbol}' at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    /// Palette value is neither `transparent` nor `#RRGGBB`, or a pixel has partial alpha
    #[error("invalid color format: {0}")]
    InvalidColorFormat(String),
    /// Composing a sheet from zero sprites
    #[error("cannot compose a spritesheet from an empty sprite list")]
    EmptySheet,
    /// Pixel size must be a positive integer
    #[error("pixel size must be positive, got {0}")]
    InvalidPixelSize(u32),
    /// Raster dimensions are not divisible by the pixel size
    #[error("image dimensions ({width}x{height}) must be divisible by pixel size ({pixel_size})")]
    DimensionMismatch {
        width: u32,
        height: u32,
        pixel_size: u32,
    },
    /// More distinct colors than palette symbols
    #[error("too many unique colors (more than {limit})")]
    PaletteOverflow { limit: usize },
    /// Output raster would not fit in memory addressable by an image buffer
    #[error("raster of {width}x{height} pixels is too large")]
    RasterTooLarge { width: u64, height: u64 },
    /// Declared sprite width and padding do not tile the sheet
    #[error(
        "sprite width {sprite_width} with padding {padding} does not evenly tile sheet width {sheet_width}"
    )]
    InvalidSheetLayout {
        sheet_width: u32,
        sprite_width: u32,
        padding: u32,
    },
}

/// Result alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Reject a zero pixel size before any division by it.
pub(crate) fn check_pixel_size(pixel_size: u32) -> Result<()> {
    if pixel_size == 0 {
        return Err(CodecError::InvalidPixelSize(pixel_size));
    }
    Ok(())
}

/// Narrow a raster size computed in `u64` to image dimensions.
///
/// Both sides must fit in `u32` and the RGBA8 byte count in `usize`.
pub(crate) fn check_raster_size(width: u64, height: u64) -> Result<(u32, u32)> {
    let too_large = CodecError::RasterTooLarge { width, height };
    let bytes = width.checked_mul(height).and_then(|px| px.checked_mul(4));
    match (u32::try_from(width), u32::try_from(height), bytes) {
        (Ok(w), Ok(h), Some(b)) if usize::try_from(b).is_ok() => Ok((w, h)),
        _ => Err(too_large),
    }
}
