//! Color value resolution between palette strings and RGBA pixels
//!
//! Palette values come in exactly two forms:
//! - `transparent` - fully transparent, `(0, 0, 0, 0)`
//! - `#RRGGBB` - opaque 24-bit color, alpha is always 255
//!
//! [`canonicalize`] is the inverse of [`resolve`] and always emits uppercase hex,
//! so `canonicalize(resolve(v))` is the canonical spelling of `v`.

use image::Rgba;

use crate::error::{CodecError, Result};

/// The literal palette token for a fully transparent cell
pub const TRANSPARENT_TOKEN: &str = "transparent";

/// Fully transparent pixel
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Resolve a palette color value into an RGBA pixel.
///
/// # Examples
///
/// ```
/// use spritegrid::color::resolve;
///
/// assert_eq!(resolve("#FF8000").unwrap(), image::Rgba([255, 128, 0, 255]));
/// assert_eq!(resolve("transparent").unwrap(), image::Rgba([0, 0, 0, 0]));
/// assert!(resolve("red").is_err());
/// ```
///
/// # Errors
///
/// Returns [`CodecError::InvalidColorFormat`] for anything other than
/// `transparent` or a `#` followed by exactly six hex digits.
pub fn resolve(value: &str) -> Result<Rgba<u8>> {
    if value == TRANSPARENT_TOKEN {
        return Ok(TRANSPARENT);
    }

    let hex = value
        .strip_prefix('#')
        .ok_or_else(|| invalid(value, "color must be 'transparent' or start with '#'"))?;

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid(value, "expected exactly 6 hex digits"));
    }

    let r = parse_hex_pair(&hex[0..2]).ok_or_else(|| invalid(value, "bad red channel"))?;
    let g = parse_hex_pair(&hex[2..4]).ok_or_else(|| invalid(value, "bad green channel"))?;
    let b = parse_hex_pair(&hex[4..6]).ok_or_else(|| invalid(value, "bad blue channel"))?;
    Ok(Rgba([r, g, b, 255]))
}

/// Convert an RGBA pixel back into its canonical palette value.
///
/// Alpha 0 maps to `transparent` whatever the RGB bytes hold. Alpha 255 maps to
/// uppercase `#RRGGBB`.
///
/// # Errors
///
/// Partial alpha has no palette spelling and yields
/// [`CodecError::InvalidColorFormat`].
pub fn canonicalize(pixel: Rgba<u8>) -> Result<String> {
    let Rgba([r, g, b, a]) = pixel;
    match a {
        0 => Ok(TRANSPARENT_TOKEN.to_string()),
        255 => Ok(format!("#{:02X}{:02X}{:02X}", r, g, b)),
        _ => Err(CodecError::InvalidColorFormat(format!(
            "pixel ({}, {}, {}, {}) has partial alpha {}, only 0 and 255 are supported",
            r, g, b, a, a
        ))),
    }
}

/// Collapse every fully transparent pixel onto [`TRANSPARENT`].
///
/// PNG encoders are free to keep arbitrary RGB under alpha 0, so two such
/// pixels are the same palette color even when their bytes differ.
pub fn normalize(pixel: Rgba<u8>) -> Rgba<u8> {
    if pixel[3] == 0 {
        TRANSPARENT
    } else {
        pixel
    }
}

fn invalid(value: &str, reason: &str) -> CodecError {
    CodecError::InvalidColorFormat(format!("'{}': {}", value, reason))
}

/// Parse a two-character hex string to u8 (0-255)
fn parse_hex_pair(s: &str) -> Option<u8> {
    u8::from_str_radix(s, 16).ok()
}
