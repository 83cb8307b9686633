//! Pixel-size detection for upscaled pixel art.

use crate::color::normalize;
use crate::models::RasterBuffer;

/// Detect the block size an image was upscaled with.
///
/// Returns the largest `k` dividing both dimensions for which every
/// `k x k` block is a single color. Fully transparent pixels count as one
/// color whatever their RGB bytes. Returns 1 when no larger size fits, and
/// for empty images.
///
/// A sprite whose cells happen to be uniform at a coarser size (a 2x2
/// all-red grid, say) detects at that coarser size; quantizing at the
/// detected size still reproduces the same raster.
///
/// # Examples
///
/// ```
/// use spritegrid::models::Sprite;
/// use spritegrid::renderer::rasterize;
/// use spritegrid::import::detect_pixel_size;
///
/// let sprite = Sprite::new(["AB", "BA"], [('A', "#000000"), ('B', "#FFFFFF")]);
/// let image = rasterize(&sprite, 6).unwrap();
/// assert_eq!(detect_pixel_size(&image), 6);
/// ```
pub fn detect_pixel_size(raster: &RasterBuffer) -> u32 {
    let (width, height) = raster.dimensions();
    let limit = gcd(width, height);
    if limit <= 1 {
        return 1;
    }

    let mut candidates: Vec<u32> = (2..=limit).filter(|k| limit % k == 0).collect();
    candidates.reverse();

    for scale in candidates {
        if has_uniform_blocks(raster, scale) {
            log::debug!("detected pixel size {} for {}x{} image", scale, width, height);
            return scale;
        }
    }

    1
}

/// Check that every `scale x scale` block matches its top-left pixel.
fn has_uniform_blocks(raster: &RasterBuffer, scale: u32) -> bool {
    let (width, height) = raster.dimensions();

    for base_y in (0..height).step_by(scale as usize) {
        for base_x in (0..width).step_by(scale as usize) {
            let base = normalize(*raster.get_pixel(base_x, base_y));
            for dy in 0..scale {
                for dx in 0..scale {
                    if normalize(*raster.get_pixel(base_x + dx, base_y + dy)) != base {
                        return false;
                    }
                }
            }
        }
    }

    true
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
