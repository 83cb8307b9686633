//! Raster/JSON file I/O and output path generation

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use thiserror::Error;

use crate::models::{RasterBuffer, Sprite};
use crate::parser::write_json;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding or decoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode image bytes in any supported format into an RGBA raster.
pub fn decode_raster(bytes: &[u8]) -> Result<RasterBuffer, OutputError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Load an image file into an RGBA raster.
pub fn load_raster(path: &Path) -> Result<RasterBuffer, OutputError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Encode a raster as PNG bytes.
pub fn encode_png(image: &RasterBuffer) -> Result<Vec<u8>, OutputError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RasterBuffer, path: &Path) -> Result<(), OutputError> {
    create_parent_dirs(path)?;
    fs::write(path, encode_png(image)?)?;
    Ok(())
}

/// Write sprites as a JSON sheet array, creating parent directories.
pub fn save_json(sprites: &[Sprite], path: &Path, pretty: bool) -> Result<(), OutputError> {
    create_parent_dirs(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(&mut writer, sprites, pretty)?;
    if pretty {
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn create_parent_dirs(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// File stem of a path, used as the default sprite name.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sprite".to_string())
}

/// Output path for a single input file.
///
/// `input.json` under `out_dir` becomes `out_dir/input.{extension}`.
pub fn output_path_for(input: &Path, out_dir: &Path, extension: &str) -> PathBuf {
    out_dir.join(format!("{}.{}", file_stem(input), extension))
}

/// Output path for a file found while walking `input_root`.
///
/// The path relative to `input_root` is kept so the output tree mirrors the
/// input tree: `in/a/b.json` under `out` becomes `out/a/b.png`.
pub fn mirrored_output_path(
    input: &Path,
    input_root: &Path,
    out_dir: &Path,
    extension: &str,
) -> PathBuf {
    let relative = input.strip_prefix(input_root).unwrap_or(input);
    out_dir.join(relative).with_extension(extension)
}

/// JSON path for the `index`-th sprite split from a sheet.
pub fn split_sprite_path(out_dir: &Path, index: usize) -> PathBuf {
    out_dir.join(format!("sprite_{:03}.json", index))
}

/// Name for the `index`-th sprite split from the sheet at `sheet_path`.
pub fn split_sprite_name(sheet_path: &Path, index: usize) -> String {
    format!("{}_sprite_{}", file_stem(sheet_path), index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_png_bytes_round_trip() {
        let mut image = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 0]));
        image.put_pixel(1, 1, Rgba([10, 20, 30, 255]));

        let bytes = encode_png(&image).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(decode_raster(&bytes).unwrap(), image);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_raster(b"not an image"),
            Err(OutputError::Image(_))
        ));
    }

    #[test]
    fn test_save_png_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.png");
        let image = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));

        save_png(&image, &path).unwrap();
        assert_eq!(load_raster(&path).unwrap(), image);
    }

    #[test]
    fn test_save_json_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/sprite.json");
        let sprite = Sprite::new(["A"], [('A', "#FF0000")]).with_name("sprite");

        save_json(&[sprite.clone()], &path, false).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(crate::parser::parse_document(&text).unwrap(), vec![sprite]);
    }

    #[test]
    fn test_output_path_for() {
        let path = output_path_for(Path::new("input/hero.json"), Path::new("output"), "png");
        assert_eq!(path, PathBuf::from("output/hero.png"));
    }

    #[test]
    fn test_mirrored_output_path() {
        let path = mirrored_output_path(
            Path::new("input/chars/hero.json"),
            Path::new("input"),
            Path::new("output"),
            "png",
        );
        assert_eq!(path, PathBuf::from("output/chars/hero.png"));
    }

    #[test]
    fn test_split_naming() {
        assert_eq!(
            split_sprite_path(Path::new("out"), 7),
            PathBuf::from("out/sprite_007.json")
        );
        assert_eq!(
            split_sprite_name(Path::new("sheets/walk.png"), 2),
            "walk_sprite_2"
        );
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("dir/my_sprite.png")), "my_sprite");
    }
}
