//! File and folder processing around the codec.
//!
//! Single-file pipelines read a description or image, run the codec and
//! write the result. Folder runs discover inputs recursively, convert them in
//! parallel and keep going past per-file failures.
//!
//! # Example
//!
//! ```ignore
//! use spritegrid::batch::{render_folder, RenderOptions};
//!
//! let result = render_folder(Path::new("input"), Path::new("output"), &RenderOptions::default(), 0)?;
//! println!("{}", result.summary());
//! ```

mod discovery;
mod result;

pub use discovery::{discover_files, has_extension, DiscoveryError};
pub use result::{BatchResult, ItemResult, ItemStatus};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;

use crate::config::{PixelSizeSetting, DEFAULT_PIXEL_SIZE, DEFAULT_RENDER_PADDING};
use crate::error::CodecError;
use crate::import::{detect_pixel_size, quantize};
use crate::models::Sprite;
use crate::output::{
    file_stem, load_raster, mirrored_output_path, save_json, save_png, split_sprite_name,
    split_sprite_path, OutputError,
};
use crate::parser::{parse_document, ParseError};
use crate::split::split;
use crate::spritesheet::compose;

/// Error while processing a file or folder
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Input path does not exist
    #[error("Input not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Folder operation given something other than a directory
    #[error("Input path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// Reading the input file failed
    #[error("{}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Description JSON is malformed
    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
    /// Codec rejected the input
    #[error("{}: {source}", .path.display())]
    Codec { path: PathBuf, source: CodecError },
    /// Writing or decoding an image/JSON file failed
    #[error("{}: {source}", .path.display())]
    Output { path: PathBuf, source: OutputError },
    /// Input discovery failed
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    /// Worker pool could not be created
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Options for JSON -> PNG conversion
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub pixel_size: u32,
    pub padding: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pixel_size: DEFAULT_PIXEL_SIZE,
            padding: DEFAULT_RENDER_PADDING,
        }
    }
}

/// Options for PNG -> JSON conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    pub pixel_size: PixelSizeSetting,
    pub pretty: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            pixel_size: PixelSizeSetting::default(),
            pretty: true,
        }
    }
}

/// Options for spritesheet PNG -> per-sprite JSON conversion
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOptions {
    /// Width of one sprite in the sheet, in image pixels
    pub sprite_width: u32,
    /// Height of one sprite in the sheet, in image pixels
    pub sprite_height: u32,
    pub padding: u32,
    pub pixel_size: u32,
    pub pretty: bool,
}

/// Render one description file to a PNG sheet.
pub fn render_file(input: &Path, output: &Path, options: &RenderOptions) -> Result<(), ProcessError> {
    require_exists(input)?;
    log::info!("Processing {} -> {}", input.display(), output.display());

    let text = fs::read_to_string(input).map_err(|source| ProcessError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let sprites = parse_document(&text).map_err(|source| ProcessError::Parse {
        path: input.to_path_buf(),
        source,
    })?;
    let sheet = compose(&sprites, options.pixel_size, options.padding).map_err(|source| {
        ProcessError::Codec {
            path: input.to_path_buf(),
            source,
        }
    })?;
    save_png(&sheet, output).map_err(|source| ProcessError::Output {
        path: output.to_path_buf(),
        source,
    })?;

    log::info!("Saved {}", output.display());
    Ok(())
}

/// Decode one PNG into a sprite named after the file and write it as `[sprite]`.
pub fn import_file(input: &Path, output: &Path, options: &ImportOptions) -> Result<Sprite, ProcessError> {
    require_exists(input)?;
    log::info!("Converting {} -> {}", input.display(), output.display());

    let raster = load_raster(input).map_err(|source| ProcessError::Output {
        path: input.to_path_buf(),
        source,
    })?;
    let pixel_size = match options.pixel_size {
        PixelSizeSetting::Fixed(size) => size,
        PixelSizeSetting::Auto(_) => {
            let size = detect_pixel_size(&raster);
            log::info!("Detected pixel size {} for {}", size, input.display());
            size
        }
    };
    let sprite = quantize(&raster, pixel_size)
        .map_err(|source| ProcessError::Codec {
            path: input.to_path_buf(),
            source,
        })?
        .with_name(file_stem(input));

    save_json(std::slice::from_ref(&sprite), output, options.pretty).map_err(|source| {
        ProcessError::Output {
            path: output.to_path_buf(),
            source,
        }
    })?;

    log::info!("Saved {}", output.display());
    Ok(sprite)
}

/// Split a sheet PNG and write each sprite to `out_dir/sprite_NNN.json`.
///
/// Returns the written paths in sheet order.
pub fn split_file(sheet_path: &Path, out_dir: &Path, options: &SplitOptions) -> Result<Vec<PathBuf>, ProcessError> {
    require_exists(sheet_path)?;

    let sheet = load_raster(sheet_path).map_err(|source| ProcessError::Output {
        path: sheet_path.to_path_buf(),
        source,
    })?;
    let sprites = split(
        &sheet,
        options.sprite_width,
        options.sprite_height,
        options.padding,
        options.pixel_size,
    )
    .map_err(|source| ProcessError::Codec {
        path: sheet_path.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(sprites.len());
    for (index, sprite) in sprites.into_iter().enumerate() {
        let sprite = sprite.with_name(split_sprite_name(sheet_path, index));
        let path = split_sprite_path(out_dir, index);
        save_json(&[sprite], &path, options.pretty).map_err(|source| ProcessError::Output {
            path: path.clone(),
            source,
        })?;
        log::info!("Extracted sprite {} -> {}", index, path.display());
        written.push(path);
    }

    log::info!("Extracted {} sprites from {}", written.len(), sheet_path.display());
    Ok(written)
}

/// Render every `.json` file under `input_dir`, mirroring the tree under `out_dir`.
pub fn render_folder(
    input_dir: &Path,
    out_dir: &Path,
    options: &RenderOptions,
    jobs: usize,
) -> Result<BatchResult, ProcessError> {
    process_folder(input_dir, out_dir, "json", "png", jobs, |input, output| {
        render_file(input, output, options)
    })
}

/// Import every `.png` file under `input_dir`, mirroring the tree under `out_dir`.
pub fn import_folder(
    input_dir: &Path,
    out_dir: &Path,
    options: &ImportOptions,
    jobs: usize,
) -> Result<BatchResult, ProcessError> {
    process_folder(input_dir, out_dir, "png", "json", jobs, |input, output| {
        import_file(input, output, options).map(|_| ())
    })
}

/// Discover inputs and run `convert` on each, in parallel.
///
/// Per-file failures are logged and recorded; they never stop the batch.
fn process_folder<F>(
    input_dir: &Path,
    out_dir: &Path,
    input_ext: &str,
    output_ext: &str,
    jobs: usize,
    convert: F,
) -> Result<BatchResult, ProcessError>
where
    F: Fn(&Path, &Path) -> Result<(), ProcessError> + Sync,
{
    require_exists(input_dir)?;
    if !input_dir.is_dir() {
        return Err(ProcessError::NotADirectory(input_dir.to_path_buf()));
    }

    let start = Instant::now();
    let files = discover_files(input_dir, input_ext)?;
    if files.is_empty() {
        log::warn!("No .{} files found in {}", input_ext, input_dir.display());
        return Ok(BatchResult::new());
    }

    let run_one = |input: &PathBuf| {
        let item_start = Instant::now();
        let output = mirrored_output_path(input, input_dir, out_dir, output_ext);
        match convert(input, &output) {
            Ok(()) => ItemResult::success(input.clone(), vec![output], item_start.elapsed()),
            Err(e) => {
                log::error!("Error processing {}: {}", input.display(), e);
                ItemResult::failed(input.clone(), e.to_string(), item_start.elapsed())
            }
        }
    };

    let items: Vec<ItemResult> = if jobs == 0 {
        files.par_iter().map(run_one).collect()
    } else {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        pool.install(|| files.par_iter().map(run_one).collect())
    };

    let mut result = BatchResult::new();
    for item in items {
        result.add_result(item);
    }
    result.total_duration = start.elapsed();
    log::info!("{}", result.summary());

    Ok(result)
}

fn require_exists(path: &Path) -> Result<(), ProcessError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ProcessError::NotFound(path.to_path_buf()))
    }
}
