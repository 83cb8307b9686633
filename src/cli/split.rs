//! Split command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::batch::{has_extension, split_file, SplitOptions};
use crate::config::SpritegridConfig;

/// Execute the split command
pub fn run_split(
    sheet: &Path,
    config: &SpritegridConfig,
    width: u32,
    height: u32,
    padding: Option<u32>,
    pixel_size: Option<u32>,
) -> ExitCode {
    if !sheet.is_file() {
        log::error!("Input not found: {}", sheet.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    if !has_extension(sheet, "png") {
        log::error!("Invalid input path: {} must be a .png file", sheet.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let options = SplitOptions {
        sprite_width: width,
        sprite_height: height,
        padding: padding.unwrap_or(config.split.padding),
        pixel_size: pixel_size.unwrap_or(config.split.pixel_size),
        pretty: config.split.pretty,
    };

    match split_file(sheet, &config.output.dir, &options) {
        Ok(_) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            log::error!("Error processing {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
