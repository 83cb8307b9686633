//! Import command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{report_batch, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::batch::{has_extension, import_file, import_folder, ImportOptions};
use crate::config::{PixelSizeSetting, SpritegridConfig};
use crate::output::output_path_for;

/// Execute the import command
pub fn run_import(
    input: &Path,
    config: &SpritegridConfig,
    pixel_size: Option<PixelSizeSetting>,
    compact: bool,
) -> ExitCode {
    let options = ImportOptions {
        pixel_size: pixel_size.unwrap_or(config.import.pixel_size),
        pretty: config.import.pretty && !compact,
    };
    let out_dir = &config.output.dir;

    if input.is_dir() {
        return match import_folder(input, out_dir, &options, config.output.jobs) {
            Ok(result) => report_batch(&result),
            Err(e) => {
                log::error!("{}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    if !input.is_file() {
        log::error!("Input not found: {}", input.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    if !has_extension(input, "png") {
        log::error!("Invalid input path: {} must be a .png file or a directory", input.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let output = output_path_for(input, out_dir, "json");
    match import_file(input, &output, &options) {
        Ok(sprite) => {
            log::info!(
                "Imported {} ({}x{} cells, {} colors)",
                output.display(),
                sprite.cols(),
                sprite.rows(),
                sprite.palette.len()
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            log::error!("Error processing {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
