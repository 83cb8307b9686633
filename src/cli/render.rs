//! Render command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{report_batch, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::batch::{has_extension, render_file, render_folder, RenderOptions};
use crate::config::SpritegridConfig;
use crate::output::output_path_for;

/// Execute the render command
pub fn run_render(
    input: &Path,
    config: &SpritegridConfig,
    pixel_size: Option<u32>,
    padding: Option<u32>,
) -> ExitCode {
    let options = RenderOptions {
        pixel_size: pixel_size.unwrap_or(config.render.pixel_size),
        padding: padding.unwrap_or(config.render.padding),
    };
    let out_dir = &config.output.dir;

    if input.is_dir() {
        return match render_folder(input, out_dir, &options, config.output.jobs) {
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
    if !has_extension(input, "json") {
        log::error!("Invalid input path: {} must be a .json file or a directory", input.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let output = output_path_for(input, out_dir, "png");
    match render_file(input, &output, &options) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            log::error!("Error processing {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
