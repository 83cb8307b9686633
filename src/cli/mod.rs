//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod import;
mod render;
mod split;

use clap::{Parser, Subcommand};
use log::Level;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::batch::BatchResult;
use crate::config::{load_config, merge_cli_overrides, CliOverrides, PixelSizeSetting, SpritegridConfig};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// spritegrid - Convert text sprite grids to PNG and back
#[derive(Parser)]
#[command(name = "spritegrid")]
#[command(about = "spritegrid - Convert JSON sprite grids to PNG spritesheets and PNGs back to grids")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to spritegrid.toml (default: search upward from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of parallel jobs for folder input (0 = one per core)
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a JSON sprite file, or every .json file in a folder, to PNG
    Render {
        /// Input .json file or folder
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Size of each grid cell in pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        pixel_size: Option<u32>,

        /// Transparent gap between sprites in pixels
        #[arg(long)]
        padding: Option<u32>,
    },

    /// Convert a PNG, or every .png file in a folder, back to JSON
    Import {
        /// Input .png file or folder
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Size of each grid cell in pixels, or "auto" to detect it per image
        #[arg(long)]
        pixel_size: Option<PixelSizeSetting>,

        /// Write single-line JSON instead of indented output
        #[arg(long)]
        compact: bool,
    },

    /// Split a horizontal spritesheet PNG into one JSON file per sprite
    Split {
        /// Spritesheet PNG
        sheet: PathBuf,

        /// Width of one sprite in the sheet, in image pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,

        /// Height of one sprite in the sheet, in image pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,

        /// Gap between sprites in the sheet, in image pixels
        #[arg(long)]
        padding: Option<u32>,

        /// Size of each grid cell in pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        pixel_size: Option<u32>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    setup_logger(cli.verbose, cli.quiet);

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match cli.command {
        Commands::Render { input, output, pixel_size, padding } => {
            apply_overrides(&mut config, output, cli.jobs);
            render::run_render(&input, &config, pixel_size, padding)
        }
        Commands::Import { input, output, pixel_size, compact } => {
            apply_overrides(&mut config, output, cli.jobs);
            import::run_import(&input, &config, pixel_size, compact)
        }
        Commands::Split { sheet, width, height, padding, pixel_size, output } => {
            apply_overrides(&mut config, output, cli.jobs);
            split::run_split(&sheet, &config, width, height, padding, pixel_size)
        }
    }
}

/// Exit status for a folder run: any failed file makes the run fail.
pub(crate) fn report_batch(result: &BatchResult) -> ExitCode {
    if result.is_success() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        log::warn!("{}", result.summary());
        ExitCode::from(EXIT_ERROR)
    }
}

fn apply_overrides(config: &mut SpritegridConfig, out: Option<PathBuf>, jobs: Option<usize>) {
    merge_cli_overrides(config, &CliOverrides { out, jobs });
}

/// Install the global logger for the requested verbosity.
fn setup_logger(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::Error,
        (false, 0) => Level::Warn,
        (false, 1) => Level::Info,
        (false, _) => Level::Debug,
    };

    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("Warning: failed to initialize logger: {}", e);
    }
    log::debug!("Log level: {}", level);
}
