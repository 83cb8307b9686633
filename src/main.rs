//! spritegrid - Command-line tool for converting sprite grids to PNG and back

use std::process::ExitCode;

use spritegrid::cli;

fn main() -> ExitCode {
    cli::run()
}
