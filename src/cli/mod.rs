//! # CLI
//!
//! Command-line interface: argument parsing, command dispatch, errors.

pub mod args;
pub mod commands;
pub mod errors;

pub use errors::{CliError, CliResult};

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = args::Cli::parse_args();
    commands::dispatch(cli.command)
}
