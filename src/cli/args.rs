//! CLI argument definitions using clap
//!
//! Commands:
//! - motorpool serve --config <path>
//! - motorpool seed --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// motorpool - a small car fleet inventory HTTP service
#[derive(Parser, Debug)]
#[command(name = "motorpool")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./motorpool.json")]
        config: PathBuf,
    },

    /// Insert the sample fleet into the configured database
    Seed {
        /// Path to configuration file
        #[arg(long, default_value = "./motorpool.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
