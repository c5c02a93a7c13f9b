//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

/// Point-of-sale cart console.
#[derive(Debug, Parser)]
#[command(name = "kasir", version, about)]
pub struct Cli {
    /// Config file to load instead of the platform default.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug events from kasir to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
