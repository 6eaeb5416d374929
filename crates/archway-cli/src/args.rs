//! Command-line argument definitions for the Archway CLI.

use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;

/// Command-line arguments for the Archway diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input architecture document (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output whiteboard document
    #[arg(short, long, default_value = "out.excalidraw")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Fixed jitter seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// The requested log filter, or `None` when `--log-level` is not a
    /// level name.
    pub fn log_filter(&self) -> Option<LevelFilter> {
        LevelFilter::from_str(&self.log_level).ok()
    }
}
