//! Command-line interface for campus_chaos.

use clap::Parser;
use std::path::PathBuf;

/// CampusChaos - dice race across a campus map, played on the console
#[derive(Parser, Debug)]
#[command(name = "campus_chaos")]
#[command(about = "Console dice race across a campus map", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Tracing filter, e.g. "chaos_board=debug" (RUST_LOG takes precedence)
    #[arg(long)]
    pub log_filter: Option<String>,
}
