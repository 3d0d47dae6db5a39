//! CampusChaos - console entry point

#![warn(missing_docs)]

use anyhow::{Context, Result};
use campus_chaos::{AppConfig, Cli, Console, MapLoader, run};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let directive =
        config.log_filter_directive(std::env::var("RUST_LOG").ok(), cli.log_filter.as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&directive))
        .with_writer(std::io::stderr)
        .init();
    debug!(%directive, "Tracing initialized");

    info!(map_dir = ?config.map_dir(), "Starting CampusChaos console");
    let mut console = Console::new(MapLoader::new(config.map_dir().clone()));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    run(
        &mut console,
        stdin.lock(),
        &mut stdout,
        &mut stderr,
        *config.greeting(),
    )
    .context("Console I/O failed")?;

    Ok(())
}
