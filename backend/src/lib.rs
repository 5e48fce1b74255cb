mod app;
mod cli;
mod commands;
mod config;
mod output;
mod resolve;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cli::Cli;
use crate::config::AppConfig;

pub async fn run() -> anyhow::Result<()> {
  let cli = Cli::parse();

  // --- Configuration ---
  let backend = livelink_config::config_backend()?;
  let config = AppConfig::load(backend)?;

  // --- Logging ---
  // RUST_LOG wins over `[log] filter`. Logs go to stderr, results to stdout.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter)))
    .with_writer(std::io::stderr)
    .init();

  info!(config = %backend.paths().config_file().display(), "starting livelink");

  // --- Dependency wiring ---
  let app = App::open(config, backend.paths(), cli.database)?;

  commands::dispatch(&app, cli.command, cli.json).await
}
