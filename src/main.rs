mod app;
mod config;
mod converter;
mod encoder;
mod error;
mod queue;
mod scanner;
mod store;
mod utils;

use anyhow::Context;
use clap::Parser;
use config::AppConfig;
use std::path::PathBuf;

/// Batch-convert media files under a directory tree, resuming where the
/// previous run left off.
#[derive(Debug, Parser)]
#[command(name = "transcodeq", version, about)]
struct Cli {
    /// Directory scanned for media files
    #[arg(long)]
    media_root: Option<PathBuf>,

    /// Path of the persisted work store
    #[arg(long)]
    store: Option<PathBuf>,

    /// Number of concurrent conversion workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Maximum files converted in this run
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = utils::init_logging();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::load(),
    };
    if let Some(media_root) = cli.media_root {
        config.media_root = media_root;
    }
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(batch_size) = cli.batch_size {
        config.batch_size = batch_size;
    }

    let summary = app::run_batch(&config).context("conversion run failed")?;
    println!(
        "{} attempted, {} converted, {} failed",
        summary.attempted, summary.converted, summary.failed
    );

    Ok(())
}
