use crate::config::AppConfig;
use crate::converter::Converter;
use crate::encoder::{EncodeProfile, FfmpegEngine, TranscodeEngine};
use crate::error::AppError;
use crate::queue::{JobQueue, run_pool};
use crate::store::WorkStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Outcome of one batch run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub converted: usize,
    pub failed: usize,
}

/// Run one conversion batch with the ffmpeg engine.
pub fn run_batch(config: &AppConfig) -> Result<RunSummary, AppError> {
    run_batch_with_engine(config, FfmpegEngine)
}

/// Run one conversion batch against an arbitrary engine.
///
/// Startup errors (unreadable store, failed scan, bad config) are returned
/// before any worker starts; per-job failures only show up in the summary.
pub fn run_batch_with_engine<E>(config: &AppConfig, engine: E) -> Result<RunSummary, AppError>
where
    E: TranscodeEngine + 'static,
{
    config.validate()?;

    let store = Arc::new(WorkStore::open(
        &config.store_path,
        &config.media_root,
        &config.extensions,
    )?);

    let batch: Vec<_> = store
        .pending_files()
        .into_iter()
        .take(config.batch_size)
        .collect();
    if batch.is_empty() {
        info!("nothing to convert");
        return Ok(RunSummary::default());
    }

    let attempted = batch.len();
    let (pending, done_before) = store.counts();
    info!("converting {} of {} pending files", attempted, pending);

    let queue = Arc::new(JobQueue::new());
    for path in batch {
        queue.push(path);
    }

    let converter = Arc::new(Converter::new(engine, EncodeProfile::default()));
    run_pool(
        queue,
        Arc::clone(&store),
        converter,
        config.workers,
        Duration::from_secs(config.idle_timeout_secs),
    );

    let (_, done_after) = store.counts();
    let converted = done_after - done_before;
    let summary = RunSummary {
        attempted,
        converted,
        failed: attempted - converted,
    };
    info!(
        "batch finished: {} attempted, {} converted, {} failed",
        summary.attempted, summary.converted, summary.failed
    );
    Ok(summary)
}
