use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;

/// Initialize logging based on the TRANSCODEQ_DEBUG environment variable.
///
/// With it set, debug logs go to a daily-rotated file under the data
/// directory; otherwise info logs go to stderr.
pub fn init_logging() -> Option<WorkerGuard> {
    if std::env::var("TRANSCODEQ_DEBUG").is_ok() {
        let log_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("transcodeq");
        let _ = std::fs::create_dir_all(&log_dir);

        let file_appender = tracing_appender::rolling::daily(&log_dir, "transcodeq.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::DEBUG.into()),
            )
            .init();

        tracing::info!("transcodeq logging initialized");
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::INFO.into()),
            )
            .init();
        None
    }
}
