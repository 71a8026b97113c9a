use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the conversion pipeline
#[derive(Debug, Error)]
pub enum AppError {
    /// The store file exists but is not the expected two-list document
    #[error("failed to load work store {}: {message}", path.display())]
    StoreLoad { path: PathBuf, message: String },

    #[error("failed to persist work store {}: {message}", path.display())]
    StorePersist { path: PathBuf, message: String },

    /// Media walk could not complete; no partial catalog is acted upon
    #[error("media scan failed: {0}")]
    Scan(#[from] walkdir::Error),

    /// The external engine reported failure for one file
    #[error("transcoding engine failed for {}: {message}", path.display())]
    EngineFailed { path: PathBuf, message: String },

    /// The file disappeared or became unwritable between scan and install
    #[error("file changed underneath conversion of {}: {source}", path.display())]
    FilesystemRace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Completion was requested for a path the store does not track as pending
    #[error("cannot mark {} done: not pending", path.display())]
    InvariantViolation { path: PathBuf },

    #[error("invalid configuration: {0}")]
    Config(String),
}
