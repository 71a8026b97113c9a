use crate::encoder::{EncodeProfile, EncodeStatus, TranscodeEngine};
use crate::error::AppError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Converts one file and installs the result in place of the original.
///
/// Never touches the work store; recording the completion is the caller's
/// responsibility.
pub struct Converter<E: TranscodeEngine> {
    engine: E,
    profile: EncodeProfile,
}

impl<E: TranscodeEngine> Converter<E> {
    pub fn new(engine: E, profile: EncodeProfile) -> Self {
        Self { engine, profile }
    }

    /// Transcode `input` to a sibling work file, then replace the original
    /// with it. Returns the installed path, which carries the canonical
    /// container extension and may therefore differ from `input`.
    ///
    /// On any failure the original file is left as-is.
    pub fn convert(&self, input: &Path) -> Result<PathBuf, AppError> {
        let work_path = self.profile.work_path(input);
        let final_path = self.profile.final_path(input);

        match self.engine.encode(input, &work_path, &self.profile) {
            EncodeStatus::Success => {}
            EncodeStatus::Failed(message) => {
                if work_path.exists() {
                    let _ = fs::remove_file(&work_path);
                }
                return Err(AppError::EngineFailed {
                    path: input.to_path_buf(),
                    message,
                });
            }
        }

        // The original goes away only after the engine has fully written
        // the work file; a crash between these two steps is the one
        // acknowledged unsafe window.
        fs::remove_file(input).map_err(|source| AppError::FilesystemRace {
            path: input.to_path_buf(),
            source,
        })?;
        fs::rename(&work_path, &final_path).map_err(|source| AppError::FilesystemRace {
            path: input.to_path_buf(),
            source,
        })?;

        debug!("installed {}", final_path.display());
        Ok(final_path)
    }
}
