use crate::error::AppError;
use crate::scanner::scan_media_files;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// On-disk record of conversion progress.
///
/// The two sorted list fields are the compatibility contract for the store
/// file; `BTreeSet` keeps the serialized form deterministic and diff-stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkRecord {
    pub done: BTreeSet<PathBuf>,
    pub pending: BTreeSet<PathBuf>,
}

/// Durable work tracker. Sole owner and sole mutator of the backing file;
/// every membership change is flushed to disk before the call returns.
pub struct WorkStore {
    inner: Mutex<StoreInner>,
}

struct StoreInner {
    path: PathBuf,
    record: WorkRecord,
}

impl WorkStore {
    /// Load the record from `store_path` (missing file means an empty
    /// record), reconcile it against a fresh scan of `media_root`, and
    /// persist the result so the file reflects reality even if no
    /// conversions run this session.
    pub fn open(
        store_path: &Path,
        media_root: &Path,
        extensions: &[String],
    ) -> Result<Self, AppError> {
        let mut record = load_record(store_path)?;
        let catalog = scan_media_files(media_root, extensions)?;

        // Purge entries for files no longer on disk, then register
        // newly discovered files as pending.
        record.pending.retain(|path| catalog.contains(path));
        record.done.retain(|path| catalog.contains(path));
        for file in catalog {
            if !record.pending.contains(&file) && !record.done.contains(&file) {
                debug!("discovered {}", file.display());
                record.pending.insert(file);
            }
        }

        persist_record(store_path, &record)?;
        info!(
            "work store ready: {} pending, {} done",
            record.pending.len(),
            record.done.len()
        );

        Ok(Self {
            inner: Mutex::new(StoreInner {
                path: store_path.to_path_buf(),
                record,
            }),
        })
    }

    /// Sorted snapshot of the pending set.
    pub fn pending_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.lock().expect("work store mutex poisoned");
        inner.record.pending.iter().cloned().collect()
    }

    /// (pending, done) sizes.
    pub fn counts(&self) -> (usize, usize) {
        let inner = self.inner.lock().expect("work store mutex poisoned");
        (inner.record.pending.len(), inner.record.done.len())
    }

    /// Record a completed conversion: `source` leaves the pending set and
    /// `converted` (the installed path, which may carry a different
    /// extension) enters the done set. The store file is rewritten before
    /// this returns.
    ///
    /// Fails with `InvariantViolation`, leaving the store untouched, when
    /// `source` is not pending.
    pub fn mark_done(&self, source: &Path, converted: &Path) -> Result<(), AppError> {
        let mut inner = self.inner.lock().expect("work store mutex poisoned");

        if !inner.record.pending.remove(source) {
            return Err(AppError::InvariantViolation {
                path: source.to_path_buf(),
            });
        }
        inner.record.done.insert(converted.to_path_buf());

        persist_record(&inner.path, &inner.record)
    }
}

fn load_record(path: &Path) -> Result<WorkRecord, AppError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(WorkRecord::default());
        }
        Err(e) => {
            return Err(AppError::StoreLoad {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
        }
    };

    serde_json::from_str(&raw).map_err(|e| AppError::StoreLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write the record next to its destination and rename it into place, so a
/// reader never observes a half-written document.
fn persist_record(path: &Path, record: &WorkRecord) -> Result<(), AppError> {
    let persist_err = |message: String| AppError::StorePersist {
        path: path.to_path_buf(),
        message,
    };

    let json = serde_json::to_string_pretty(record).map_err(|e| persist_err(e.to_string()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| persist_err(e.to_string()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| persist_err(e.to_string()))?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| persist_err(e.to_string()))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| persist_err(e.to_string()))?;
    tmp.persist(path).map_err(|e| persist_err(e.to_string()))?;

    Ok(())
}
