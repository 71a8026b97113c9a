use crate::error::AppError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collect the media files under `root` whose extension is on
/// the allow-list. Any traversal error aborts the whole scan.
pub fn scan_media_files(
    root: &Path,
    extensions: &[String],
) -> Result<BTreeSet<PathBuf>, AppError> {
    let mut files = BTreeSet::new();

    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if has_allowed_extension(entry.path(), extensions) {
            files.insert(entry.path().to_path_buf());
        }
    }

    Ok(files)
}

/// Extension match is case-sensitive; allow-list entries carry the leading dot.
fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => extensions
            .iter()
            .any(|allowed| allowed.strip_prefix('.').unwrap_or(allowed) == ext),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn allow_list() -> Vec<String> {
        vec![".mp4".to_string(), ".avi".to_string(), ".mkv".to_string()]
    }

    #[test]
    fn finds_media_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("shows/season1")).unwrap();
        fs::write(dir.path().join("movie.mp4"), b"").unwrap();
        fs::write(dir.path().join("shows/episode.avi"), b"").unwrap();
        fs::write(dir.path().join("shows/season1/finale.mkv"), b"").unwrap();
        fs::write(dir.path().join("shows/notes.txt"), b"").unwrap();

        let files = scan_media_files(dir.path(), &allow_list()).unwrap();

        assert_eq!(files.len(), 3);
        assert!(files.contains(&dir.path().join("movie.mp4")));
        assert!(files.contains(&dir.path().join("shows/episode.avi")));
        assert!(files.contains(&dir.path().join("shows/season1/finale.mkv")));
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("upper.MP4"), b"").unwrap();
        fs::write(dir.path().join("lower.mp4"), b"").unwrap();

        let files = scan_media_files(dir.path(), &allow_list()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files.contains(&dir.path().join("lower.mp4")));
    }

    #[test]
    fn skips_files_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README"), b"").unwrap();

        let files = scan_media_files(dir.path(), &allow_list()).unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn missing_root_fails_the_scan() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");

        let result = scan_media_files(&missing, &allow_list());

        assert!(matches!(result, Err(AppError::Scan(_))));
    }
}
