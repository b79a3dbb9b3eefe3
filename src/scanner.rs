use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

use crate::entry::FileEntry;
use crate::ordering::sort_entries;

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// List the immediate contents of `target`.
///
/// Subdirectories are returned with empty `children` (they are not descended
/// into). Hidden entries are skipped, which also keeps the rename log out of
/// the listing.
pub fn scan_directory(target: &Path) -> Result<Vec<FileEntry>, ScannerError> {
    debug!(path = ?target, "Scanning directory");

    if !target.exists() {
        return Err(ScannerError::PathNotFound(target.to_path_buf()));
    }

    if !target.is_dir() {
        return Err(ScannerError::NotADirectory(target.to_path_buf()));
    }

    let mut entries = Vec::new();

    let read_dir = fs::read_dir(target).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(target.to_path_buf())
        } else {
            ScannerError::IoError(e)
        }
    })?;

    for entry in read_dir {
        let entry = entry?;
        let path = entry.path();

        trace!(entry = ?path, "Examining entry");

        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().to_string(),
            None => continue,
        };

        if name.starts_with('.') {
            trace!(name = %name, "Skipping hidden entry");
            continue;
        }

        let children = if path.is_dir() { Some(Vec::new()) } else { None };

        entries.push(FileEntry {
            path,
            name,
            children,
        });
    }

    sort_entries(&mut entries);

    debug!(count = entries.len(), "Scan complete");

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempdir().unwrap();
        let result = scan_directory(dir.path()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_files_and_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("extras")).unwrap();
        fs::write(dir.path().join("episode.mkv"), "").unwrap();

        let result = scan_directory(dir.path()).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "episode.mkv");
        assert!(!result[0].is_dir());
        assert_eq!(result[0].path, dir.path().join("episode.mkv"));
        assert_eq!(result[1].name, "extras");
        assert!(result[1].is_dir());
    }

    #[test]
    fn test_ignores_hidden_entries() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".subrename-log.json"), "[]").unwrap();
        fs::write(dir.path().join("visible.srt"), "").unwrap();

        let result = scan_directory(dir.path()).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "visible.srt");
    }

    #[test]
    fn test_path_not_found() {
        let result = scan_directory(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(ScannerError::PathNotFound(_))));
    }

    #[test]
    fn test_not_a_directory() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("file.txt");
        fs::write(&file_path, "content").unwrap();

        let result = scan_directory(&file_path);
        assert!(matches!(result, Err(ScannerError::NotADirectory(_))));
    }

    #[test]
    fn test_natural_sorting() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Show 10.srt"), "").unwrap();
        fs::write(dir.path().join("show 2.srt"), "").unwrap();
        fs::write(dir.path().join("Show 1.srt"), "").unwrap();

        let result = scan_directory(dir.path()).unwrap();

        assert_eq!(result[0].name, "Show 1.srt");
        assert_eq!(result[1].name, "show 2.srt");
        assert_eq!(result[2].name, "Show 10.srt");
    }
}
