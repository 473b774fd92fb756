//! Atomic file writes.
//!
//! Every write goes through a temporary sibling file:
//! 1. Write content to `.{filename}.tmp` in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename it over the destination
//!
//! `rename()` is atomic when source and destination share a filesystem, which
//! holds because the temporary file lives next to its destination. On Windows
//! `std::fs::rename` replaces an existing destination file as well.
//!
//! The temporary file is created exclusively: an existing `.{filename}.tmp`
//! is never truncated or replaced, and the write fails instead. On crash, a
//! temporary file may remain and must be removed by hand.

use crate::error::{Result, SetupError};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories as needed.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            SetupError::IoError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;
    replace(&temp_path, path)
}

/// Temporary sibling path used while writing `target`.
pub(crate) fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            SetupError::IoError(format!("invalid file path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Create `path` (which must not exist), write content and sync it to disk.
/// Removes the file on failure.
pub(crate) fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                SetupError::IoError(format!(
                    "temporary file '{}' already exists; move it aside and retry",
                    path.display()
                ))
            } else {
                SetupError::IoError(format!(
                    "failed to create temporary file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        SetupError::IoError(format!(
            "failed to write temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        SetupError::IoError(format!(
            "failed to sync temporary file '{}' to disk: {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Rename `source` over `target`. Removes `source` on failure.
pub(crate) fn replace(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        SetupError::IoError(format!(
            "failed to atomically replace '{}': {}",
            target.display(),
            e
        ))
    })?;

    // Persist the directory entry as well.
    if cfg!(unix)
        && let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("AGENTS.md");

        atomic_write(&file_path, b"# Agent Instructions").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "# Agent Instructions");
    }

    #[test]
    fn test_atomic_write_replace_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("APP.md");
        fs::write(&file_path, "original content").unwrap();

        atomic_write(&file_path, b"new content").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "new content");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("plans").join("ABC-1.md");

        atomic_write(&file_path, b"plan").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "plan");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        atomic_write(&file_path, b"content").unwrap();

        assert!(!temp_dir.path().join(".test.txt.tmp").exists());
    }

    #[test]
    fn test_atomic_write_empty_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("empty.txt");

        atomic_write(&file_path, b"").unwrap();

        assert!(fs::read(&file_path).unwrap().is_empty());
    }

    #[test]
    fn test_atomic_write_onto_directory_fails_and_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        let dir_path = temp_dir.path().join("WORKFLOW.md");
        fs::create_dir(&dir_path).unwrap();

        let err = atomic_write(&dir_path, b"content").unwrap_err();

        assert!(matches!(err, SetupError::IoError(_)));
        assert!(err.to_string().contains("WORKFLOW.md"));
        assert!(dir_path.is_dir());
        assert!(!temp_dir.path().join(".WORKFLOW.md.tmp").exists());
    }

    #[test]
    fn test_atomic_write_keeps_existing_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("APP.md");
        let temp_path = temp_dir.path().join(".APP.md.tmp");
        fs::write(&temp_path, "user scratch notes").unwrap();

        let err = atomic_write(&file_path, b"content").unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&temp_path).unwrap(), "user scratch notes");
        assert!(!file_path.exists());
    }

    #[test]
    fn test_temp_path_for() {
        let temp = temp_path_for(Path::new("/some/path/AGENTS.md")).unwrap();
        assert_eq!(temp, Path::new("/some/path/.AGENTS.md.tmp"));
    }
}
