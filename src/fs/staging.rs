//! All-or-nothing multi-file commit.
//!
//! A commit runs in three phases:
//! 1. **Stage**: every file is written and synced to its `.{name}.tmp` sibling.
//!    Nothing visible changes; a failure removes the staged files. Symlinked
//!    destinations are refused.
//! 2. **Directories**: missing directories are created and remembered.
//! 3. **Swap**: staged files are renamed over their destinations in order.
//!    Existing destination files are read into memory first.
//!
//! If any step in phases 2 or 3 fails, the commit is rolled back: swapped
//! files are restored from their backups (or removed if they were new),
//! remaining staged files are deleted, and directories created by the commit
//! are removed again. The returned error names the failing path.

use super::atomic::{atomic_write, replace, temp_path_for, write_and_sync};
use crate::error::{Result, SetupError};
use std::fs;
use std::path::{Path, PathBuf};

/// A file to be written by a commit.
#[derive(Debug, Clone)]
pub struct FileWrite {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug)]
struct Staged {
    destination: PathBuf,
    temp: PathBuf,
}

#[derive(Debug)]
struct Swapped {
    destination: PathBuf,
    backup: Option<Vec<u8>>,
}

/// Paths actually changed by a successful commit.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub created_dirs: Vec<PathBuf>,
    pub written: Vec<PathBuf>,
}

/// Create `dirs` (when missing) and write `files`, all or nothing.
pub fn commit_all(dirs: &[PathBuf], files: &[FileWrite]) -> Result<CommitSummary> {
    let staged = stage(files)?;

    let mut created_dirs = Vec::new();
    for dir in dirs {
        if dir.is_dir() {
            continue;
        }
        if let Err(e) = fs::create_dir_all(dir) {
            let err = SetupError::IoError(format!(
                "failed to create directory '{}': {}",
                dir.display(),
                e
            ));
            return Err(roll_back(err, Vec::new(), &staged, &created_dirs));
        }
        tracing::debug!(path = %dir.display(), "created directory");
        created_dirs.push(dir.clone());
    }

    let mut swapped = Vec::with_capacity(staged.len());
    for (index, item) in staged.iter().enumerate() {
        let backup = match read_backup(&item.destination) {
            Ok(backup) => backup,
            Err(err) => {
                return Err(roll_back(err, swapped, &staged[index..], &created_dirs));
            }
        };

        if let Err(err) = replace(&item.temp, &item.destination) {
            // `replace` already removed this item's temp file.
            return Err(roll_back(err, swapped, &staged[index + 1..], &created_dirs));
        }

        tracing::debug!(path = %item.destination.display(), "swapped into place");
        swapped.push(Swapped {
            destination: item.destination.clone(),
            backup,
        });
    }

    Ok(CommitSummary {
        created_dirs,
        written: swapped.into_iter().map(|s| s.destination).collect(),
    })
}

fn stage(files: &[FileWrite]) -> Result<Vec<Staged>> {
    let mut staged: Vec<Staged> = Vec::with_capacity(files.len());
    for file in files {
        let result = refuse_symlink(&file.path)
            .and_then(|()| temp_path_for(&file.path))
            .and_then(|temp| write_and_sync(&temp, file.content.as_bytes()).map(|()| temp));
        match result {
            Ok(temp) => staged.push(Staged {
                destination: file.path.clone(),
                temp,
            }),
            Err(err) => {
                remove_staged(&staged);
                return Err(err);
            }
        }
    }
    Ok(staged)
}

fn refuse_symlink(destination: &Path) -> Result<()> {
    match fs::symlink_metadata(destination) {
        Ok(meta) if meta.file_type().is_symlink() => Err(SetupError::IoError(format!(
            "refusing to overwrite symlink '{}'",
            destination.display()
        ))),
        _ => Ok(()),
    }
}

fn read_backup(destination: &Path) -> Result<Option<Vec<u8>>> {
    if !destination.is_file() {
        return Ok(None);
    }
    fs::read(destination).map(Some).map_err(|e| {
        SetupError::IoError(format!(
            "failed to back up '{}' before overwriting: {}",
            destination.display(),
            e
        ))
    })
}

fn remove_staged(staged: &[Staged]) {
    for item in staged {
        let _ = fs::remove_file(&item.temp);
    }
}

/// Undo a partial commit and wrap `cause` with what happened.
fn roll_back(
    cause: SetupError,
    swapped: Vec<Swapped>,
    pending: &[Staged],
    created_dirs: &[PathBuf],
) -> SetupError {
    remove_staged(pending);

    let restored = swapped.len();
    let mut failures = Vec::new();
    for item in swapped.into_iter().rev() {
        let result = match &item.backup {
            Some(bytes) => atomic_write(&item.destination, bytes),
            None => fs::remove_file(&item.destination).map_err(|e| {
                SetupError::IoError(format!("failed to remove '{}': {}", item.destination.display(), e))
            }),
        };
        if let Err(e) = result {
            tracing::warn!(path = %item.destination.display(), error = %e, "rollback step failed");
            failures.push(e.to_string());
        }
    }

    for dir in created_dirs.iter().rev() {
        if let Err(e) = fs::remove_dir(dir) {
            tracing::warn!(path = %dir.display(), error = %e, "failed to remove created directory");
            failures.push(format!("failed to remove '{}': {}", dir.display(), e));
        }
    }

    let message = match cause {
        SetupError::IoError(msg) => msg,
        other => other.to_string(),
    };

    if failures.is_empty() {
        tracing::info!(restored, "rolled back partial install");
        SetupError::IoError(format!(
            "{} (rolled back {} file(s); target left unchanged)",
            message, restored
        ))
    } else {
        SetupError::IoError(format!(
            "{} (rollback incomplete: {})",
            message,
            failures.join("; ")
        ))
    }
}
