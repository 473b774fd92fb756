//! Git command runner.
//!
//! Inference reads the current branch name to pick up ticket identifiers.
//! Git is optional: a missing binary or a target outside any repository is
//! reported as a `GitError` that callers are free to ignore.

use std::io;
use std::path::Path;
use std::process::{Command, Output};
use thiserror::Error;

/// Failure running a git command.
#[derive(Error, Debug)]
pub enum GitError {
    /// The git binary could not be started.
    #[error("failed to execute git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// Git ran and exited non-zero.
    #[error("git {command} failed (exit code {code}): {message}")]
    Failed {
        command: String,
        code: i32,
        message: String,
    },
}

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(GitError)` - If git could not be started or exited non-zero
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput, GitError> {
    let cwd = cwd.as_ref();
    let command = args.first().copied().unwrap_or("").to_string();

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|source| GitError::Spawn {
            command: command.clone(),
            source,
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let message = if git_output.stderr.is_empty() {
            git_output.stdout
        } else {
            git_output.stderr
        };
        Err(GitError::Failed {
            command,
            code: output.status.code().unwrap_or(-1),
            message,
        })
    }
}

/// Name of the branch checked out in `cwd`.
///
/// Uses `symbolic-ref` so unborn branches (no commits yet) still resolve.
/// Returns `Ok(None)` on a detached HEAD.
pub fn current_branch<P: AsRef<Path>>(cwd: P) -> Result<Option<String>, GitError> {
    match run_git(cwd, &["symbolic-ref", "--quiet", "--short", "HEAD"]) {
        Ok(output) if output.is_empty() => Ok(None),
        Ok(output) => Ok(Some(output.stdout)),
        // `symbolic-ref --quiet` exits 1 without output when HEAD is detached.
        Err(GitError::Failed { code: 1, message, .. }) if message.is_empty() => Ok(None),
        Err(e) => Err(e),
    }
}
