//! Filesystem utilities.
//!
//! Atomic single-file writes and the staged, all-or-nothing commit used by
//! the installer.

pub mod atomic;
pub mod staging;

pub use staging::{CommitSummary, FileWrite, commit_all};
