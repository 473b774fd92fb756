//! Exit code constants for the agents-setup CLI.
//!
//! - 0: Success (including dry runs, inference, and per-file skips)
//! - 1: Configuration error (bad options, unknown variant, bad config file)
//! - 2: Validation failure (mandatory file would keep placeholders)
//! - 3: I/O failure (write, stage, or rollback error)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Configuration error: invalid or missing options, unreadable config file.
pub const CONFIG_ERROR: i32 = 1;

/// Validation failure: unresolved placeholders in the mandatory file.
pub const VALIDATION_FAILURE: i32 = 2;

/// I/O failure: the target could not be written.
pub const IO_FAILURE: i32 = 3;
