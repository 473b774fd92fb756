//! Error types for the agents-setup CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for installer operations.
///
/// Each variant maps to a distinct exit code. Existing destination files are
/// not errors: they are reported as per-file skips.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Invalid or missing option, unknown variant, or unusable config file.
    #[error("{0}")]
    ConfigError(String),

    /// The mandatory file would be written with unresolved placeholders.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Underlying filesystem failure.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl SetupError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SetupError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            SetupError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            SetupError::IoError(_) => exit_codes::IO_FAILURE,
        }
    }
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_has_correct_exit_code() {
        let err = SetupError::ConfigError("unknown language 'rust'".to_string());
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
    }

    #[test]
    fn validation_error_has_correct_exit_code() {
        let err = SetupError::ValidationError("AGENTS.md".to_string());
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    }

    #[test]
    fn io_error_has_correct_exit_code() {
        let err = SetupError::IoError("disk full".to_string());
        assert_eq!(err.exit_code(), exit_codes::IO_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = SetupError::ConfigError("--target is required".to_string());
        assert_eq!(err.to_string(), "--target is required");

        let err = SetupError::ValidationError("missing {{APP_NAME}}".to_string());
        assert_eq!(err.to_string(), "Validation failed: missing {{APP_NAME}}");

        let err = SetupError::IoError("failed to write 'AGENTS.md'".to_string());
        assert_eq!(err.to_string(), "I/O error: failed to write 'AGENTS.md'");
    }
}
