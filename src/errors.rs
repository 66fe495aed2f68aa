//! Error types for shiftcert
//!
//! Each error type has a corresponding error code for programmatic handling.
//! The workflow engine itself never returns these; they come from the
//! persistence collaborators, configuration loading and the CLI.

use thiserror::Error;

/// Result type alias for shiftcert operations
pub type Result<T> = std::result::Result<T, ShiftcertError>;

/// Main error type for all shiftcert operations
#[derive(Debug, Error)]
pub enum ShiftcertError {
    /// No trainee with the given id in the record set
    #[error("Trainee not found: {0}")]
    TraineeNotFound(String),

    /// Data directory not found
    #[error("Data directory not found: {0}")]
    DataDirNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A workflow transition was refused because a precondition did not hold
    #[error("Transition rejected: {0}")]
    TransitionRejected(String),

    /// Bad command-line argument (unknown shift key, malformed timestamp, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl ShiftcertError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            ShiftcertError::TraineeNotFound(_) => "TRAINEE_NOT_FOUND",
            ShiftcertError::DataDirNotFound(_) => "DATA_DIR_NOT_FOUND",
            ShiftcertError::InvalidJson(_) => "INVALID_JSON",
            ShiftcertError::FileNotFound(_) => "FILE_NOT_FOUND",
            ShiftcertError::ConfigError(_) => "CONFIG_ERROR",
            ShiftcertError::TransitionRejected(_) => "TRANSITION_REJECTED",
            ShiftcertError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ShiftcertError::Io(_) => "IO_ERROR",
            ShiftcertError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        ShiftcertError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &ShiftcertError) -> i32 {
    match error {
        ShiftcertError::TransitionRejected(_) => 3,
        ShiftcertError::InvalidArgument(_) => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ShiftcertError::TraineeNotFound("x".into()).code(), "TRAINEE_NOT_FOUND");
        assert_eq!(ShiftcertError::DataDirNotFound("x".into()).code(), "DATA_DIR_NOT_FOUND");
        assert_eq!(ShiftcertError::InvalidJson("x".into()).code(), "INVALID_JSON");
        assert_eq!(ShiftcertError::FileNotFound("x".into()).code(), "FILE_NOT_FOUND");
        assert_eq!(ShiftcertError::ConfigError("x".into()).code(), "CONFIG_ERROR");
        assert_eq!(ShiftcertError::TransitionRejected("x".into()).code(), "TRANSITION_REJECTED");
        assert_eq!(ShiftcertError::InvalidArgument("x".into()).code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(to_exit_code(&ShiftcertError::TransitionRejected("x".into())), 3);
        assert_eq!(to_exit_code(&ShiftcertError::InvalidArgument("x".into())), 2);
        assert_eq!(to_exit_code(&ShiftcertError::TraineeNotFound("x".into())), 1);
    }

    #[test]
    fn test_wrap_error() {
        let wrapped = ShiftcertError::wrap("disk full", "persisting trainee");
        assert_eq!(wrapped.code(), "WRAPPED_ERROR");
        assert!(wrapped.to_string().contains("persisting trainee"));
        assert!(wrapped.to_string().contains("disk full"));
    }
}
