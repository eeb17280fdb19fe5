use std::path::Path;
use thiserror::Error;

/// Main error type for tictoc
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimerError {
    /// IO errors, usually carrying the offending path
    #[error("IO error: {0}")]
    IoError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A strict stop was requested for an event that is not running
    #[error("Timer not started: {0}")]
    NotStarted(String),
}

impl TimerError {
    /// Create an IO error that names the file it happened on
    pub fn io_error(path: &Path, err: &std::io::Error) -> Self {
        TimerError::IoError(format!("{}: {}", path.display(), err))
    }

    /// Create a not-started error for a strict stop
    pub fn not_started(event: &str) -> Self {
        TimerError::NotStarted(format!(
            "event '{}' was stopped without a matching start",
            event
        ))
    }
}

impl From<std::io::Error> for TimerError {
    fn from(err: std::io::Error) -> Self {
        TimerError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for TimerError {
    fn from(err: serde_json::Error) -> Self {
        TimerError::SerializationError(err.to_string())
    }
}

/// Result type for tictoc operations
pub type TimerResult<T> = Result<T, TimerError>;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Io,
    SerializationFailed,
    ConfigInvalid,
    NotStarted,
}

impl TimerError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            TimerError::IoError(_) => ErrorCode::Io,
            TimerError::SerializationError(_) => ErrorCode::SerializationFailed,
            TimerError::ConfigurationError(_) => ErrorCode::ConfigInvalid,
            TimerError::NotStarted(_) => ErrorCode::NotStarted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
        let error = TimerError::io_error(Path::new("/missing/time"), &err);
        assert_eq!(error.to_string(), "IO error: /missing/time: no such directory");
    }

    #[test]
    fn test_not_started_message() {
        let error = TimerError::not_started("solve");
        assert_eq!(
            error.to_string(),
            "Timer not started: event 'solve' was stopped without a matching start"
        );
    }

    #[test]
    fn test_error_codes() {
        let error = TimerError::not_started("solve");
        assert_eq!(error.code(), ErrorCode::NotStarted);

        let config_error = TimerError::ConfigurationError("test".to_string());
        assert_eq!(config_error.code(), ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_serde_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: TimerError = err.into();
        assert_eq!(error.code(), ErrorCode::SerializationFailed);
    }
}
