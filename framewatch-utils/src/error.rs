//! Error types for framewatch
//!
//! Provides a unified error type used across all framewatch crates.

use std::path::PathBuf;

/// Main error type for framewatch operations
#[derive(Debug, thiserror::Error)]
pub enum FramewatchError {
    // === IO Errors ===

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Configuration Errors ===

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    // === Sink Errors ===

    #[error("Sink error: {0}")]
    Sink(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // === Internal Errors ===

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FramewatchError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a sink error
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error stems from setup rather than from runtime I/O
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::ConfigInvalid { .. }
                | Self::ConfigNotFound(_)
                | Self::InvalidLevel(_)
        )
    }
}

/// Result type alias using FramewatchError
pub type Result<T> = std::result::Result<T, FramewatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Display Tests ====================

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = FramewatchError::FileRead {
            path: PathBuf::from("/tmp/config.toml"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file /tmp/config.toml"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_error_display_file_write() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = FramewatchError::FileWrite {
            path: PathBuf::from("/var/log/framewatch.jsonl"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to write file"));
        assert!(msg.contains("framewatch.jsonl"));
    }

    #[test]
    fn test_error_display_config() {
        let err = FramewatchError::Config("window_secs must be positive".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: window_secs must be positive"
        );
    }

    #[test]
    fn test_error_display_config_invalid() {
        let err = FramewatchError::ConfigInvalid {
            path: PathBuf::from("/home/user/.config/framewatch/config.toml"),
            message: "expected a table".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid configuration"));
        assert!(msg.contains("config.toml"));
        assert!(msg.contains("expected a table"));
    }

    #[test]
    fn test_error_display_invalid_level() {
        let err = FramewatchError::InvalidLevel("loud".into());
        assert_eq!(err.to_string(), "Invalid log level: loud");
    }

    #[test]
    fn test_error_display_sink() {
        let err = FramewatchError::sink("disk full");
        assert_eq!(err.to_string(), "Sink error: disk full");
    }

    // ==================== Classification Tests ====================

    #[test]
    fn test_configuration_errors() {
        assert!(FramewatchError::config("x").is_configuration());
        assert!(FramewatchError::InvalidLevel("x".into()).is_configuration());
        assert!(FramewatchError::ConfigNotFound(PathBuf::from("/x")).is_configuration());
    }

    #[test]
    fn test_runtime_errors_are_not_configuration() {
        let runtime = [
            FramewatchError::sink("x"),
            FramewatchError::serialization("x"),
            FramewatchError::internal("x"),
            FramewatchError::FileWrite {
                path: PathBuf::from("/x"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "x"),
            },
        ];

        for err in runtime {
            assert!(!err.is_configuration(), "{:?} is not a setup error", err);
        }
    }
}
