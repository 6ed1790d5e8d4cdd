//! The record handed to every sink

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LogLevel;

/// Details captured from an error value by `Logger::log_exception`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    /// Type name of the logged error, read from `Debug` for trait objects
    pub type_name: String,
    /// `Display` output of the error itself
    pub message: String,
    /// `Display` output of each `source()` in order, outermost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
    /// Present only when backtrace capture is enabled (`RUST_BACKTRACE`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backtrace: Option<String>,
}

impl ExceptionInfo {
    /// Capture type name, message, cause chain and backtrace of `error`
    pub fn capture<E: Error + ?Sized>(error: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        let backtrace = Backtrace::capture();
        let backtrace = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        Self {
            type_name: type_name_of(error),
            message: error.to_string(),
            causes,
            backtrace,
        }
    }
}

/// Static type name, or the leading identifier of the `Debug` output when
/// `E` is a trait object
fn type_name_of<E: Error + ?Sized>(error: &E) -> String {
    let static_name = std::any::type_name::<E>();
    if !static_name.starts_with("dyn ") {
        return static_name.to_string();
    }

    let debug = format!("{:?}", error);
    let ident: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect();
    if ident.is_empty() {
        static_name.to_string()
    } else {
        ident
    }
}

/// A single emitted log line
///
/// Built by the facade at emission time and passed to each sink by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub tag: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<ExceptionInfo>,
}

impl LogRecord {
    /// Create a record stamped with the current time
    pub fn new(level: LogLevel, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            tag: tag.into(),
            message: message.into(),
            exception: None,
        }
    }

    /// Create an exception-level record from an error value
    pub fn exception<E: Error + ?Sized>(tag: impl Into<String>, error: &E) -> Self {
        let info = ExceptionInfo::capture(error);
        Self {
            timestamp: Utc::now(),
            level: LogLevel::Exception,
            tag: tag.into(),
            message: info.message.clone(),
            exception: Some(info),
        }
    }

    /// Serialize as a single JSON line (no trailing newline)
    pub fn to_json_line(&self) -> framewatch_utils::Result<String> {
        serde_json::to_string(self).map_err(|e| {
            framewatch_utils::FramewatchError::serialization(format!(
                "Failed to serialize log record: {}",
                e
            ))
        })
    }
}

impl std::fmt::Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.tag, self.message)?;
        if let Some(ref exception) = self.exception {
            write!(f, " ({})", exception.type_name)?;
            for cause in &exception.causes {
                write!(f, "; caused by: {}", cause)?;
            }
        }
        Ok(())
    }
}
