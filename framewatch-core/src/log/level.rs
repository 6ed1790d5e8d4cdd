//! Severity levels for emitted records

use serde::{Deserialize, Serialize};

use framewatch_utils::{FramewatchError, Result};

/// Severity of a log record
///
/// Ordered from least to most severe; a logger configured with a minimum
/// level emits that level and everything above it.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Info,
    Warning,
    Error,
    /// An error value captured together with its type, cause chain and backtrace
    Exception,
}

impl LogLevel {
    /// All levels in ascending severity
    pub const ALL: [LogLevel; 4] = [Self::Info, Self::Warning, Self::Error, Self::Exception];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Exception => "exception",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = FramewatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "exception" => Ok(Self::Exception),
            _ => Err(FramewatchError::InvalidLevel(s.to_string())),
        }
    }
}
