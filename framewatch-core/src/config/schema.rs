//! Configuration schema structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use framewatch_utils::{default_record_file, FramewatchError, Result};

use crate::log::{
    ConsoleSink, FileSink, FileSinkOptions, LogLevel, Logger, LoggerConfig, MemorySink,
};
use crate::sampler::SamplerConfig;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub sampler: SamplerConfig,
}

/// Logger facade settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Master switch for record emission
    pub enabled: bool,
    /// Lowest level that is emitted
    pub min_level: LogLevel,
    /// Forward records to the tracing subscriber
    pub console: bool,
    /// Keep this many recent records in memory (0 disables)
    pub memory_capacity: usize,
    /// JSON-lines file output
    pub file: FileLoggingConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_level: LogLevel::Info,
            console: true,
            memory_capacity: 0,
            file: FileLoggingConfig::default(),
        }
    }
}

/// File sink settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub enabled: bool,
    /// Defaults to `$XDG_STATE_HOME/framewatch/log/framewatch.jsonl`
    pub path: Option<PathBuf>,
    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,
    /// Maximum number of rotated log files to keep
    pub max_rotated_files: u32,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: None,
            max_file_size_mb: 10,
            max_rotated_files: 5,
        }
    }
}

const MIB: u64 = 1024 * 1024;

impl FileLoggingConfig {
    /// Rotation threshold in bytes
    pub fn max_file_size_bytes(&self) -> Result<u64> {
        self.max_file_size_mb.checked_mul(MIB).ok_or_else(|| {
            FramewatchError::config(format!(
                "logging.file.max_file_size_mb must be at most {}",
                u64::MAX / MIB
            ))
        })
    }

    /// Convert to sink options, resolving the default path
    pub fn to_options(&self) -> Result<FileSinkOptions> {
        Ok(FileSinkOptions {
            path: self.path.clone().unwrap_or_else(default_record_file),
            max_file_size: self.max_file_size_bytes()?,
            max_rotated_files: self.max_rotated_files,
        })
    }
}

/// A logger assembled from [`LoggingConfig`]
#[derive(Debug, Clone)]
pub struct ConfiguredLogger {
    pub logger: Logger,
    /// Handle to the in-memory sink when `memory_capacity > 0`
    pub memory: Option<Arc<MemorySink>>,
}

impl LoggingConfig {
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            enabled: self.enabled,
            min_level: self.min_level,
        }
    }

    /// Build the logger and its sinks
    ///
    /// A disabled logger gets the null sink. An enabled logger with every
    /// sink switched off is a configuration error.
    pub fn build(&self) -> Result<ConfiguredLogger> {
        if !self.enabled {
            return Ok(ConfiguredLogger {
                logger: Logger::disabled(),
                memory: None,
            });
        }

        let mut builder = Logger::builder().config(self.logger_config());

        if self.console {
            builder = builder.sink(Arc::new(ConsoleSink));
        }

        if self.file.enabled {
            let sink = FileSink::open(self.file.to_options()?)?;
            tracing::info!(path = %sink.path().display(), "File log sink opened");
            builder = builder.sink(Arc::new(sink));
        }

        let memory =
            (self.memory_capacity > 0).then(|| Arc::new(MemorySink::new(self.memory_capacity)));
        if let Some(ref memory) = memory {
            builder = builder.sink(memory.clone());
        }

        Ok(ConfiguredLogger {
            logger: builder.build()?,
            memory,
        })
    }
}
