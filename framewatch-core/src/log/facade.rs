//! The logger facade
//!
//! [`Logger`] is a cheap, clonable handle that is injected into every
//! consumer. It owns the configuration and the sink list; callers only see
//! leveled and predicate-gated emission.

use std::error::Error;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use framewatch_utils::{FramewatchError, Result};

use super::{LogLevel, LogRecord, LogSink, NullSink};

/// Emission switch and severity floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub enabled: bool,
    pub min_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_level: LogLevel::Info,
        }
    }
}

impl LoggerConfig {
    /// Whether a record at `level` passes this configuration
    pub fn allows(&self, level: LogLevel) -> bool {
        self.enabled && level >= self.min_level
    }
}

struct Inner {
    config: ArcSwap<LoggerConfig>,
    sinks: RwLock<Vec<Arc<dyn LogSink>>>,
    sink_failures: AtomicU64,
}

/// Handle to a configured logger
///
/// Cloning shares the same configuration and sinks. Emission never fails:
/// sink errors are swallowed and counted in [`Logger::sink_failures`].
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sinks: Vec<&'static str> = self.inner.sinks.read().iter().map(|s| s.name()).collect();
        f.debug_struct("Logger")
            .field("config", &self.config())
            .field("sinks", &sinks)
            .field("sink_failures", &self.sink_failures())
            .finish()
    }
}

/// Builder for [`Logger`]
#[derive(Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    sinks: Vec<Arc<dyn LogSink>>,
}

impl LoggerBuilder {
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Build the logger
    ///
    /// A logger without any sink is a setup mistake and is rejected here
    /// rather than silently dropping every record later. Use
    /// [`Logger::disabled`] for an intentional no-op logger.
    pub fn build(self) -> Result<Logger> {
        if self.sinks.is_empty() {
            return Err(FramewatchError::config("logger requires at least one sink"));
        }
        Ok(Logger::from_parts(self.config, self.sinks))
    }
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Null-object logger: emits nothing and never evaluates producers
    pub fn disabled() -> Self {
        Self::from_parts(
            LoggerConfig {
                enabled: false,
                min_level: LogLevel::Info,
            },
            vec![Arc::new(NullSink)],
        )
    }

    fn from_parts(config: LoggerConfig, sinks: Vec<Arc<dyn LogSink>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                config: ArcSwap::from_pointee(config),
                sinks: RwLock::new(sinks),
                sink_failures: AtomicU64::new(0),
            }),
        }
    }

    // ==================== Configuration ====================

    /// Current configuration
    pub fn config(&self) -> LoggerConfig {
        **self.inner.config.load()
    }

    /// Replace the configuration
    pub fn configure(&self, config: LoggerConfig) {
        self.inner.config.store(Arc::new(config));
        tracing::debug!(
            enabled = config.enabled,
            min_level = %config.min_level,
            "Logger reconfigured"
        );
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.configure(LoggerConfig {
            enabled,
            ..self.config()
        });
    }

    pub fn set_min_level(&self, min_level: LogLevel) {
        self.configure(LoggerConfig {
            min_level,
            ..self.config()
        });
    }

    /// Attach another sink; it receives every subsequent record
    pub fn add_sink(&self, sink: Arc<dyn LogSink>) {
        self.inner.sinks.write().push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.inner.sinks.read().len()
    }

    /// Number of sink writes or flushes that failed and were discarded
    pub fn sink_failures(&self) -> u64 {
        self.inner.sink_failures.load(Ordering::Relaxed)
    }

    /// Whether a record at `level` would currently be emitted
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.inner.config.load().allows(level)
    }

    /// Flush every sink, counting failures
    pub fn flush(&self) {
        for sink in self.sinks_snapshot() {
            if let Err(e) = sink.flush() {
                self.record_failure(sink.name(), &e);
            }
        }
    }

    // ==================== Emission ====================

    /// Info-level emission
    pub fn log(&self, tag: &str, message: impl Into<String>) {
        self.emit_with(LogLevel::Info, tag, || message.into());
    }

    pub fn log_warning(&self, tag: &str, message: impl Into<String>) {
        self.emit_with(LogLevel::Warning, tag, || message.into());
    }

    pub fn log_error(&self, tag: &str, message: impl Into<String>) {
        self.emit_with(LogLevel::Error, tag, || message.into());
    }

    /// Emit an exception record with the error's type, message, cause chain
    /// and (if enabled) a backtrace
    pub fn log_exception<E: Error + ?Sized>(&self, tag: &str, error: &E) {
        if !self.is_enabled(LogLevel::Exception) {
            return;
        }
        self.dispatch(&LogRecord::exception(tag, error));
    }

    /// Info-level emission when `condition` holds
    ///
    /// `message` runs only if the record is actually emitted.
    pub fn log_if<F>(&self, condition: bool, tag: &str, message: F)
    where
        F: FnOnce() -> String,
    {
        if condition {
            self.emit_with(LogLevel::Info, tag, message);
        }
    }

    pub fn log_warning_if<F>(&self, condition: bool, tag: &str, message: F)
    where
        F: FnOnce() -> String,
    {
        if condition {
            self.emit_with(LogLevel::Warning, tag, message);
        }
    }

    pub fn log_error_if<F>(&self, condition: bool, tag: &str, message: F)
    where
        F: FnOnce() -> String,
    {
        if condition {
            self.emit_with(LogLevel::Error, tag, message);
        }
    }

    /// Emit at `level`, building the message only when it passes the filter
    pub fn emit_with<F>(&self, level: LogLevel, tag: &str, message: F)
    where
        F: FnOnce() -> String,
    {
        if !self.is_enabled(level) {
            return;
        }
        self.dispatch(&LogRecord::new(level, tag, message()));
    }

    /// Sinks are called outside the lock so one may log or add sinks itself
    fn sinks_snapshot(&self) -> Vec<Arc<dyn LogSink>> {
        self.inner.sinks.read().clone()
    }

    fn dispatch(&self, record: &LogRecord) {
        for sink in self.sinks_snapshot() {
            if let Err(e) = sink.write(record) {
                self.record_failure(sink.name(), &e);
            }
        }
    }

    fn record_failure(&self, sink: &'static str, error: &FramewatchError) {
        let failures = self.inner.sink_failures.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(sink, failures, error = %error, "Discarded log sink failure");
    }
}
