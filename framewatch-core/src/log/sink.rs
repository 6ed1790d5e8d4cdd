//! Record destinations
//!
//! The facade depends only on [`LogSink`]; concrete sinks live here and in
//! [`super::file_sink`].

use std::collections::VecDeque;

use parking_lot::Mutex;

use framewatch_utils::Result;

use super::{LogLevel, LogRecord};

/// `tracing` target used by [`ConsoleSink`]
pub const CONSOLE_TARGET: &str = "framewatch";

/// A destination for emitted records
///
/// Implementations may fail; the facade catches and counts failures so a
/// broken sink never reaches the caller.
pub trait LogSink: Send + Sync {
    /// Write one record
    fn write(&self, record: &LogRecord) -> Result<()>;

    /// Flush any internal buffering
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Short name used in diagnostics
    fn name(&self) -> &'static str;
}

/// Forwards records into the process `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, record: &LogRecord) -> Result<()> {
        let tag = record.tag.as_str();
        let message = record.message.as_str();

        match record.level {
            LogLevel::Info => {
                tracing::info!(target: CONSOLE_TARGET, tag, "{}", message);
            }
            LogLevel::Warning => {
                tracing::warn!(target: CONSOLE_TARGET, tag, "{}", message);
            }
            LogLevel::Error => {
                tracing::error!(target: CONSOLE_TARGET, tag, "{}", message);
            }
            LogLevel::Exception => {
                let error_type = record
                    .exception
                    .as_ref()
                    .map(|e| e.type_name.as_str())
                    .unwrap_or("unknown");
                let causes = record
                    .exception
                    .as_ref()
                    .map(|e| e.causes.join("; "))
                    .unwrap_or_default();
                tracing::error!(
                    target: CONSOLE_TARGET,
                    tag,
                    error_type,
                    causes = %causes,
                    "{}",
                    message
                );
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

/// Discards every record
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn write(&self, _record: &LogRecord) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}

/// Keeps the most recent records in memory
///
/// Once `capacity` records are held, the oldest one is dropped for each new
/// record. Useful for on-screen debug overlays and for assertions in tests.
#[derive(Debug)]
pub struct MemorySink {
    capacity: usize,
    records: Mutex<VecDeque<LogRecord>>,
}

impl MemorySink {
    /// Default number of retained records
    pub const DEFAULT_CAPACITY: usize = 1024;

    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: Mutex::new(VecDeque::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the retained records, oldest first
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().iter().cloned().collect()
    }

    /// Retained records at exactly `level`
    pub fn records_at(&self, level: LogLevel) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl LogSink for MemorySink {
    fn write(&self, record: &LogRecord) -> Result<()> {
        let mut records = self.records.lock();
        if records.len() >= self.capacity {
            records.pop_front();
        }
        records.push_back(record.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
