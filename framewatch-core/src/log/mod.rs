//! Conditional structured logging
//!
//! A [`Logger`] handle routes [`LogRecord`]s to one or more [`LogSink`]s.
//! Gated variants (`log_if` and friends) take a message producer that is
//! only invoked when the record is actually emitted.

mod facade;
mod file_sink;
pub mod global;
mod level;
mod record;
mod sink;

pub use facade::{Logger, LoggerBuilder, LoggerConfig};
pub use file_sink::{FileSink, FileSinkOptions};
pub use global::{default_logger, default_or_disabled, install_default, shutdown_default};
pub use level::LogLevel;
pub use record::{ExceptionInfo, LogRecord};
pub use sink::{ConsoleSink, LogSink, MemorySink, NullSink, CONSOLE_TARGET};
