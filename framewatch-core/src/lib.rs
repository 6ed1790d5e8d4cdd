//! framewatch-core: conditional logging and per-tick performance sampling
//!
//! - [`log`]: the [`Logger`] facade, its sinks and the process default slot
//! - [`sampler`]: [`PerformanceSampler`] threshold checks and rolling FPS average
//! - [`config`]: TOML configuration for both

pub mod config;
pub mod log;
pub mod sampler;

pub use config::{AppConfig, ConfigLoader, ConfiguredLogger, LoggingConfig};
pub use log::{LogLevel, LogRecord, LogSink, Logger, LoggerConfig};
pub use sampler::{FrameMetrics, FrameReport, PerformanceSampler, SamplerConfig};
