//! framewatch-utils: Common utilities shared across framewatch crates
//!
//! This crate provides:
//! - Unified error types ([`FramewatchError`], [`Result`])
//! - Diagnostic logging setup ([`init_logging`], [`LogConfig`])
//! - XDG-compliant path utilities ([`paths`] module)

pub mod error;
pub mod logging;
pub mod paths;

pub use error::{FramewatchError, Result};
pub use logging::{init_logging, init_logging_with_config, LogConfig, LogOutput};

pub use paths::{config_dir, config_file, default_record_file, ensure_dir, log_dir, state_dir};
