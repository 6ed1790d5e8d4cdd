//! Process-wide default logger
//!
//! Consumers normally receive a [`Logger`] through their constructor. The
//! default slot exists for call sites that cannot be threaded through: it is
//! filled once at startup and emptied at shutdown.

use std::sync::OnceLock;

use parking_lot::RwLock;

use framewatch_utils::{FramewatchError, Result};

use super::Logger;

fn slot() -> &'static RwLock<Option<Logger>> {
    static DEFAULT: OnceLock<RwLock<Option<Logger>>> = OnceLock::new();
    DEFAULT.get_or_init(|| RwLock::new(None))
}

/// Install the process default
///
/// Fails if a default is already installed; call [`shutdown_default`] first
/// to replace it.
pub fn install_default(logger: Logger) -> Result<()> {
    let mut slot = slot().write();
    if slot.is_some() {
        return Err(FramewatchError::config("a default logger is already installed"));
    }
    *slot = Some(logger);
    tracing::debug!("Default logger installed");
    Ok(())
}

/// The installed default, if any
pub fn default_logger() -> Option<Logger> {
    slot().read().clone()
}

/// The installed default, or a disabled no-op logger
pub fn default_or_disabled() -> Logger {
    default_logger().unwrap_or_else(Logger::disabled)
}

/// Flush and remove the process default
pub fn shutdown_default() -> Option<Logger> {
    let logger = slot().write().take();
    if let Some(ref logger) = logger {
        logger.flush();
        tracing::debug!("Default logger shut down");
    }
    logger
}
