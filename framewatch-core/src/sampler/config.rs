//! Sampler thresholds and window size

use serde::{Deserialize, Serialize};

use framewatch_utils::{FramewatchError, Result};

const MIB: u64 = 1024 * 1024;

/// Thresholds and window length for a [`super::PerformanceSampler`]
///
/// The defaults describe a 30fps budget with a 50Hz physics step. They are
/// starting points only; real budgets depend on the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Tag attached to every record the sampler emits
    pub tag: String,
    /// Length of the rolling-average window in seconds
    pub window_secs: f64,
    /// Frame time budget in seconds
    pub max_frame_secs: f64,
    /// Memory budget in bytes
    pub max_memory_bytes: u64,
    /// Expected physics step in seconds
    pub physics_target_secs: f64,
    /// Minimum reclaimed bytes worth reporting after a collection
    pub gc_report_threshold_bytes: u64,
    /// Whether the host can supply draw call / batch counts
    pub rendering_stats: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            tag: "Performance".into(),
            window_secs: 1.0,
            max_frame_secs: 0.033,
            max_memory_bytes: 100 * MIB,
            physics_target_secs: 0.02,
            gc_report_threshold_bytes: MIB,
            rendering_stats: false,
        }
    }
}

impl SamplerConfig {
    /// Reject values the sampler cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.tag.trim().is_empty() {
            return Err(FramewatchError::config("sampler tag must not be empty"));
        }

        if !(self.window_secs.is_finite() && self.window_secs > 0.0) {
            return Err(FramewatchError::config(format!(
                "window_secs must be a positive number, got {}",
                self.window_secs
            )));
        }

        for (name, value) in [
            ("max_frame_secs", self.max_frame_secs),
            ("physics_target_secs", self.physics_target_secs),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FramewatchError::config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
