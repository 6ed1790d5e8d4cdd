//! Periodic metrics sampling
//!
//! A [`PerformanceSampler`] is driven once per host tick. Threshold checks
//! report immediately; the frame-rate average is reported once per window.

mod config;
mod performance;
mod state;

pub use config::SamplerConfig;
pub use performance::{FrameMetrics, FrameReport, PerformanceSampler, RenderStats};
pub use state::{SamplerState, WindowSample};
