//! Per-tick performance checks routed through the logger facade

use framewatch_utils::{FramewatchError, Result};

use super::{SamplerConfig, SamplerState};
use crate::log::{self, Logger};

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

fn to_mib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MIB
}

/// Draw call counters supplied by the host renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub draw_calls: u64,
    pub batches: u64,
}

/// Everything the host measured for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    pub elapsed_secs: f64,
    pub time_scale: f64,
    pub memory_bytes: Option<u64>,
    pub physics_step_secs: Option<f64>,
    pub render: Option<RenderStats>,
}

impl FrameMetrics {
    /// Metrics for a frame running at normal speed
    pub fn new(elapsed_secs: f64) -> Self {
        Self {
            elapsed_secs,
            time_scale: 1.0,
            memory_bytes: None,
            physics_step_secs: None,
            render: None,
        }
    }

    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn with_memory(mut self, bytes: u64) -> Self {
        self.memory_bytes = Some(bytes);
        self
    }

    pub fn with_physics_step(mut self, step_secs: f64) -> Self {
        self.physics_step_secs = Some(step_secs);
        self
    }

    pub fn with_render(mut self, render: RenderStats) -> Self {
        self.render = Some(render);
        self
    }
}

/// Outcome of [`PerformanceSampler::report_all`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    pub frame_time_exceeded: bool,
    pub memory_exceeded: bool,
    pub physics_exceeded: bool,
    pub render_reported: bool,
    /// Set on the tick that closed an averaging window
    pub average_fps: Option<f64>,
}

/// Threshold checks plus a rolling average of the frame rate
///
/// The one-shot `report_*` checks are stateless and catch spikes; [`tick`]
/// feeds a fixed window that reports the sustained rate once per window.
///
/// [`tick`]: PerformanceSampler::tick
#[derive(Debug)]
pub struct PerformanceSampler {
    logger: Logger,
    config: SamplerConfig,
    state: SamplerState,
}

impl PerformanceSampler {
    /// Create a sampler reporting through `logger`
    ///
    /// Invalid thresholds are rejected here, not on first use.
    pub fn new(logger: Logger, config: SamplerConfig) -> Result<Self> {
        config.validate()?;
        let state = SamplerState::new(config.window_secs);
        Ok(Self {
            logger,
            config,
            state,
        })
    }

    /// Create a sampler using the process default logger
    ///
    /// Fails immediately when no default has been installed.
    pub fn with_default_logger(config: SamplerConfig) -> Result<Self> {
        let logger = log::default_logger().ok_or_else(|| {
            FramewatchError::config("no default logger installed for performance sampler")
        })?;
        Self::new(logger, config)
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Snapshot of the averaging window
    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// Discard the current window without reporting it
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Warn when one frame took longer than `max_secs`
    ///
    /// Returns whether the budget was exceeded.
    pub fn report_frame_time(&self, elapsed_secs: f64, max_secs: f64) -> bool {
        let exceeded = elapsed_secs > max_secs;
        self.logger.log_warning_if(exceeded, &self.config.tag, || {
            if elapsed_secs > 0.0 {
                format!(
                    "Frame time: {:.3}s (target: {:.3}s) - FPS: {:.1}",
                    elapsed_secs,
                    max_secs,
                    1.0 / elapsed_secs
                )
            } else {
                format!("Frame time: {:.3}s (target: {:.3}s)", elapsed_secs, max_secs)
            }
        });
        exceeded
    }

    /// Warn when memory in use is above `max_bytes`
    pub fn report_memory_usage(&self, current_bytes: u64, max_bytes: u64) -> bool {
        let exceeded = current_bytes > max_bytes;
        self.logger.log_warning_if(exceeded, &self.config.tag, || {
            format!(
                "Memory usage: {:.1}MB ({} bytes) exceeds threshold {:.1}MB ({} bytes)",
                to_mib(current_bytes),
                current_bytes,
                to_mib(max_bytes),
                max_bytes
            )
        });
        exceeded
    }

    /// Warn when the physics step is longer than `target_secs`
    pub fn report_physics_step(&self, step_secs: f64, target_secs: f64) -> bool {
        let exceeded = step_secs > target_secs;
        self.logger.log_warning_if(exceeded, &self.config.tag, || {
            format!(
                "Physics timestep: {:.3}s (target: {:.3}s)",
                step_secs, target_secs
            )
        });
        exceeded
    }

    /// Report how much a collection freed, if above the configured threshold
    pub fn report_gc_reclaimed(&self, before_bytes: u64, after_bytes: u64) -> bool {
        let reclaimed = before_bytes.saturating_sub(after_bytes);
        let significant = reclaimed > self.config.gc_report_threshold_bytes;
        self.logger.log_if(significant, &self.config.tag, || {
            format!("GC collected: {:.1}MB", to_mib(reclaimed))
        });
        significant
    }

    /// Report renderer counters when the host advertises the capability
    pub fn report_rendering_stats(&self, stats: RenderStats) -> bool {
        let available = self.config.rendering_stats;
        self.logger.log_if(available, &self.config.tag, || {
            format!(
                "Draw calls: {}, batches: {}",
                stats.draw_calls, stats.batches
            )
        });
        available
    }

    /// Advance the averaging window by one frame
    ///
    /// Returns the average frame rate when this tick closes the window. Ticks
    /// with zero, negative or non-finite elapsed time are ignored.
    pub fn tick(&mut self, elapsed_secs: f64, time_scale: f64) -> Option<f64> {
        if !(elapsed_secs.is_finite() && elapsed_secs > 0.0) {
            tracing::trace!(elapsed_secs, "Ignoring degenerate tick");
            return None;
        }

        let sample = self.state.record(elapsed_secs, time_scale)?;
        self.logger.log(
            &self.config.tag,
            format!(
                "Average FPS: {:.1} ({} frames)",
                sample.average, sample.sample_count
            ),
        );
        Some(sample.average)
    }

    /// Run every check against the configured thresholds
    pub fn report_all(&mut self, metrics: &FrameMetrics) -> FrameReport {
        let frame_time_exceeded =
            self.report_frame_time(metrics.elapsed_secs, self.config.max_frame_secs);

        let memory_exceeded = metrics
            .memory_bytes
            .map(|bytes| self.report_memory_usage(bytes, self.config.max_memory_bytes))
            .unwrap_or(false);

        let physics_exceeded = metrics
            .physics_step_secs
            .map(|step| self.report_physics_step(step, self.config.physics_target_secs))
            .unwrap_or(false);

        let render_reported = metrics
            .render
            .map(|stats| self.report_rendering_stats(stats))
            .unwrap_or(false);

        let average_fps = self.tick(metrics.elapsed_secs, metrics.time_scale);

        FrameReport {
            frame_time_exceeded,
            memory_exceeded,
            physics_exceeded,
            render_reported,
            average_fps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{LogLevel, MemorySink};
    use std::sync::Arc;

    fn sampler_with(config: SamplerConfig) -> (PerformanceSampler, Arc<MemorySink>) {
        let memory = Arc::new(MemorySink::default());
        let logger = Logger::builder().sink(memory.clone()).build().unwrap();
        (PerformanceSampler::new(logger, config).unwrap(), memory)
    }

    fn sampler() -> (PerformanceSampler, Arc<MemorySink>) {
        sampler_with(SamplerConfig::default())
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = SamplerConfig {
            window_secs: 0.0,
            ..SamplerConfig::default()
        };
        let err = PerformanceSampler::new(Logger::disabled(), config).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_initial_state_is_full_window() {
        let (sampler, _) = sampler_with(SamplerConfig {
            window_secs: 2.5,
            ..SamplerConfig::default()
        });
        assert_eq!(sampler.state(), SamplerState::new(2.5));
    }

    // ==================== Frame Time Tests ====================

    #[test]
    fn test_frame_time_over_budget_warns_once() {
        let (sampler, memory) = sampler();
        assert!(sampler.report_frame_time(0.05, 0.033));

        let warnings = memory.records_at(LogLevel::Warning);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].tag, "Performance");
        assert!(warnings[0].message.contains("0.050s"));
        assert!(warnings[0].message.contains("FPS: 20.0"));
    }

    #[test]
    fn test_frame_time_within_budget_is_silent() {
        let (sampler, memory) = sampler();
        for elapsed in [0.0, 0.016, 0.033] {
            assert!(!sampler.report_frame_time(elapsed, 0.033));
        }
        assert!(memory.is_empty());
    }

    #[test]
    fn test_frame_time_zero_elapsed_skips_rate() {
        let (sampler, memory) = sampler();
        assert!(sampler.report_frame_time(0.0, -1.0));

        let message = &memory.records()[0].message;
        assert!(!message.contains("FPS"));
        assert!(!message.contains("inf"));
    }

    // ==================== Memory Tests ====================

    #[test]
    fn test_memory_over_threshold() {
        let (sampler, memory) = sampler();
        assert!(sampler.report_memory_usage(150_000_000, 100_000_000));

        let warnings = memory.records_at(LogLevel::Warning);
        assert_eq!(warnings.len(), 1);
        let message = &warnings[0].message;
        assert!(message.contains("150"));
        assert!(message.contains("100"));
        // 150_000_000 / 1_048_576
        assert!(message.contains("143.1MB"));
        assert!(message.contains("95.4MB"));
    }

    #[test]
    fn test_memory_under_threshold() {
        let (sampler, memory) = sampler();
        assert!(!sampler.report_memory_usage(100_000_000, 100_000_000));
        assert!(memory.is_empty());
    }

    // ==================== Physics Tests ====================

    #[test]
    fn test_physics_step() {
        let (sampler, memory) = sampler();
        assert!(!sampler.report_physics_step(0.02, 0.02));
        assert!(sampler.report_physics_step(0.025, 0.02));

        let warnings = memory.records_at(LogLevel::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("Physics timestep: 0.025s"));
    }

    // ==================== GC / Render Tests ====================

    #[test]
    fn test_gc_reclaimed_threshold() {
        let (sampler, memory) = sampler();
        assert!(!sampler.report_gc_reclaimed(10 * 1024 * 1024, 10 * 1024 * 1024 - 1024));
        assert!(!sampler.report_gc_reclaimed(1024, 4096));
        assert!(sampler.report_gc_reclaimed(10 * 1024 * 1024, 7 * 1024 * 1024));

        let infos = memory.records_at(LogLevel::Info);
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].message, "GC collected: 3.0MB");
    }

    #[test]
    fn test_rendering_stats_gated_by_capability() {
        let stats = RenderStats {
            draw_calls: 120,
            batches: 40,
        };

        let (without, memory) = sampler();
        assert!(!without.report_rendering_stats(stats));
        assert!(memory.is_empty());

        let (with, memory) = sampler_with(SamplerConfig {
            rendering_stats: true,
            ..SamplerConfig::default()
        });
        assert!(with.report_rendering_stats(stats));
        assert_eq!(memory.records()[0].message, "Draw calls: 120, batches: 40");
    }

    // ==================== Tick Tests ====================

    #[test]
    fn test_tick_flushes_once_per_window() {
        let (mut sampler, memory) = sampler();
        let flushes: Vec<f64> = (0..10).filter_map(|_| sampler.tick(0.1, 1.0)).collect();

        assert_eq!(flushes.len(), 1);
        assert!((flushes[0] - 10.0).abs() < 1e-9);

        let infos = memory.records_at(LogLevel::Info);
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].message, "Average FPS: 10.0 (10 frames)");

        assert_eq!(sampler.state(), SamplerState::new(1.0));
    }

    #[test]
    fn test_tick_keeps_windowing_after_flush() {
        let (mut sampler, memory) = sampler();
        let flushes = (0..35).filter(|_| sampler.tick(0.1, 1.0).is_some()).count();
        assert_eq!(flushes, 3);
        assert_eq!(memory.len(), 3);
        assert_eq!(sampler.state().sample_count, 5);
    }

    #[test]
    fn test_tick_zero_elapsed_ignored() {
        let (mut sampler, memory) = sampler();
        assert!(sampler.tick(0.0, 1.0).is_none());
        assert!(sampler.state().is_fresh());
        assert!(memory.is_empty());
    }

    #[test]
    fn test_reset_discards_window() {
        let (mut sampler, memory) = sampler();
        sampler.tick(0.5, 1.0);
        sampler.reset();
        assert!(sampler.tick(0.5, 1.0).is_none());
        assert!(memory.is_empty());
    }

    #[test]
    fn test_disabled_logger_still_tracks_state() {
        let mut sampler = PerformanceSampler::new(Logger::disabled(), SamplerConfig::default())
            .unwrap();
        assert!(sampler.report_frame_time(1.0, 0.033));
        assert_eq!(sampler.tick(1.0, 1.0), Some(1.0));
    }

    // ==================== report_all Tests ====================

    #[test]
    fn test_report_all_uses_configured_thresholds() {
        let (mut sampler, memory) = sampler_with(SamplerConfig {
            window_secs: 0.05,
            rendering_stats: true,
            ..SamplerConfig::default()
        });

        let metrics = FrameMetrics::new(0.05)
            .with_memory(200 * 1024 * 1024)
            .with_physics_step(0.03)
            .with_render(RenderStats {
                draw_calls: 10,
                batches: 2,
            });

        let report = sampler.report_all(&metrics);
        assert!(report.frame_time_exceeded);
        assert!(report.memory_exceeded);
        assert!(report.physics_exceeded);
        assert!(report.render_reported);
        assert!((report.average_fps.unwrap() - 20.0).abs() < 1e-9);

        assert_eq!(memory.records_at(LogLevel::Warning).len(), 3);
        assert_eq!(memory.records_at(LogLevel::Info).len(), 2);
    }

    #[test]
    fn test_report_all_quiet_frame() {
        let (mut sampler, memory) = sampler();
        let report = sampler.report_all(&FrameMetrics::new(0.016).with_memory(1024));
        assert_eq!(report, FrameReport::default());
        assert!(memory.is_empty());
    }

    #[test]
    fn test_time_scale_applied() {
        let (mut sampler, _) = sampler_with(SamplerConfig {
            window_secs: 0.1,
            ..SamplerConfig::default()
        });
        let report = sampler.report_all(&FrameMetrics::new(0.1).with_time_scale(0.5));
        assert!((report.average_fps.unwrap() - 5.0).abs() < 1e-9);
    }
}
