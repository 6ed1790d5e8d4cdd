//! Rolling-average window state

/// Tolerance for the end-of-window check; repeated float subtraction leaves
/// a tiny positive remainder (1.0 - 10 * 0.1 ~= 1.4e-16)
const WINDOW_EPSILON: f64 = 1e-9;

/// Aggregate produced when a window closes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSample {
    /// Mean of `time_scale / elapsed` over the window
    pub average: f64,
    /// Ticks that contributed to the average
    pub sample_count: u64,
}

/// Counters for one fixed-length averaging window
///
/// Memory and per-tick cost are constant. On flush the window restarts at
/// its full length; any overshoot past zero is discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerState {
    pub window_secs: f64,
    pub time_remaining: f64,
    pub accumulated: f64,
    pub sample_count: u64,
}

impl SamplerState {
    pub fn new(window_secs: f64) -> Self {
        Self {
            window_secs,
            time_remaining: window_secs,
            accumulated: 0.0,
            sample_count: 0,
        }
    }

    /// Feed one tick
    ///
    /// Ticks with a non-positive or non-finite `elapsed`, or a non-finite
    /// `time_scale`, are ignored and leave the state untouched. Returns the
    /// window aggregate when this tick closes the window.
    pub fn record(&mut self, elapsed: f64, time_scale: f64) -> Option<WindowSample> {
        if !(elapsed.is_finite() && elapsed > 0.0) || !time_scale.is_finite() {
            return None;
        }

        self.accumulated += time_scale / elapsed;
        self.sample_count += 1;
        self.time_remaining -= elapsed;

        if self.time_remaining > WINDOW_EPSILON {
            return None;
        }

        let sample = (self.sample_count > 0).then(|| WindowSample {
            average: self.accumulated / self.sample_count as f64,
            sample_count: self.sample_count,
        });
        self.reset();
        sample
    }

    /// Restart the window at full length
    pub fn reset(&mut self) {
        *self = Self::new(self.window_secs);
    }

    /// Whether no tick has been recorded since the last flush
    pub fn is_fresh(&self) -> bool {
        self.sample_count == 0
    }
}
