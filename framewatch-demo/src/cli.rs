//! Command-line argument parsing for the demo host
//!
//! Uses clap for argument parsing with derive macros.

use clap::Parser;
use std::path::PathBuf;

use framewatch_core::LogLevel;

/// framewatch-demo - drive the logger and sampler with a synthetic frame loop
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (defaults to $XDG_CONFIG_HOME/framewatch/config.toml)
    #[arg(long, short = 'c', env = "FRAMEWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, short = 'n', default_value_t = 300)]
    pub frames: u64,

    /// Nominal frame time in milliseconds
    #[arg(long, default_value_t = 16.0)]
    pub frame_ms: f64,

    /// Inject a long frame every N frames (0 disables)
    #[arg(long, default_value_t = 90)]
    pub spike_every: u64,

    /// Seed for the frame-time jitter
    #[arg(long, default_value_t = 7)]
    pub seed: u64,

    /// Override the minimum emitted level (info, warning, error, exception)
    #[arg(long)]
    pub min_level: Option<LogLevel>,

    /// Run the player's logging diagnostics before the frame loop
    #[arg(long, default_value_t = false)]
    pub diagnostics: bool,

    /// Print the default configuration and exit
    #[arg(long, default_value_t = false)]
    pub print_config: bool,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn frame_secs(&self) -> f64 {
        self.frame_ms / 1000.0
    }
}
