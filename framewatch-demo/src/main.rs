//! framewatch demo host
//!
//! Runs a synthetic frame loop that feeds a player controller and a
//! performance sampler, both reporting through one injected logger.

use framewatch_core::config::DEFAULT_CONFIG_TOML;
use framewatch_core::log::{self, LogLevel};
use framewatch_core::{AppConfig, ConfigLoader, PerformanceSampler};
use framewatch_utils::{init_logging_with_config, LogConfig, Result};

mod cli;
mod host;
mod player;

use cli::Args;
use host::{HostEvent, SyntheticHost, FIXED_STEP_SECS};
use player::{PlayerController, PlayerSettings};

fn main() -> Result<()> {
    let args = Args::parse_args();

    if args.print_config {
        println!("{}", DEFAULT_CONFIG_TOML.trim_start());
        return Ok(());
    }

    init_logging_with_config(LogConfig::interactive())?;
    tracing::debug!("CLI args: {:?}", args);

    match run(&args) {
        Ok(summary) => {
            tracing::info!(
                frames = summary.frames,
                windows = summary.windows,
                warnings = summary.warnings,
                sink_failures = summary.sink_failures,
                "framewatch demo finished"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("framewatch demo error: {}", e);
            eprintln!("Error: {}", e);
            Err(e)
        }
    }
}

#[derive(Debug, Default)]
struct RunSummary {
    frames: u64,
    windows: u64,
    warnings: u64,
    sink_failures: u64,
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match args.config {
        Some(ref path) => ConfigLoader::load_path_and_validate(path)?,
        None => ConfigLoader::load_and_validate()?,
    };

    if let Some(level) = args.min_level {
        config.logging.min_level = level;
    }

    Ok(config)
}

fn run(args: &Args) -> Result<RunSummary> {
    let config = load_config(args)?;
    let built = config.logging.build()?;
    log::install_default(built.logger.clone())?;

    let result = simulate(args, &config);

    if let Some(logger) = log::shutdown_default() {
        tracing::debug!(sink_failures = logger.sink_failures(), "Logger shut down");
    }
    if let Some(memory) = built.memory {
        tracing::info!(
            retained = memory.len(),
            errors = memory.records_at(LogLevel::Error).len(),
            "In-memory records at shutdown"
        );
    }

    result
}

fn simulate(args: &Args, config: &AppConfig) -> Result<RunSummary> {
    let logger = log::default_or_disabled();
    let mut sampler = PerformanceSampler::with_default_logger(config.sampler.clone())?;
    let mut player = PlayerController::new(logger.clone(), PlayerSettings::default());
    let mut host = SyntheticHost::new(args.seed, args.frame_secs(), args.spike_every);

    if args.diagnostics {
        player.run_diagnostics();
    }

    let mut summary = RunSummary::default();
    let mut physics_debt = 0.0;

    while host.frames_emitted() < args.frames {
        let frame = host.next_frame();

        player.update(frame.input);

        for event in &frame.events {
            match event {
                HostEvent::TriggerEnter(kind) => player.on_trigger_enter(kind),
                HostEvent::TriggerExit(kind) => player.on_trigger_exit(kind),
                HostEvent::Collision { relative_speed } => player.on_collision(*relative_speed),
                HostEvent::Landed => player.land(),
                HostEvent::Collection { before, after } => {
                    sampler.report_gc_reclaimed(*before, *after);
                }
            }
        }

        physics_debt += frame.metrics.elapsed_secs;
        while physics_debt >= FIXED_STEP_SECS {
            player.fixed_update(FIXED_STEP_SECS);
            physics_debt -= FIXED_STEP_SECS;
        }

        let report = sampler.report_all(&frame.metrics);
        summary.frames = frame.index;
        summary.warnings += [
            report.frame_time_exceeded,
            report.memory_exceeded,
            report.physics_exceeded,
        ]
        .iter()
        .filter(|exceeded| **exceeded)
        .count() as u64;
        if report.average_fps.is_some() {
            summary.windows += 1;
        }

        if !player.is_alive() {
            logger.log_warning("Demo", format!("Player died at frame {}", frame.index));
            break;
        }
    }

    drop(player);
    logger.flush();
    summary.sink_failures = logger.sink_failures();

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use framewatch_core::log::{Logger, MemorySink};
    use std::sync::Arc;

    // Only test in this binary that touches the process default logger
    #[test]
    fn test_simulate_reports_spikes() {
        let args = Args::parse_from([
            "framewatch-demo",
            "-n",
            "120",
            "--spike-every",
            "30",
            "--diagnostics",
        ]);
        let memory = Arc::new(MemorySink::new(4096));
        let logger = Logger::builder().sink(memory.clone()).build().unwrap();
        log::install_default(logger).unwrap();

        let summary = simulate(&args, &AppConfig::default()).unwrap();
        log::shutdown_default();

        assert_eq!(summary.frames, 120);
        assert_eq!(summary.warnings, 4);
        assert!(summary.windows >= 1);
        assert_eq!(summary.sink_failures, 0);

        let spikes = memory
            .records_at(LogLevel::Warning)
            .into_iter()
            .filter(|r| r.tag == "Performance" && r.message.starts_with("Frame time"))
            .count();
        assert_eq!(spikes, 4);

        let exceptions = memory.records_at(LogLevel::Exception);
        assert_eq!(exceptions.len(), 1);
        assert_eq!(exceptions[0].tag, "PlayerController");

        let records = memory.records();
        assert_eq!(
            records.first().map(|r| r.message.as_str()),
            Some("PlayerController initialized with health: 100")
        );
        assert_eq!(
            records.last().map(|r| r.message.as_str()),
            Some("PlayerController destroyed")
        );
    }
}
