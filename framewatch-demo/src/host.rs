//! Synthetic host loop
//!
//! Stands in for an engine: produces frame timings, memory readings and
//! gameplay events with a seeded RNG so runs are reproducible.

use framewatch_core::sampler::RenderStats;
use framewatch_core::FrameMetrics;

use crate::player::{PlayerInput, TriggerKind};

/// Fixed physics step used by the simulated engine
pub const FIXED_STEP_SECS: f64 = 0.02;

const BASE_MEMORY_BYTES: u64 = 64 * 1024 * 1024;

/// A gameplay event delivered alongside a frame
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    TriggerEnter(TriggerKind),
    TriggerExit(TriggerKind),
    Collision { relative_speed: f64 },
    Landed,
    /// Garbage collection with memory before and after
    Collection {
        before: u64,
        after: u64,
    },
}

/// Everything the host hands to the game for one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: u64,
    pub metrics: FrameMetrics,
    pub input: PlayerInput,
    pub events: Vec<HostEvent>,
}

#[derive(Debug)]
pub struct SyntheticHost {
    rng: fastrand::Rng,
    frame_secs: f64,
    spike_every: u64,
    frame: u64,
    memory_bytes: u64,
}

impl SyntheticHost {
    pub fn new(seed: u64, frame_secs: f64, spike_every: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            frame_secs,
            spike_every,
            frame: 0,
            memory_bytes: BASE_MEMORY_BYTES,
        }
    }

    pub fn frames_emitted(&self) -> u64 {
        self.frame
    }

    pub fn next_frame(&mut self) -> Frame {
        self.frame += 1;
        let index = self.frame;

        // +-10% jitter around the nominal frame time
        let jitter = (self.rng.f64() - 0.5) * 0.2;
        let mut elapsed = self.frame_secs * (1.0 + jitter);
        if self.spike_every > 0 && index % self.spike_every == 0 {
            elapsed *= 4.0;
        }

        // Memory creeps up and is reclaimed every few hundred frames
        self.memory_bytes += self.rng.u64(0..256 * 1024);
        let mut events = Vec::new();
        if index % 240 == 0 {
            let before = self.memory_bytes;
            self.memory_bytes = BASE_MEMORY_BYTES;
            events.push(HostEvent::Collection {
                before,
                after: self.memory_bytes,
            });
        }

        match self.rng.u32(0..100) {
            0 => events.push(HostEvent::TriggerEnter(TriggerKind::Enemy)),
            1 => events.push(HostEvent::TriggerEnter(TriggerKind::PowerUp)),
            2 => events.push(HostEvent::TriggerExit(TriggerKind::SafeZone)),
            3 => events.push(HostEvent::Collision {
                relative_speed: self.rng.f64() * 10.0,
            }),
            4..=9 => events.push(HostEvent::Landed),
            _ => {}
        }

        let input = PlayerInput {
            horizontal: match self.rng.u8(0..4) {
                0 => -1.0,
                1 => 1.0,
                _ => 0.0,
            },
            jump_pressed: self.rng.u8(0..30) == 0,
        };

        let metrics = FrameMetrics::new(elapsed)
            .with_memory(self.memory_bytes)
            .with_physics_step(FIXED_STEP_SECS)
            .with_render(RenderStats {
                draw_calls: 80 + self.rng.u64(0..40),
                batches: 20 + self.rng.u64(0..10),
            });

        Frame {
            index,
            metrics,
            input,
            events,
        }
    }
}
