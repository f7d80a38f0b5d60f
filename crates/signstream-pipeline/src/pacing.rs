//! Tick pacing against a target frame rate.
//!
//! The pacer caps throughput at the target rate: when a tick finishes
//! early it sleeps out the remainder of the interval, and when a tick
//! overruns it sleeps zero. Overruns are never compensated by shortening
//! later sleeps, so the loop can run below the target rate but never
//! above it.

use std::time::{Duration, Instant};

/// Throughput cap for the tick loop.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    interval: Option<Duration>,
}

impl Pacer {
    /// Build from a target frame rate; `None` (or a nonpositive rate)
    /// disables pacing.
    pub fn from_fps(target_fps: Option<f64>) -> Self {
        let interval = target_fps
            .filter(|fps| fps.is_finite() && *fps > 0.0)
            .map(|fps| Duration::from_secs_f64(1.0 / fps));
        Self { interval }
    }

    /// The configured tick interval, if pacing is enabled.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Time left in the current interval after `elapsed` of processing.
    /// Saturates at zero; there is no catch-up for slow ticks.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        match self.interval {
            Some(interval) => interval.saturating_sub(elapsed),
            None => Duration::ZERO,
        }
    }

    /// Block out the remainder of the interval for a tick that started at
    /// `tick_started`.
    pub fn pace(&self, tick_started: Instant) {
        let remaining = self.remaining(tick_started.elapsed());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}
