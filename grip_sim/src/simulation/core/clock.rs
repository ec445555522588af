// grip_sim/src/simulation/core/clock.rs

use std::time::Duration;

use bevy::prelude::Resource;

/// Counts fixed ticks. The vehicles are stepped with `dt` from here rather
/// than from Bevy's `Time`, so a run is the same however fast the host loop
/// spins.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimulationClock {
    /// Ticks completed so far.
    pub tick: u64,
    /// Seconds per tick.
    pub dt: f64,
    /// Ticks in the whole run.
    pub total_ticks: u64,
}

impl SimulationClock {
    /// `rate_hz` must be positive; the config loader checks it.
    pub fn new(rate_hz: f64, duration_seconds: f64) -> Self {
        let total_ticks = (duration_seconds.max(0.0) * rate_hz).round() as u64;
        Self {
            tick: 0,
            dt: 1.0 / rate_hz,
            total_ticks,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.tick as f64 * self.dt
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(self.dt)
    }

    /// Counts one tick. Returns `true` once the run is complete.
    pub fn advance(&mut self) -> bool {
        if !self.is_finished() {
            self.tick += 1;
        }
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.tick >= self.total_ticks
    }
}
