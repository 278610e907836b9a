//! Simulation clock: step counting, growth cadence and the water shimmer timer

use std::time::{Duration, Instant};

use super::types::WATER_ANIM_PHASES;

/// The city grows on steps that are a multiple of this
pub const GROWTH_INTERVAL: u64 = 3;
/// Wall-clock time that must pass before the water animation advances
pub const WATER_ANIM_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct SimClock {
    step: u64,
    max_steps: u64,
    water_phase: u8,
    last_water_anim: Instant,
}

impl SimClock {
    pub fn new(max_steps: u64, now: Instant) -> Self {
        Self {
            step: 0,
            max_steps,
            water_phase: 0,
            last_water_anim: now,
        }
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn max_steps(&self) -> u64 {
        self.max_steps
    }

    /// True once the step cap has been reached
    pub fn is_finished(&self) -> bool {
        self.step >= self.max_steps
    }

    pub fn is_growth_step(&self) -> bool {
        self.step % GROWTH_INTERVAL == 0
    }

    pub fn water_phase(&self) -> u8 {
        self.water_phase
    }

    /// Advances the water phase if enough wall-clock time has passed since
    /// the last advance. Independent of the step counter.
    pub fn advance_water_animation(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_water_anim) <= WATER_ANIM_INTERVAL {
            return false;
        }
        self.water_phase = (self.water_phase + 1) % WATER_ANIM_PHASES;
        self.last_water_anim = now;
        true
    }

    pub(crate) fn advance(&mut self) {
        self.step += 1;
    }
}
