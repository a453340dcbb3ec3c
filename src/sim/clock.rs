//! Fixed-timestep accumulator
//!
//! Turns variable wall-clock frame times into a whole number of uniform
//! physics steps, banking the leftover for the next frame.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Steps to run for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameSteps {
    /// Fixed steps to simulate this frame
    pub steps: u32,
    /// Seconds discarded because the substep cap was hit
    pub dropped: f32,
}

/// Fixed-timestep clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedClock {
    previous_ticks: f32,
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedClock {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            previous_ticks: 0.0,
            accumulator: 0.0,
            step,
            max_substeps: max_substeps.max(1),
        }
    }

    /// Fixed step size in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time banked from previous frames
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Restart timing from `now` without running any steps
    pub fn reset(&mut self, now: f32) {
        self.previous_ticks = now;
        self.accumulator = 0.0;
    }

    /// Account for wall time up to `now` (seconds) and report how many
    /// steps to simulate
    pub fn advance(&mut self, now: f32) -> FrameSteps {
        let mut delta = now - self.previous_ticks;
        self.previous_ticks = now;
        delta += self.accumulator;

        if delta < self.step {
            self.accumulator = delta;
            return FrameSteps::default();
        }

        let mut steps = 0;
        while delta >= self.step && steps < self.max_substeps {
            delta -= self.step;
            steps += 1;
        }

        let mut dropped = 0.0;
        if delta >= self.step {
            let kept = delta % self.step;
            dropped = delta - kept;
            delta = kept;
            log::warn!(
                "Simulation fell behind: ran {} steps, dropped {:.3}s",
                steps,
                dropped
            );
        }

        self.accumulator = delta;
        FrameSteps { steps, dropped }
    }
}
