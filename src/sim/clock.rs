//! Wall-clock to tick conversion
//!
//! Frontends feed real elapsed time in and get back how many times to call
//! [`super::tick`], so game speed does not depend on frame rate.

use crate::consts::*;

/// Length of one tick in seconds
pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;

/// Longest frame we try to catch up on (after a stall or tab switch)
const MAX_FRAME_SECS: f32 = 0.1;

/// Fixed timestep accumulator
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame's elapsed time; returns the number of ticks to run
    pub fn advance(&mut self, elapsed_secs: f32) -> u32 {
        self.accumulator += elapsed_secs.clamp(0.0, MAX_FRAME_SECS);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Drop leftover time, e.g. when resuming from pause
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Fraction of a tick left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}
