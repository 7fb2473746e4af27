//! Host runtime for the zen-particles field.
//!
//! Ties a [`zen_core::SessionState`] to a hand tracker and a renderer through
//! a cooperative [`frame::Scheduler`]. Everything runs on one thread; the
//! only shared state is the [`frame::CancelToken`].

pub mod constants;
pub mod frame;
pub mod overlay;
pub mod render;
pub mod tracker;

pub use frame::{CancelToken, FrameClock, RunSummary, Scheduler};
pub use render::{FrameSink, StatsSink};
pub use tracker::{HandTracker, SimulatedTracker, TrackerError, TrackerLoop, TrackerState};

use constants::*;

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub animation_hz: f32,
    pub tracker_hz: f32,
    /// Upper bound on the delta handed to the animator.
    pub max_frame_dt: f32,
    pub status_interval_sec: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            animation_hz: DEFAULT_ANIMATION_HZ,
            tracker_hz: DEFAULT_TRACKER_HZ,
            max_frame_dt: MAX_FRAME_DT,
            status_interval_sec: STATUS_INTERVAL_SEC,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.animation_hz) || !positive(self.tracker_hz) {
            anyhow::bail!(
                "loop rates must be positive (animation {} Hz, tracker {} Hz)",
                self.animation_hz,
                self.tracker_hz
            );
        }
        if self.tracker_hz > self.animation_hz {
            anyhow::bail!(
                "tracker rate {} Hz exceeds animation rate {} Hz",
                self.tracker_hz,
                self.animation_hz
            );
        }
        if !positive(self.max_frame_dt) || !positive(self.status_interval_sec) {
            anyhow::bail!("frame delta cap and status interval must be positive");
        }
        Ok(())
    }
}
