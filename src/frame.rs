//! Cooperative frame scheduling.
//!
//! Two fixed-rate clocks share one thread: the animation clock advances the
//! session every rendered frame, the tracker clock polls the hand tracker at
//! camera rate. `Scheduler::step` does whatever is due at a given instant and
//! never blocks, so tests can drive it with synthetic time.

use crate::constants::*;
use crate::render::FrameSink;
use crate::tracker::{HandTracker, TrackerLoop};
use crate::{overlay, RunConfig};
use instant::Instant;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use zen_core::{Command, SessionState};

/// Shared stop flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Fixed-rate deadline tracker.
///
/// `poll` fires at most once per call. A clock that falls behind skips the
/// missed frames instead of bursting to catch up.
#[derive(Clone, Debug)]
pub struct FrameClock {
    period: f64,
    next_due: f64,
    last_fired: Option<f64>,
}

impl FrameClock {
    pub fn new(hz: f32) -> Self {
        Self {
            period: 1.0 / hz.max(f32::EPSILON) as f64,
            next_due: 0.0,
            last_fired: None,
        }
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn next_due(&self) -> f64 {
        self.next_due
    }

    /// Seconds since the previous firing when a frame is due at `now`. The
    /// first firing reports one nominal period.
    pub fn poll(&mut self, now: f64) -> Option<f32> {
        if self.last_fired.is_some() && now < self.next_due {
            return None;
        }
        let dt = match self.last_fired {
            Some(last) => now - last,
            None => self.period,
        };
        self.last_fired = Some(now);
        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        Some(dt as f32)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub tracker_polls: u64,
    pub elapsed_sec: f64,
}

pub struct Scheduler<T: HandTracker, S: FrameSink> {
    session: SessionState,
    tracker: TrackerLoop<T>,
    sink: S,
    animation: FrameClock,
    tracking: FrameClock,
    status: FrameClock,
    max_frame_dt: f32,
    commands: Receiver<Command>,
    command_tx: Sender<Command>,
    cancel: CancelToken,
    summary: RunSummary,
}

impl<T: HandTracker, S: FrameSink> Scheduler<T, S> {
    pub fn new(
        session: SessionState,
        tracker: T,
        sink: S,
        config: &RunConfig,
        cancel: CancelToken,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        let (command_tx, commands) = mpsc::channel();
        Ok(Self {
            session,
            tracker: TrackerLoop::new(tracker),
            sink,
            animation: FrameClock::new(config.animation_hz),
            tracking: FrameClock::new(config.tracker_hz),
            status: FrameClock::new(1.0 / config.status_interval_sec),
            max_frame_dt: config.max_frame_dt,
            commands,
            command_tx,
            cancel,
            summary: RunSummary::default(),
        })
    }

    /// Sender for control-surface commands; applied at the start of the next
    /// step.
    pub fn commands(&self) -> Sender<Command> {
        self.command_tx.clone()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn tracker(&self) -> &TrackerLoop<T> {
        &self.tracker
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Earliest instant at which `step` has work to do.
    pub fn next_deadline(&self) -> f64 {
        self.animation.next_due().min(self.tracking.next_due())
    }

    /// Run everything due at `now` (seconds since start). Returns `false`
    /// once cancelled; the tracker has been released by then.
    pub fn step(&mut self, now: f64) -> bool {
        if self.cancel.is_cancelled() {
            self.tracker.shutdown();
            return false;
        }
        self.summary.elapsed_sec = now;

        while let Ok(command) = self.commands.try_recv() {
            self.session.handle(command);
        }

        if self.tracking.poll(now).is_some() {
            self.tracker.poll(now, &mut self.session);
            self.summary.tracker_polls += 1;
        }

        if let Some(dt) = self.animation.poll(now) {
            self.session.advance(dt.min(self.max_frame_dt));
            self.sink.present(&self.session.frame());
            self.summary.frames += 1;
        }

        if self.status.poll(now).is_some() {
            log::info!("{}", overlay::status_line(&self.session));
        }
        true
    }

    /// Drive `step` from the wall clock until cancelled.
    pub fn run(&mut self) -> RunSummary {
        let start = Instant::now();
        loop {
            let now = start.elapsed().as_secs_f64();
            if !self.step(now) {
                break;
            }
            let wait = (self.next_deadline() - start.elapsed().as_secs_f64())
                .clamp(0.0, MAX_IDLE_SLEEP_SEC);
            if wait > 0.0 {
                std::thread::sleep(Duration::from_secs_f64(wait));
            }
        }
        log::info!(
            "[scheduler] stopped after {:.1}s: {} frames, {} tracker polls",
            self.summary.elapsed_sec,
            self.summary.frames,
            self.summary.tracker_polls
        );
        self.summary
    }
}
