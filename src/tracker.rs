//! Hand tracker boundary and the loop that feeds its output to the session.
//!
//! Anything that can report hand landmarks implements [`HandTracker`]. The
//! [`TrackerLoop`] owns the tracker, starts it lazily, degrades to "no hands"
//! when it fails and releases it exactly once on teardown.

use crate::constants::*;
use glam::Vec2;
use smallvec::smallvec;
use thiserror::Error;
use zen_core::{HandFrame, LandmarkSet, SessionState, LANDMARKS_PER_HAND};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("tracker failed to initialize: {0}")]
    Init(String),
    #[error("frame capture failed: {0}")]
    Capture(String),
}

pub trait HandTracker {
    /// Acquire the capture device and load the model.
    fn start(&mut self) -> Result<(), TrackerError>;

    /// Hands visible in the newest camera frame, or `Ok(None)` when the
    /// camera has not produced a new frame since the last call.
    fn detect(&mut self, now_sec: f64) -> Result<Option<HandFrame>, TrackerError>;

    /// Release the capture device.
    fn release(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    Running,
    /// Started, then lost the camera.
    Failed,
    /// Could not be started; nothing to release.
    Unavailable,
    Released,
}

pub struct TrackerLoop<T: HandTracker> {
    tracker: T,
    state: TrackerState,
    frames: u64,
}

impl<T: HandTracker> TrackerLoop<T> {
    pub fn new(tracker: T) -> Self {
        Self {
            tracker,
            state: TrackerState::Idle,
            frames: 0,
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Camera frames that reached the extractor.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// One tracker tick. Never fails: tracker errors are logged and the
    /// session falls back to the rest signal.
    pub fn poll(&mut self, now: f64, session: &mut SessionState) {
        if self.state == TrackerState::Idle {
            match self.tracker.start() {
                Ok(()) => {
                    log::info!("[tracker] started");
                    self.state = TrackerState::Running;
                }
                Err(e) => {
                    log::error!("[tracker] {}", e);
                    self.state = TrackerState::Unavailable;
                    session.ingest_hands(&[]);
                    return;
                }
            }
        }

        match self.state {
            TrackerState::Running => match self.tracker.detect(now) {
                Ok(Some(hands)) => {
                    self.frames += 1;
                    session.ingest_hands(&hands);
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("[tracker] {}; continuing without hands", e);
                    self.state = TrackerState::Failed;
                    session.ingest_hands(&[]);
                }
            },
            TrackerState::Failed | TrackerState::Unavailable | TrackerState::Released => {
                session.ingest_hands(&[]);
            }
            TrackerState::Idle => {}
        }
    }

    /// Release the tracker if it was ever started. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        if matches!(self.state, TrackerState::Running | TrackerState::Failed) {
            self.tracker.release();
            log::info!("[tracker] released");
        }
        self.state = TrackerState::Released;
    }
}

impl<T: HandTracker> Drop for TrackerLoop<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Build a plausible hand centered on `center` (the middle-finger knuckle).
///
/// `curl` runs from 0 (open palm) to 1 (closed fist) and only moves the
/// finger joints; the wrist and knuckles stay put.
pub fn synthetic_hand(center: Vec2, curl: f32) -> LandmarkSet {
    let curl = curl.clamp(0.0, 1.0);
    let reach = SIM_REACH_OPEN + (SIM_REACH_FIST - SIM_REACH_OPEN) * curl;
    // image y grows downward, so fingers point toward -y
    let wrist = center + Vec2::new(0.0, SIM_PALM_LENGTH);
    let mut points = [wrist.extend(0.0); LANDMARKS_PER_HAND];
    for (finger, angle) in SIM_FINGER_ANGLES.iter().enumerate() {
        let dir = Vec2::new(angle.sin(), -angle.cos());
        let knuckle = wrist + dir * SIM_PALM_LENGTH;
        let tip = wrist + dir * reach;
        // joints 1..=4 of each finger: knuckle, two mid joints, tip
        for joint in 0..4 {
            let t = joint as f32 / 3.0;
            let p = knuckle.lerp(tip, t);
            points[1 + finger * 4 + joint] = p.extend(0.0);
        }
    }
    LandmarkSet::new(points)
}

/// Scripted stand-in for a camera tracker.
///
/// Cycles through a fixed choreography: no hands, one hand slowly clenching,
/// then two hands drifting apart and back while pulsing a fist. Frames are
/// only produced at camera rate.
#[derive(Debug)]
pub struct SimulatedTracker {
    camera_period: f64,
    last_frame: Option<u64>,
    fail_on_start: bool,
    started: bool,
    releases: u32,
}

impl SimulatedTracker {
    pub fn new() -> Self {
        Self {
            camera_period: 1.0 / SIM_CAMERA_HZ as f64,
            last_frame: None,
            fail_on_start: false,
            started: false,
            releases: 0,
        }
    }

    /// A tracker whose camera can never be opened.
    pub fn unavailable() -> Self {
        Self {
            fail_on_start: true,
            ..Self::new()
        }
    }

    pub fn releases(&self) -> u32 {
        self.releases
    }

    /// Hands the script shows at `t` seconds.
    pub fn hands_at(t: f64) -> HandFrame {
        let phase = t.rem_euclid(SIM_SCRIPT_PERIOD_SEC);
        if phase < 3.0 {
            return HandFrame::new();
        }
        if phase < 6.0 {
            let curl = ((phase - 3.0) / 3.0) as f32;
            return smallvec![synthetic_hand(Vec2::new(0.5, 0.5), curl)];
        }
        let s = ((phase - 6.0) / 6.0 * std::f64::consts::TAU) as f32;
        let separation = 0.1 + 0.8 * (0.5 - 0.5 * s.cos());
        let curl = 0.5 + 0.5 * (2.0 * s).sin();
        smallvec![
            synthetic_hand(Vec2::new(0.5 - separation / 2.0, 0.5), curl),
            synthetic_hand(Vec2::new(0.5 + separation / 2.0, 0.5), curl),
        ]
    }
}

impl Default for SimulatedTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl HandTracker for SimulatedTracker {
    fn start(&mut self) -> Result<(), TrackerError> {
        if self.fail_on_start {
            return Err(TrackerError::Init("camera access denied".into()));
        }
        self.started = true;
        Ok(())
    }

    fn detect(&mut self, now_sec: f64) -> Result<Option<HandFrame>, TrackerError> {
        if !self.started {
            return Err(TrackerError::Capture("tracker not started".into()));
        }
        let frame = (now_sec / self.camera_period).floor() as u64;
        if self.last_frame == Some(frame) {
            return Ok(None);
        }
        self.last_frame = Some(frame);
        Ok(Some(Self::hands_at(now_sec)))
    }

    fn release(&mut self) {
        self.started = false;
        self.releases += 1;
    }
}
