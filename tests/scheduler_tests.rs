// Host-side tests for the cooperative scheduler, tracker loop and HUD.

use std::thread;
use std::time::Duration;
use zen_core::{
    Color, Command, FrameView, HandFrame, SessionConfig, SessionState, ShapeKind,
};
use zen_particles::overlay;
use zen_particles::{
    CancelToken, FrameClock, HandTracker, RunConfig, Scheduler, SimulatedTracker, StatsSink,
    TrackerError, TrackerState,
};

fn session() -> SessionState {
    SessionState::new(&SessionConfig {
        particle_count: 200,
        seed: Some(21),
        ..SessionConfig::default()
    })
    .unwrap()
}

fn scheduler<T: HandTracker>(tracker: T) -> (Scheduler<T, StatsSink>, CancelToken) {
    let cancel = CancelToken::new();
    let s = Scheduler::new(
        session(),
        tracker,
        StatsSink::default(),
        &RunConfig::default(),
        cancel.clone(),
    )
    .unwrap();
    (s, cancel)
}

/// Drive `step` with synthetic time from `from` to `to` seconds.
fn drive<T: HandTracker, S: zen_particles::FrameSink>(
    s: &mut Scheduler<T, S>,
    from: f64,
    to: f64,
) {
    let dt = 1.0 / 480.0;
    let mut t = from;
    while t < to {
        assert!(s.step(t));
        t += dt;
    }
}

/// Tracker that works for a few frames and then loses its camera.
struct FlakyTracker {
    good_frames: u32,
    releases: u32,
}

impl HandTracker for FlakyTracker {
    fn start(&mut self) -> Result<(), TrackerError> {
        Ok(())
    }

    fn detect(&mut self, now_sec: f64) -> Result<Option<HandFrame>, TrackerError> {
        if self.good_frames == 0 {
            return Err(TrackerError::Capture("device unplugged".into()));
        }
        self.good_frames -= 1;
        Ok(Some(SimulatedTracker::hands_at(now_sec + 6.0)))
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}

#[test]
fn frame_clock_fires_at_configured_rate() {
    let mut clock = FrameClock::new(60.0);
    assert!((clock.period() - 1.0 / 60.0).abs() < 1e-9);
    // the first firing reports one nominal period
    assert_eq!(clock.poll(0.0), Some(clock.period() as f32));
    let mut fired = 1;
    let mut t = 0.0;
    while t < 1.0 {
        t += 0.001;
        if clock.poll(t).is_some() {
            fired += 1;
        }
    }
    assert!((59..=61).contains(&fired), "fired {fired}");
}

#[test]
fn frame_clock_skips_missed_frames_instead_of_bursting() {
    let mut clock = FrameClock::new(10.0);
    assert!(clock.poll(0.0).is_some());
    let dt = clock.poll(5.0).unwrap();
    assert!((dt - 5.0).abs() < 1e-6);
    assert!(clock.poll(5.01).is_none());
    assert!(clock.next_due() > 5.0);
}

#[test]
fn animation_outpaces_tracker() {
    let (mut s, _cancel) = scheduler(SimulatedTracker::new());
    drive(&mut s, 0.0, 2.0);
    let summary = s.summary();
    assert!((118..=122).contains(&summary.frames), "{summary:?}");
    assert!((58..=62).contains(&summary.tracker_polls), "{summary:?}");
    assert_eq!(s.sink().frames, summary.frames);
    assert_eq!(s.sink().particles, 200);
    assert_eq!(s.sink().non_finite, 0);
}

#[test]
fn simulated_script_reaches_the_session() {
    let (mut s, _cancel) = scheduler(SimulatedTracker::new());
    drive(&mut s, 0.0, 1.0);
    assert!(!s.session().signal().detected);
    drive(&mut s, 1.0, 4.0);
    let one = s.session().signal();
    assert!(one.detected);
    assert_eq!(one.spread_distance, 0.5);
    drive(&mut s, 4.0, 9.5);
    assert!(s.session().signal().detected);
    assert!(s.tracker().frames() > 0);
}

#[test]
fn cancellation_releases_tracker_exactly_once() {
    let (mut s, cancel) = scheduler(SimulatedTracker::new());
    drive(&mut s, 0.0, 0.5);
    assert_eq!(s.tracker().state(), TrackerState::Running);
    cancel.cancel();
    assert!(!s.step(0.6));
    assert!(!s.step(0.7));
    assert_eq!(s.tracker().state(), TrackerState::Released);
    assert_eq!(s.tracker().tracker().releases(), 1);
}

#[test]
fn unavailable_tracker_degrades_to_rest_signal() {
    let (mut s, cancel) = scheduler(SimulatedTracker::unavailable());
    drive(&mut s, 0.0, 5.0);
    assert_eq!(s.tracker().state(), TrackerState::Unavailable);
    assert!(!s.session().signal().detected);
    assert!(s.summary().frames > 250);
    cancel.cancel();
    assert!(!s.step(5.1));
    // never started, so nothing was released
    assert_eq!(s.tracker().tracker().releases(), 0);
}

#[test]
fn tracker_failure_mid_run_keeps_animating() {
    let (mut s, cancel) = scheduler(FlakyTracker {
        good_frames: 5,
        releases: 0,
    });
    drive(&mut s, 0.0, 0.1);
    assert!(s.session().signal().detected);
    drive(&mut s, 0.1, 1.0);
    assert_eq!(s.tracker().state(), TrackerState::Failed);
    assert!(!s.session().signal().detected);
    let frames = s.summary().frames;
    drive(&mut s, 1.0, 1.5);
    assert!(s.summary().frames > frames);
    cancel.cancel();
    s.step(1.6);
    assert_eq!(s.tracker().tracker().releases, 1);
}

#[test]
fn commands_are_applied_on_next_step() {
    let (mut s, _cancel) = scheduler(SimulatedTracker::new());
    let tx = s.commands();
    tx.send(Command::SelectShape(ShapeKind::Heart)).unwrap();
    assert_eq!(s.session().shape(), ShapeKind::Sphere);
    s.step(0.0);
    assert_eq!(s.session().shape(), ShapeKind::Heart);
    tx.send(Command::Reset).unwrap();
    s.step(0.01);
    assert_eq!(s.session().shape(), ShapeKind::Sphere);
}

#[test]
fn sink_receives_the_selected_tint() {
    let (mut s, _cancel) = scheduler(SimulatedTracker::new());
    s.step(0.0);
    assert_eq!(s.sink().tint, Color::default().to_rgb_f32());
    let pink: Color = "#F472B6".parse().unwrap();
    s.commands().send(Command::SelectColor(pink)).unwrap();
    s.step(0.02);
    assert_eq!(s.sink().tint, pink.to_rgb_f32());
}

#[test]
fn long_stalls_are_clamped_before_advancing() {
    let (mut s, _cancel) = scheduler(SimulatedTracker::unavailable());
    s.step(0.0);
    s.step(30.0);
    s.step(60.0);
    let elapsed = s.session().animator().elapsed();
    // first frame reports one nominal period, the two stalls are capped
    assert!(elapsed <= 1.0 / 60.0 + 2.0 * 0.1 + 1e-6, "elapsed {elapsed}");
    assert_eq!(s.sink().non_finite, 0);
}

#[test]
fn closure_sink_sees_every_frame() {
    let mut seen = Vec::new();
    {
        let sink = |frame: &FrameView<'_>| seen.push(frame.positions.len());
        let mut s = Scheduler::new(
            session(),
            SimulatedTracker::new(),
            sink,
            &RunConfig::default(),
            CancelToken::new(),
        )
        .unwrap();
        drive(&mut s, 0.0, 0.5);
    }
    assert!(!seen.is_empty());
    assert!(seen.iter().all(|&n| n == 600));
}

#[test]
fn run_returns_once_cancelled_from_another_thread() {
    let (mut s, cancel) = scheduler(SimulatedTracker::new());
    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(150));
        cancel.cancel();
    });
    let summary = s.run();
    stopper.join().unwrap();
    assert!(summary.frames > 0);
    assert_eq!(s.tracker().tracker().releases(), 1);
}

#[test]
fn invalid_rates_are_rejected() {
    let bad = RunConfig {
        tracker_hz: 120.0,
        ..RunConfig::default()
    };
    assert!(Scheduler::new(
        session(),
        SimulatedTracker::new(),
        StatsSink::default(),
        &bad,
        CancelToken::new()
    )
    .is_err());
    let zero = RunConfig {
        animation_hz: 0.0,
        ..RunConfig::default()
    };
    assert!(zero.validate().is_err());
    assert!(RunConfig::default().validate().is_ok());
}

#[test]
fn status_line_mirrors_gauges() {
    let mut s = session();
    let waiting = overlay::status_line(&s);
    assert!(waiting.starts_with(overlay::BANNER_WAITING));
    assert!(waiting.contains("[----------]"));
    assert!(waiting.ends_with(overlay::HINT_WAITING));

    s.ingest_hands(&SimulatedTracker::hands_at(4.0));
    let active = overlay::status_line(&s);
    assert!(active.starts_with(overlay::BANNER_TRACKING));
    // one hand: scale gauge sits at the neutral 50%
    assert!(active.contains("Scale [#####-----]  50%"));
    assert!(active.contains("Sphere #60A5FA"));
}

#[test]
fn bars_round_and_clamp() {
    assert_eq!(overlay::bar(0.0, 4), "[----]");
    assert_eq!(overlay::bar(0.5, 4), "[##--]");
    assert_eq!(overlay::bar(2.0, 4), "[####]");
    assert_eq!(overlay::bar(f32::NAN, 4), "[----]");
}
