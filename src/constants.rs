// Host runtime tuning: loop rates, delta clamping and the status HUD.

// Loop rates
pub const DEFAULT_ANIMATION_HZ: f32 = 60.0;
pub const DEFAULT_TRACKER_HZ: f32 = 30.0; // tracker never outpaces the renderer

// Deltas above 1/3 s overshoot the blend; clamp well below that
pub const MAX_FRAME_DT: f32 = 0.1;

// Longest single sleep in `Scheduler::run`, so cancellation is noticed quickly
pub const MAX_IDLE_SLEEP_SEC: f64 = 0.05;

// Status HUD
pub const STATUS_INTERVAL_SEC: f32 = 1.0;
pub const HUD_BAR_WIDTH: usize = 10;

// Simulated tracker
pub const SIM_CAMERA_HZ: f32 = 30.0;
pub const SIM_SCRIPT_PERIOD_SEC: f64 = 12.0;
pub const SIM_PALM_LENGTH: f32 = 0.12; // wrist to knuckles, normalized image units
pub const SIM_REACH_OPEN: f32 = 0.45; // wrist to fingertip, open hand
pub const SIM_REACH_FIST: f32 = 0.04;
// fan of finger directions from vertical, radians (thumb .. pinky)
pub const SIM_FINGER_ANGLES: [f32; 5] = [-1.05, -0.44, 0.0, 0.44, 0.87];
