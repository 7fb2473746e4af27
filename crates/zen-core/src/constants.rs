// Shared tuning constants for shape sampling, animation and gesture extraction.

// Session defaults
pub const DEFAULT_PARTICLE_COUNT: usize = 12_000;
pub const DEFAULT_COLOR_HEX: &str = "#60A5FA"; // blue-400

// Preset palette offered by the control surface
pub const PALETTE_HEX: [&str; 7] = [
    "#F87171", // red
    "#FBBF24", // amber
    "#34D399", // emerald
    "#60A5FA", // blue
    "#818CF8", // indigo
    "#F472B6", // pink
    "#FFFFFF", // white
];

// Shape extents
pub const SPHERE_RADIUS: f32 = 4.0;
pub const HEART_SCALE: f32 = 0.25;
pub const FLOWER_PETALS: f32 = 4.0;
pub const FLOWER_RADIUS: f32 = 5.0;
pub const FLOWER_CURL: f32 = 0.2; // z lift per unit of signed petal radius
pub const SATURN_RING_PROBABILITY: f32 = 0.6;
pub const SATURN_RING_INNER: f32 = 4.5;
pub const SATURN_RING_OUTER: f32 = 8.0;
pub const SATURN_RING_THICKNESS: f32 = 0.2;
pub const SATURN_PLANET_RADIUS: f32 = 3.5;
pub const SATURN_TILT: f32 = 0.4; // radians about z
pub const MEDITATE_BASE_SHARE: f32 = 0.3;
pub const MEDITATE_BODY_SHARE: f32 = 0.4;
pub const MEDITATE_HEAD_RADIUS: f32 = 1.2;
pub const MEDITATE_HEAD_LIFT: f32 = 3.0;
pub const FIREWORKS_RADIUS: f32 = 8.0;

// Animator
pub const LERP_RATE: f32 = 3.0; // fraction of remaining distance per second
pub const SPREAD_EXPANSION_GAIN: f32 = 2.5;
pub const SPREAD_EXPANSION_BASE: f32 = 0.5;
pub const BREATHE_AMPLITUDE: f32 = 0.2;
pub const JITTER_GAIN: f32 = 0.2; // jitter span at full tension
pub const ROTATION_RATE: f32 = 0.1; // radians per second at rest
pub const TENSION_SPIN_GAIN: f32 = 5.0;
pub const LIVE_RADIUS_LIMIT: f32 = 100.0; // keeps compounding expansion finite

// Gesture extraction
pub const LANDMARKS_PER_HAND: usize = 21;
pub const MAX_HANDS: usize = 2;
pub const WRIST: usize = 0;
pub const MIDDLE_FINGER_MCP: usize = 9; // hand-center proxy
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20]; // thumb .. pinky
pub const SPREAD_MIN: f32 = 0.1;
pub const SPREAD_RANGE: f32 = 0.7;
pub const SINGLE_HAND_SPREAD: f32 = 0.5;
pub const OPENNESS_CLOSED: f32 = 0.25;
pub const OPENNESS_RANGE: f32 = 0.4;
