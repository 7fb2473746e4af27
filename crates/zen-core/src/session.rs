//! Session coordinator: the one place that owns shape, color, the latest
//! gesture signal and the animator. Control-surface commands and tracker
//! output are routed through here.

use crate::animator::ParticleAnimator;
use crate::color::Color;
use crate::constants::DEFAULT_PARTICLE_COUNT;
use crate::error::CoreError;
use crate::gesture::{self, GestureSignal, LandmarkSet};
use crate::shapes::{self, ShapeKind};
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub particle_count: usize,
    /// Seed for shape sampling and jitter; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub initial_shape: ShapeKind,
    pub initial_color: Color,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: None,
            initial_shape: ShapeKind::Sphere,
            initial_color: Color::default(),
        }
    }
}

/// Discrete commands issued by the control surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SelectShape(ShapeKind),
    SelectColor(Color),
    Reset,
}

/// What the renderer needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    /// Interleaved `x, y, z` live positions.
    pub positions: &'a [f32],
    pub rotation: f32,
    pub color: Color,
    pub shape: ShapeKind,
    pub signal: GestureSignal,
}

pub struct SessionState {
    shape: ShapeKind,
    color: Color,
    signal: GestureSignal,
    animator: ParticleAnimator,
    rng: StdRng,
}

impl SessionState {
    pub fn new(config: &SessionConfig) -> Result<Self, CoreError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        // Jitter gets its own stream so reseeding one never shifts the other
        let jitter_seed = rng.gen::<u64>() ^ 0x9E37_79B9_7F4A_7C15;
        let live = shapes::sample(ShapeKind::Sphere, config.particle_count, &mut rng);
        let target = shapes::sample(config.initial_shape, config.particle_count, &mut rng);
        let animator = ParticleAnimator::new(live, target, StdRng::seed_from_u64(jitter_seed))?;
        log::info!(
            "[session] {} particles, shape={}, seeded={}",
            config.particle_count,
            config.initial_shape,
            config.seed.is_some()
        );
        Ok(Self {
            shape: config.initial_shape,
            color: config.initial_color,
            signal: GestureSignal::REST,
            animator,
            rng,
        })
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn signal(&self) -> GestureSignal {
        self.signal
    }

    pub fn particle_count(&self) -> usize {
        self.animator.len()
    }

    pub fn animator(&self) -> &ParticleAnimator {
        &self.animator
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::SelectShape(shape) => self.select_shape(shape),
            Command::SelectColor(color) => self.select_color(color),
            Command::Reset => self.reset(),
        }
    }

    /// Regenerate the target layout when the shape actually changes.
    pub fn select_shape(&mut self, shape: ShapeKind) {
        if shape == self.shape {
            return;
        }
        let target = shapes::sample(shape, self.animator.len(), &mut self.rng);
        // lengths always agree: the target is sampled at the animator's size
        if let Err(e) = self.animator.set_target(target) {
            log::error!("[session] retarget to {} failed: {}", shape, e);
            return;
        }
        log::info!("[session] shape {} -> {}", self.shape, shape);
        self.shape = shape;
    }

    pub fn select_color(&mut self, color: Color) {
        if color != self.color {
            log::info!("[session] color {}", color);
        }
        self.color = color;
    }

    /// Back to Sphere and the default color. Live positions and the gesture
    /// signal are left as they are.
    pub fn reset(&mut self) {
        log::info!("[session] reset");
        self.select_shape(ShapeKind::Sphere);
        self.select_color(Color::default());
    }

    /// Feed one tracker frame through the extractor.
    pub fn ingest_hands(&mut self, hands: &[LandmarkSet]) -> GestureSignal {
        let next = gesture::extract(hands);
        if next.detected != self.signal.detected {
            log::debug!(
                "[session] hands {}",
                if next.detected { "detected" } else { "lost" }
            );
        }
        self.signal = next;
        next
    }

    pub fn advance(&mut self, delta_time: f32) {
        self.animator.advance(delta_time, &self.signal);
    }

    pub fn frame(&self) -> FrameView<'_> {
        FrameView {
            positions: self.animator.interleaved(),
            rotation: self.animator.rotation_angle(),
            color: self.color,
            shape: self.shape,
            signal: self.signal,
        }
    }
}
