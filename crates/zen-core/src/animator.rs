//! Per-frame particle animation.
//!
//! The animator owns two equally sized buffers: the live positions handed to
//! the renderer and the target layout they blend toward. Each `advance` pulls
//! every live point a fraction of the way to its target, then scales the
//! blended point by the gesture-driven expansion and adds tension jitter.
//! The group rotation is kept as a single angle for the renderer to apply.

use crate::constants::*;
use crate::error::CoreError;
use crate::gesture::GestureSignal;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

pub struct ParticleAnimator {
    live: Vec<Vec3>,
    target: Vec<Vec3>,
    rotation: f32,
    elapsed: f64,
    rng: StdRng,
}

impl ParticleAnimator {
    pub fn new(live: Vec<Vec3>, target: Vec<Vec3>, rng: StdRng) -> Result<Self, CoreError> {
        if live.len() != target.len() {
            return Err(CoreError::BufferLength {
                expected: live.len(),
                actual: target.len(),
            });
        }
        Ok(Self {
            live: finite_or_origin(live),
            target: finite_or_origin(target),
            rotation: 0.0,
            elapsed: 0.0,
            rng,
        })
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.live
    }

    /// Live positions as `x, y, z` floats, `3 * len()` long.
    pub fn interleaved(&self) -> &[f32] {
        bytemuck::cast_slice(&self.live)
    }

    pub fn target(&self) -> &[Vec3] {
        &self.target
    }

    /// Group rotation about the vertical axis, in \[0, 2π).
    pub fn rotation_angle(&self) -> f32 {
        self.rotation
    }

    /// Seconds accumulated across all `advance` calls.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Swap in a new target layout. The live buffer is left alone and blends
    /// toward the new target on subsequent ticks.
    pub fn set_target(&mut self, new_target: Vec<Vec3>) -> Result<(), CoreError> {
        if new_target.len() != self.live.len() {
            return Err(CoreError::BufferLength {
                expected: self.live.len(),
                actual: new_target.len(),
            });
        }
        self.target = finite_or_origin(new_target);
        Ok(())
    }

    pub fn reseed_jitter(&mut self, seed: Option<u64>) {
        let new_seed = seed.unwrap_or_else(|| self.rng.gen());
        self.rng = StdRng::seed_from_u64(new_seed);
    }

    /// Expansion applied this tick: hand spread when tracked, otherwise a
    /// slow breathing pulse driven by the animator's own clock.
    pub fn expansion(&self, signal: &GestureSignal) -> f32 {
        if signal.detected {
            signal.spread_distance * SPREAD_EXPANSION_GAIN + SPREAD_EXPANSION_BASE
        } else {
            (self.elapsed.sin() as f32) * BREATHE_AMPLITUDE + 1.0
        }
    }

    pub fn advance(&mut self, delta_time: f32, signal: &GestureSignal) {
        if !(delta_time.is_finite() && delta_time > 0.0) {
            log::trace!("[animator] skipping tick with delta {}", delta_time);
            return;
        }
        let signal = signal.sanitized();
        self.elapsed += delta_time as f64;

        let lerp_speed = LERP_RATE * delta_time;
        let expansion = self.expansion(&signal);
        let tension = if signal.detected { signal.tension } else { 0.0 };
        let jitter = tension * JITTER_GAIN;

        for (live, target) in self.live.iter_mut().zip(&self.target) {
            let blended = *live + (*target - *live) * lerp_speed;
            let mut next = blended * expansion;
            if jitter > 0.0 {
                next += Vec3::new(
                    self.rng.gen::<f32>() - 0.5,
                    self.rng.gen::<f32>() - 0.5,
                    self.rng.gen::<f32>() - 0.5,
                ) * jitter;
            }
            next = next.clamp_length_max(LIVE_RADIUS_LIMIT);
            *live = if next.is_finite() { next } else { *target };
        }

        self.rotation += delta_time * ROTATION_RATE * (1.0 + tension * TENSION_SPIN_GAIN);
        if self.rotation >= TAU {
            self.rotation = self.rotation.rem_euclid(TAU);
        }
    }
}

fn finite_or_origin(mut points: Vec<Vec3>) -> Vec<Vec3> {
    for p in points.iter_mut().filter(|p| !p.is_finite()) {
        *p = Vec3::ZERO;
    }
    points
}
