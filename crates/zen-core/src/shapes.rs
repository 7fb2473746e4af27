//! Procedural point-cloud samplers, one per shape archetype.
//!
//! Every draw is independent. The random source is injected so callers can
//! seed it for reproducible layouts; production code hands in an
//! entropy-seeded `StdRng`.

use crate::constants::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    #[default]
    Sphere,
    Heart,
    Flower,
    Saturn,
    Meditate,
    Fireworks,
}

impl ShapeKind {
    /// All shapes in control-surface order.
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Sphere,
        ShapeKind::Heart,
        ShapeKind::Flower,
        ShapeKind::Saturn,
        ShapeKind::Meditate,
        ShapeKind::Fireworks,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Heart => "Heart",
            ShapeKind::Flower => "Flower",
            ShapeKind::Saturn => "Saturn",
            ShapeKind::Meditate => "Meditate",
            ShapeKind::Fireworks => "Fireworks",
        }
    }

    /// Case-insensitive lookup. Unknown names fall back to `Sphere`.
    pub fn from_name(name: &str) -> ShapeKind {
        let name = name.trim();
        ShapeKind::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
            .unwrap_or_else(|| {
                log::debug!("[shapes] unknown shape {:?}, using Sphere", name);
                ShapeKind::Sphere
            })
    }

    /// Next shape in control-surface order, wrapping around.
    pub fn next(self) -> ShapeKind {
        let i = ShapeKind::ALL.iter().position(|s| *s == self).unwrap_or(0);
        ShapeKind::ALL[(i + 1) % ShapeKind::ALL.len()]
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ShapeKind::from_name(s))
    }
}

/// Sample `count` fresh points for `shape`.
pub fn sample<R: Rng + ?Sized>(shape: ShapeKind, count: usize, rng: &mut R) -> Vec<Vec3> {
    (0..count).map(|_| sample_point(shape, rng)).collect()
}

/// Overwrite `out` in place with fresh points for `shape`.
pub fn sample_into<R: Rng + ?Sized>(shape: ShapeKind, out: &mut [Vec3], rng: &mut R) {
    for p in out.iter_mut() {
        *p = sample_point(shape, rng);
    }
}

pub fn sample_point<R: Rng + ?Sized>(shape: ShapeKind, rng: &mut R) -> Vec3 {
    match shape {
        ShapeKind::Sphere => ball(SPHERE_RADIUS, rng),
        ShapeKind::Heart => heart(rng),
        ShapeKind::Flower => flower(rng),
        ShapeKind::Saturn => saturn(rng),
        ShapeKind::Meditate => meditate(rng),
        ShapeKind::Fireworks => ball(FIREWORKS_RADIUS, rng),
    }
}

// Uniform in volume: cube-root radius, acos-distributed polar angle.
#[inline]
fn ball<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec3 {
    let r = radius * rng.gen::<f32>().cbrt();
    let theta = TAU * rng.gen::<f32>();
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

fn heart<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let t = TAU * rng.gen::<f32>();
    let hx = 16.0 * t.sin().powi(3);
    let hy = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    let depth = 2.0 * (rng.gen::<f32>() - 0.5);
    // thickness follows the curve parameter: fat lobes, thin tip
    let z = depth * (2.0 + t.cos()) * HEART_SCALE * 2.0;
    Vec3::new(hx * HEART_SCALE, hy * HEART_SCALE, z)
}

fn flower<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = TAU * rng.gen::<f32>();
    // signed radius; negative lobes fill the opposite petals
    let radius = FLOWER_RADIUS * (FLOWER_PETALS * theta).cos();
    let depth = 2.0 * (rng.gen::<f32>() - 0.5);
    Vec3::new(
        radius * theta.cos(),
        radius * theta.sin(),
        depth + radius * FLOWER_CURL,
    )
}

fn saturn<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let p = if rng.gen::<f32>() < SATURN_RING_PROBABILITY {
        let r = SATURN_RING_INNER + rng.gen::<f32>() * (SATURN_RING_OUTER - SATURN_RING_INNER);
        let theta = TAU * rng.gen::<f32>();
        let y = (rng.gen::<f32>() - 0.5) * SATURN_RING_THICKNESS;
        Vec3::new(r * theta.cos(), y, r * theta.sin())
    } else {
        ball(SATURN_PLANET_RADIUS, rng)
    };
    let (sin, cos) = SATURN_TILT.sin_cos();
    Vec3::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos, p.z)
}

fn meditate<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let part = rng.gen::<f32>();
    if part < MEDITATE_BASE_SHARE {
        // crossed legs: flattened half-disc under the body
        let r = 3.5 * rng.gen::<f32>().sqrt();
        let theta = PI * rng.gen::<f32>();
        let y = 1.5 * (rng.gen::<f32>() - 0.5) - 3.0;
        Vec3::new(r * (2.0 * theta).cos(), y, 0.5 * r * (2.0 * theta).sin())
    } else if part < MEDITATE_BASE_SHARE + MEDITATE_BODY_SHARE {
        let r = 2.0 * rng.gen::<f32>();
        let theta = TAU * rng.gen::<f32>();
        let y = 4.0 * (rng.gen::<f32>() - 0.5);
        Vec3::new(r * theta.cos(), y, 0.8 * r * theta.sin())
    } else {
        ball(MEDITATE_HEAD_RADIUS, rng) + Vec3::Y * MEDITATE_HEAD_LIFT
    }
}
