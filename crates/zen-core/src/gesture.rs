//! Hand landmarks to gesture signals.
//!
//! The extractor is a pure function of the hands reported for one tracker
//! frame. Nothing is smoothed or carried over between frames.

use crate::constants::*;
use crate::error::CoreError;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use std::ops::Index;

/// The 21 landmarks of one tracked hand.
///
/// `x` and `y` are normalized to the camera frame (origin top-left), `z` is
/// the tracker's relative depth. Only `x`/`y` feed the extractor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkSet([Vec3; LANDMARKS_PER_HAND]);

impl LandmarkSet {
    pub fn new(points: [Vec3; LANDMARKS_PER_HAND]) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Vec3; LANDMARKS_PER_HAND] {
        &self.0
    }

    #[inline]
    fn xy(&self, index: usize) -> Vec2 {
        self.0[index].truncate()
    }

    /// Sum of wrist-to-fingertip distances in the image plane.
    pub fn openness(&self) -> f32 {
        let wrist = self.xy(WRIST);
        FINGERTIPS
            .iter()
            .map(|&tip| self.xy(tip).distance(wrist))
            .sum()
    }
}

impl TryFrom<&[Vec3]> for LandmarkSet {
    type Error = CoreError;

    fn try_from(points: &[Vec3]) -> Result<Self, Self::Error> {
        let arr: [Vec3; LANDMARKS_PER_HAND] =
            points.try_into().map_err(|_| CoreError::LandmarkCount {
                expected: LANDMARKS_PER_HAND,
                actual: points.len(),
            })?;
        Ok(Self(arr))
    }
}

impl Index<usize> for LandmarkSet {
    type Output = Vec3;

    fn index(&self, index: usize) -> &Vec3 {
        &self.0[index]
    }
}

/// Hands reported for one tracker frame.
pub type HandFrame = SmallVec<[LandmarkSet; MAX_HANDS]>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSignal {
    /// Normalized inter-hand separation, 0 together .. 1 far apart.
    pub spread_distance: f32,
    pub detected: bool,
    /// Fist clench, 0 open .. 1 closed.
    pub tension: f32,
}

impl GestureSignal {
    /// Signal used when no hands are visible or the tracker is unavailable.
    pub const REST: GestureSignal = GestureSignal {
        spread_distance: 0.0,
        detected: false,
        tension: 0.0,
    };

    /// Copy with both scalars forced into \[0, 1\]; NaN becomes 0.
    pub fn sanitized(self) -> Self {
        Self {
            spread_distance: clamp01(self.spread_distance),
            detected: self.detected,
            tension: clamp01(self.tension),
        }
    }
}

#[inline]
pub(crate) fn clamp01(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Derive the gesture signal for one tracker frame.
///
/// Only the first two hands are considered; the tracker is configured to
/// report at most two.
pub fn extract(hands: &[LandmarkSet]) -> GestureSignal {
    let hands = &hands[..hands.len().min(MAX_HANDS)];
    if hands.is_empty() {
        return GestureSignal::REST;
    }

    let spread_distance = match hands {
        [a, b] => {
            let raw = a.xy(MIDDLE_FINGER_MCP).distance(b.xy(MIDDLE_FINGER_MCP));
            clamp01((raw - SPREAD_MIN) / SPREAD_RANGE)
        }
        // one hand: separation is undefined, report neutral
        _ => SINGLE_HAND_SPREAD,
    };

    let avg_openness =
        hands.iter().map(LandmarkSet::openness).sum::<f32>() / hands.len() as f32;
    let tension = clamp01(1.0 - (avg_openness - OPENNESS_CLOSED) / OPENNESS_RANGE);

    GestureSignal {
        spread_distance,
        detected: true,
        tension,
    }
}
