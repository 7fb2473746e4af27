//! Renderer boundary.
//!
//! Drawing is left to whoever implements [`FrameSink`]; the runtime only
//! hands over the interleaved live positions, the group rotation and the
//! tint once per animation frame.

use zen_core::FrameView;

pub trait FrameSink {
    fn present(&mut self, frame: &FrameView<'_>);
}

impl<F: FnMut(&FrameView<'_>)> FrameSink for F {
    fn present(&mut self, frame: &FrameView<'_>) {
        (self)(frame)
    }
}

/// Headless sink that keeps summary statistics of what it was shown.
#[derive(Clone, Debug, Default)]
pub struct StatsSink {
    pub frames: u64,
    pub particles: usize,
    pub mean_radius: f32,
    pub max_radius: f32,
    pub rotation: f32,
    /// Normalized tint of the most recent frame.
    pub tint: [f32; 3],
    pub non_finite: usize,
}

impl FrameSink for StatsSink {
    fn present(&mut self, frame: &FrameView<'_>) {
        let mut sum = 0.0f32;
        let mut max = 0.0f32;
        let mut bad = 0usize;
        for p in frame.positions.chunks_exact(3) {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            if !r.is_finite() {
                bad += 1;
                continue;
            }
            sum += r;
            max = max.max(r);
        }
        let n = frame.positions.len() / 3;
        self.frames += 1;
        self.particles = n;
        self.mean_radius = if n > bad { sum / (n - bad) as f32 } else { 0.0 };
        self.max_radius = max;
        self.rotation = frame.rotation;
        self.tint = frame.color.to_rgb_f32();
        self.non_finite += bad;
    }
}
