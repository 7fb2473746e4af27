// Host-side tests for the procedural shape samplers.

use rand::rngs::StdRng;
use rand::SeedableRng;
use zen_core::{sample, ShapeKind};

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5EED)
}

#[test]
fn every_shape_returns_exactly_count_finite_points() {
    let mut rng = rng();
    for shape in ShapeKind::ALL {
        for count in [0usize, 1, 1000] {
            let pts = sample(shape, count, &mut rng);
            assert_eq!(pts.len(), count, "{shape} returned wrong count");
            assert!(
                pts.iter().all(|p| p.is_finite()),
                "{shape} produced a non-finite point"
            );
        }
    }
}

#[test]
fn sphere_points_stay_inside_radius_four() {
    let pts = sample(ShapeKind::Sphere, 100, &mut rng());
    assert_eq!(pts.len(), 100);
    for p in &pts {
        assert!(p.length() <= 4.0 + 1e-4, "point {p} outside sphere");
    }
}

#[test]
fn sphere_fills_volume_uniformly() {
    // uniform in volume <=> r^3 uniform on [0, 64]
    const BINS: usize = 8;
    const N: usize = 40_000;
    let pts = sample(ShapeKind::Sphere, N, &mut rng());
    let mut hist = [0usize; BINS];
    for p in &pts {
        let u = (p.length().powi(3) / 64.0).clamp(0.0, 0.999_999);
        hist[(u * BINS as f32) as usize] += 1;
    }
    let expected = (N / BINS) as f32;
    for (i, count) in hist.iter().enumerate() {
        let dev = (*count as f32 - expected).abs() / expected;
        assert!(dev < 0.08, "bin {i} has {count}, expected ~{expected}");
    }
}

#[test]
fn heart_stays_within_curve_bounds() {
    let pts = sample(ShapeKind::Heart, 5000, &mut rng());
    for p in &pts {
        assert!(p.x.abs() <= 4.0 + 1e-4);
        // |depth| <= 1 and (2 + cos t) <= 3, scaled by 0.25 * 2
        assert!(p.z.abs() <= 1.5 + 1e-4);
        // hy spans roughly [-17, 11.93] before scaling
        assert!(p.y >= -17.0 * 0.25 - 1e-3 && p.y <= 11.93 * 0.25 + 1e-3);
    }
}

#[test]
fn flower_petals_use_signed_radius() {
    let pts = sample(ShapeKind::Flower, 5000, &mut rng());
    for p in &pts {
        assert!(p.truncate().length() <= 5.0 + 1e-4);
        assert!(p.z.abs() <= 2.0 + 1e-4);
    }
}

#[test]
fn saturn_mixes_ring_and_planet() {
    const N: usize = 10_000;
    let pts = sample(ShapeKind::Saturn, N, &mut rng());
    let mut ring = 0usize;
    for p in &pts {
        // the tilt is a rotation, so distances from the origin are preserved
        let r = p.length();
        assert!(r <= (8.0f32 * 8.0 + 0.01).sqrt() + 1e-3);
        if r > 3.5 + 1e-3 {
            ring += 1;
        }
    }
    let share = ring as f32 / N as f32;
    assert!((share - 0.6).abs() < 0.03, "ring share {share}");
}

#[test]
fn saturn_ring_is_tilted_about_z() {
    let pts = sample(ShapeKind::Saturn, 4000, &mut rng());
    // ring points: undo the tilt and the disc must be thin in y
    let (sin, cos) = 0.4f32.sin_cos();
    for p in pts.iter().filter(|p| p.length() > 4.5) {
        let y = -p.x * sin + p.y * cos;
        assert!(y.abs() <= 0.1 + 1e-4, "ring point {p} too thick");
    }
}

#[test]
fn fireworks_reach_radius_eight() {
    let pts = sample(ShapeKind::Fireworks, 5000, &mut rng());
    assert!(pts.iter().all(|p| p.length() <= 8.0 + 1e-3));
    assert!(pts.iter().any(|p| p.length() > 7.0));
}

#[test]
fn meditate_parts_have_expected_shares() {
    const N: usize = 10_000;
    let pts = sample(ShapeKind::Meditate, N, &mut rng());
    let base = pts.iter().filter(|p| p.y < -2.2).count() as f32 / N as f32;
    assert!((base - 0.3).abs() < 0.03, "base share {base}");
    for p in pts.iter().filter(|p| p.y < -2.2) {
        assert!(p.x.abs() <= 3.5 + 1e-4);
        assert!(p.z.abs() <= 1.75 + 1e-4);
    }
}
