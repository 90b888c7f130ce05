// Integration tests for the position generator.

use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;
use tree_core::distribution::*;

fn cone() -> ConeEnvelope {
    ConeEnvelope {
        height: 12.0,
        base_radius: 5.0,
        radius_scale: 1.0,
        y_inset: 0.0,
    }
}

fn horizontal_radius(p: Vec3) -> f32 {
    (p.x * p.x + p.z * p.z).sqrt()
}

#[test]
fn radius_shrinks_linearly_to_the_tip() {
    let c = cone();
    assert!((c.radius_at(0.0) - 5.0).abs() < 1e-6);
    assert!((c.radius_at(6.0) - 2.5).abs() < 1e-6);
    assert!(c.radius_at(12.0).abs() < 1e-6);

    let scaled = ConeEnvelope {
        radius_scale: 0.8,
        ..c
    };
    assert!((scaled.radius_at(0.0) - 4.0).abs() < 1e-6);
}

#[test]
fn formed_points_lie_on_the_cone() {
    let mut rng = StdRng::seed_from_u64(7);
    let c = ConeEnvelope {
        radius_scale: 0.95,
        y_inset: 0.5,
        ..cone()
    };
    for _ in 0..2000 {
        let p = c.sample(&mut rng);
        assert!(p.y >= 0.5 && p.y <= 11.5, "y out of range: {}", p.y);
        let expected = (1.0 - p.y / 12.0) * 5.0 * 0.95;
        assert!((horizontal_radius(p) - expected).abs() < 1e-4);
    }
}

#[test]
fn evenly_spaced_azimuths() {
    assert_eq!(even_azimuth(0, 24), 0.0);
    assert!((even_azimuth(6, 24) - TAU / 4.0).abs() < 1e-6);
    assert_eq!(even_azimuth(3, 0), 0.0);

    let mut rng = StdRng::seed_from_u64(3);
    let dual = generate(
        &mut rng,
        8,
        &cone(),
        &ChaosEnvelope::Cube { half_extent: 10.0 },
        Azimuth::EvenlySpaced,
    );
    for (i, p) in dual.formed.iter().enumerate() {
        let theta = p.z.atan2(p.x).rem_euclid(TAU);
        let expected = i as f32 / 8.0 * TAU;
        let diff = (theta - expected).abs();
        assert!(diff < 1e-3 || (TAU - diff) < 1e-3, "slot {i}: {theta} vs {expected}");
    }
}

#[test]
fn shell_samples_stay_in_the_shell() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut min_seen = f32::MAX;
    let mut max_seen = 0.0f32;
    for _ in 0..5000 {
        let d = shell_point(&mut rng, 25.0, 0.3).length();
        min_seen = min_seen.min(d);
        max_seen = max_seen.max(d);
    }
    assert!(min_seen >= 7.5 - 1e-3);
    assert!(max_seen <= 25.0 + 1e-3);
    // The range is actually used, not collapsed to one radius.
    assert!(max_seen - min_seen > 10.0);
}

#[test]
fn shell_directions_cover_both_hemispheres() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut above = 0;
    let n = 4000;
    for _ in 0..n {
        if shell_point(&mut rng, 1.0, 0.3).z > 0.0 {
            above += 1;
        }
    }
    let frac = above as f32 / n as f32;
    assert!((0.45..0.55).contains(&frac), "hemisphere split {frac}");
}

#[test]
fn cube_samples_stay_in_the_cube() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..5000 {
        let p = cube_point(&mut rng, 17.5);
        for v in p.to_array() {
            assert!((-17.5..17.5).contains(&v), "{v}");
        }
    }
}

#[test]
fn generate_is_index_aligned_and_sized() {
    let mut rng = StdRng::seed_from_u64(1);
    let dual = generate(
        &mut rng,
        100,
        &cone(),
        &ChaosEnvelope::Shell {
            radius: 25.0,
            min_frac: 0.3,
        },
        Azimuth::Random,
    );
    assert_eq!(dual.formed.len(), 100);
    assert_eq!(dual.chaos.len(), 100);
    assert_eq!(dual.len(), 100);

    let empty = generate(
        &mut rng,
        0,
        &cone(),
        &ChaosEnvelope::Cube { half_extent: 1.0 },
        Azimuth::Random,
    );
    assert!(empty.is_empty());
}

#[test]
fn same_seed_same_positions() {
    let env = ChaosEnvelope::Cube { half_extent: 5.0 };
    let a = generate(&mut StdRng::seed_from_u64(9), 50, &cone(), &env, Azimuth::Random);
    let b = generate(&mut StdRng::seed_from_u64(9), 50, &cone(), &env, Azimuth::Random);
    assert_eq!(a.formed, b.formed);
    assert_eq!(a.chaos, b.chaos);
}
