//! Procedural placement of the two positions every element carries.
//!
//! Formed positions sit on a cone standing on y = 0 with its tip at the tree
//! height. Chaos positions fill either an outward-biased spherical shell
//! (foliage) or an axis-aligned cube (everything else).

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Conical envelope of one element category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConeEnvelope {
    pub height: f32,
    pub base_radius: f32,
    /// Per-category multiplier on `base_radius`.
    pub radius_scale: f32,
    /// Keeps samples away from the base and the tip: y ∈ [inset, height - inset].
    pub y_inset: f32,
}

impl ConeEnvelope {
    #[inline]
    pub fn radius_at(&self, y: f32) -> f32 {
        (1.0 - y / self.height) * self.base_radius * self.radius_scale
    }

    #[inline]
    pub fn y_range(&self) -> (f32, f32) {
        (self.y_inset, self.height - self.y_inset)
    }

    /// Point on the cone surface at height `y` and azimuth `theta`.
    #[inline]
    pub fn position(&self, y: f32, theta: f32) -> Vec3 {
        let r = self.radius_at(y);
        Vec3::new(theta.cos() * r, y, theta.sin() * r)
    }

    pub fn sample_height<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let (lo, hi) = self.y_range();
        lo + rng.gen::<f32>() * (hi - lo)
    }

    /// Uniform height, uniform azimuth.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let y = self.sample_height(rng);
        let theta = rng.gen::<f32>() * TAU;
        self.position(y, theta)
    }
}

/// Azimuth of slot `index` out of `count` evenly spaced slots.
#[inline]
pub fn even_azimuth(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    index as f32 / count as f32 * TAU
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChaosEnvelope {
    /// Uniform direction, distance in [min_frac, 1] * radius.
    Shell {
        radius: f32,
        min_frac: f32,
    },
    /// Independent uniform per axis in [-half_extent, half_extent).
    Cube { half_extent: f32 },
}

impl ChaosEnvelope {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        match *self {
            ChaosEnvelope::Shell { radius, min_frac } => shell_point(rng, radius, min_frac),
            ChaosEnvelope::Cube { half_extent } => cube_point(rng, half_extent),
        }
    }
}

/// `phi = acos(2u - 1)` keeps directions uniform over the sphere instead of
/// bunching at the poles.
pub fn shell_point<R: Rng + ?Sized>(rng: &mut R, radius: f32, min_frac: f32) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let dist = (min_frac + (1.0 - min_frac) * rng.gen::<f32>()) * radius;
    Vec3::new(
        dist * phi.sin() * theta.cos(),
        dist * phi.sin() * theta.sin(),
        dist * phi.cos(),
    )
}

pub fn cube_point<R: Rng + ?Sized>(rng: &mut R, half_extent: f32) -> Vec3 {
    let mut axis = || (rng.gen::<f32>() - 0.5) * 2.0 * half_extent;
    Vec3::new(axis(), axis(), axis())
}

/// Formed and chaos positions for `count` elements, index-aligned.
#[derive(Clone, Debug, Default)]
pub struct DualPositions {
    pub formed: Vec<Vec3>,
    pub chaos: Vec<Vec3>,
}

impl DualPositions {
    #[inline]
    pub fn len(&self) -> usize {
        self.formed.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.formed.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Azimuth {
    Random,
    EvenlySpaced,
}

pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    cone: &ConeEnvelope,
    chaos: &ChaosEnvelope,
    azimuth: Azimuth,
) -> DualPositions {
    let mut formed = Vec::with_capacity(count);
    let mut scattered = Vec::with_capacity(count);
    for i in 0..count {
        let p = match azimuth {
            Azimuth::Random => cone.sample(rng),
            Azimuth::EvenlySpaced => {
                let y = cone.sample_height(rng);
                cone.position(y, even_azimuth(i, count))
            }
        };
        formed.push(p);
        scattered.push(chaos.sample(rng));
    }
    DualPositions {
        formed,
        chaos: scattered,
    }
}
