//! Foliage: thousands of points blended on the GPU.
//!
//! The host keeps a single `progress` scalar (1 formed, 0 chaos) and eases it
//! toward the mode's target every frame; all points share it. The functions
//! below mirror `shaders/foliage.wgsl` line for line so the per-point math can
//! be checked without a GPU.

use crate::animation::blend_scalar;
use crate::buffers::FoliagePoint;
use crate::constants::{
    CHAOS_WOBBLE_AMPLITUDE, POINT_ALPHA_BASE, POINT_ALPHA_SPAN, POINT_SIZE_PX, SWIRL_RATE,
};
use crate::distribution::DualPositions;
use crate::mode::TreeMode;
use glam::{Quat, Vec3};

/// Generated foliage positions in upload layout.
#[derive(Clone, Debug, Default)]
pub struct FoliageCloud {
    points: Vec<FoliagePoint>,
}

impl FoliageCloud {
    pub fn from_positions(positions: &DualPositions) -> Self {
        let points = positions
            .formed
            .iter()
            .zip(&positions.chaos)
            .map(|(f, c)| FoliagePoint {
                formed: f.to_array(),
                chaos: c.to_array(),
            })
            .collect();
        Self { points }
    }

    /// Uploaded once; the positions never change during a session.
    #[inline]
    pub fn points(&self) -> &[FoliagePoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The shared blend scalar.
#[derive(Clone, Debug, PartialEq)]
pub struct FoliageBlend {
    progress: f32,
    rate: f32,
}

impl FoliageBlend {
    pub fn new(initial: TreeMode, rate: f32) -> Self {
        Self {
            progress: initial.progress_target(),
            rate,
        }
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn step(&mut self, mode: TreeMode) -> f32 {
        self.progress = blend_scalar(self.progress, mode.progress_target(), self.rate)
            .clamp(0.0, 1.0);
        self.progress
    }
}

/// Chaos position rotated about +Y by the swirl angle at time `t`.
#[inline]
pub fn swirl(chaos: Vec3, t: f32) -> Vec3 {
    Quat::from_rotation_y(-t * SWIRL_RATE) * chaos
}

/// Final position of one point.
pub fn resolve_point(formed: Vec3, chaos: Vec3, progress: f32, t: f32) -> Vec3 {
    let mut p = swirl(chaos, t).lerp(formed, progress);
    p.y += (t + p.x * 0.5).sin() * CHAOS_WOBBLE_AMPLITUDE * (1.0 - progress);
    p
}

/// Size multiplier keyed on time and the point's sequential index.
#[inline]
pub fn size_factor(t: f32, index: u32) -> f32 {
    0.8 + 0.5 * (t + index as f32).sin()
}

/// On-screen diameter in pixels at view depth `depth`.
#[inline]
pub fn point_size_px(depth: f32, t: f32, index: u32) -> f32 {
    POINT_SIZE_PX / depth.max(1e-3) * size_factor(t, index)
}

/// Overall opacity; points firm up as the tree forms.
#[inline]
pub fn point_alpha(progress: f32) -> f32 {
    POINT_ALPHA_BASE + POINT_ALPHA_SPAN * progress
}
