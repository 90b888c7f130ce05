//! Host-side per-element animation for the low-count categories.
//!
//! Each frame every element moves a fixed fraction (`blend_rate`) of the
//! remaining way toward whichever target the mode selects. Secondary motion
//! (float, pulse) is applied only to the emitted transform and never written
//! back into the blended state.

use crate::buffers::InstanceRaw;
use crate::element::{Element, Photo};
use crate::mode::TreeMode;
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::PI;

#[inline]
pub fn blend_step(current: Vec3, target: Vec3, rate: f32) -> Vec3 {
    current + (target - current) * rate
}

#[inline]
pub fn blend_scalar(current: f32, target: f32, rate: f32) -> f32 {
    current + (target - current) * rate
}

/// Number of steps at `rate` until the residual falls below `fraction` of the
/// starting distance: smallest k with (1 - rate)^k <= fraction.
pub fn steps_to_residual(rate: f32, fraction: f32) -> u32 {
    if rate >= 1.0 {
        return 1;
    }
    if rate <= 0.0 || fraction <= 0.0 {
        return u32::MAX;
    }
    (fraction.ln() / (1.0 - rate).ln()).ceil() as u32
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SecondaryMotion {
    None,
    /// `y += sin(t + id) * amplitude`
    Float { amplitude: f32 },
    /// `scale = size * (base + amplitude * sin(t * freq + id))`
    Pulse { freq: f32, base: f32, amplitude: f32 },
}

impl SecondaryMotion {
    #[inline]
    pub fn offset(&self, t: f32, id: u32) -> Vec3 {
        match *self {
            SecondaryMotion::Float { amplitude } => Vec3::Y * ((t + id as f32).sin() * amplitude),
            _ => Vec3::ZERO,
        }
    }

    #[inline]
    pub fn scale(&self, size: f32, t: f32, id: u32) -> f32 {
        match *self {
            SecondaryMotion::Pulse {
                freq,
                base,
                amplitude,
            } => size * (base + amplitude * (t * freq + id as f32).sin()),
            _ => size,
        }
    }
}

/// Ornaments or lights: immutable elements plus their blended positions.
#[derive(Clone, Debug)]
pub struct ElementSet {
    elements: Vec<Element>,
    current: Vec<Vec3>,
    motion: SecondaryMotion,
    instances: Vec<InstanceRaw>,
}

impl ElementSet {
    /// Elements start at their chaos positions.
    pub fn new(elements: Vec<Element>, motion: SecondaryMotion) -> Self {
        let current = elements.iter().map(|e| e.chaos).collect();
        let instances = Vec::with_capacity(elements.len());
        Self {
            elements,
            current,
            motion,
            instances,
        }
    }

    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[inline]
    pub fn current_positions(&self) -> &[Vec3] {
        &self.current
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn motion(&self) -> SecondaryMotion {
        self.motion
    }

    /// Advance every blended position one frame toward the mode's target.
    pub fn step(&mut self, mode: TreeMode) {
        let formed = mode == TreeMode::Formed;
        for (cur, e) in self.current.iter_mut().zip(&self.elements) {
            *cur = blend_step(*cur, e.target(formed), e.blend_rate);
        }
    }

    /// Rebuild the instance buffer from the current state at time `t`.
    pub fn write_instances(&mut self, t: f32) -> &[InstanceRaw] {
        self.instances.clear();
        for (cur, e) in self.current.iter().zip(&self.elements) {
            let pos = *cur + self.motion.offset(t, e.id);
            let scale = self.motion.scale(e.size, t, e.id);
            let model = Mat4::from_scale_rotation_translation(
                Vec3::splat(scale),
                Quat::IDENTITY,
                pos,
            );
            self.instances.push(InstanceRaw::new(model, e.color));
        }
        &self.instances
    }

    pub fn advance(&mut self, mode: TreeMode, t: f32) -> &[InstanceRaw] {
        self.step(mode);
        self.write_instances(t)
    }

    #[inline]
    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }
}

/// Random tumble orientation used as the rotation target while scattered.
pub fn tumble_rotation<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, 0.0)
}

#[inline]
pub fn euler_quat(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

/// Photo panels: positions and XYZ rotations blended per frame. While
/// scattered the rotation target is re-drawn every frame, so panels tumble.
#[derive(Clone, Debug)]
pub struct PhotoSet {
    photos: Vec<Photo>,
    current_pos: Vec<Vec3>,
    current_rot: Vec<Vec3>,
    motion: SecondaryMotion,
    color: [f32; 4],
    rng: StdRng,
    instances: Vec<InstanceRaw>,
}

impl PhotoSet {
    pub fn new(photos: Vec<Photo>, motion: SecondaryMotion, color: [f32; 4], seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let current_pos = photos.iter().map(|p| p.chaos).collect();
        let current_rot = photos.iter().map(|_| tumble_rotation(&mut rng)).collect();
        let instances = Vec::with_capacity(photos.len());
        Self {
            photos,
            current_pos,
            current_rot,
            motion,
            color,
            rng,
            instances,
        }
    }

    #[inline]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    #[inline]
    pub fn current_positions(&self) -> &[Vec3] {
        &self.current_pos
    }

    #[inline]
    pub fn current_rotations(&self) -> &[Vec3] {
        &self.current_rot
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn step(&mut self, mode: TreeMode) {
        let formed = mode == TreeMode::Formed;
        for (i, p) in self.photos.iter().enumerate() {
            let (target_pos, target_rot) = if formed {
                (p.formed, p.rotation)
            } else {
                (p.chaos, tumble_rotation(&mut self.rng))
            };
            self.current_pos[i] = blend_step(self.current_pos[i], target_pos, p.blend_rate);
            self.current_rot[i] = blend_step(self.current_rot[i], target_rot, p.blend_rate);
        }
    }

    pub fn write_instances(&mut self, t: f32) -> &[InstanceRaw] {
        self.instances.clear();
        for (i, p) in self.photos.iter().enumerate() {
            let pos = self.current_pos[i] + self.motion.offset(t, p.id);
            let model = Mat4::from_rotation_translation(euler_quat(self.current_rot[i]), pos);
            self.instances.push(InstanceRaw::new(model, self.color));
        }
        &self.instances
    }

    pub fn advance(&mut self, mode: TreeMode, t: f32) -> &[InstanceRaw] {
        self.step(mode);
        self.write_instances(t)
    }

    #[inline]
    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }
}
