//! View-side state: camera, camera rig and the scene group orientation.
//!
//! These types avoid platform APIs and work on both native and web targets.
//! The frontends consume them to build the view/projection matrices and the
//! group transform applied to every element.

use crate::animation::blend_scalar;
use crate::constants::*;
use crate::mode::TreeMode;
use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::TAU;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space right and up vectors of the image plane, for billboards.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }
}

/// Orbiting camera. Auto-rotates about +Y while the tree is formed.
#[derive(Clone, Debug)]
pub struct CameraRig {
    azimuth: f32,
    elevation: f32,
    distance: f32,
    target: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::looking_from(camera_eye_vec3(), Vec3::ZERO)
    }
}

impl CameraRig {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let d = eye - target;
        let distance = d.length().clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        let azimuth = d.x.atan2(d.z);
        let elevation = (d.y / d.length().max(1e-6)).clamp(-1.0, 1.0).asin();
        Self {
            azimuth,
            elevation,
            distance,
            target,
        }
    }

    pub fn step(&mut self, mode: TreeMode, dt_sec: f32) {
        if mode == TreeMode::Formed {
            self.azimuth = (self.azimuth + dt_sec * TAU / AUTO_ROTATE_PERIOD_SEC) % TAU;
        }
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[inline]
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn eye(&self) -> Vec3 {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        self.target + Vec3::new(sa * ce, se, ca * ce) * self.distance
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

/// Group transform over the whole tree: a slow vertical float plus a tilt
/// that follows the gesture camera offset through its own smoothing stage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneOrientation {
    /// x: pitch, y: yaw (radians).
    rotation: Vec2,
    lift: f32,
}

impl SceneOrientation {
    pub fn step(&mut self, camera_offset: Vec2, t: f32) {
        self.lift = (t * GROUP_FLOAT_FREQ).sin() * GROUP_FLOAT_AMPLITUDE;
        self.rotation.y = blend_scalar(
            self.rotation.y,
            camera_offset.x * ORIENTATION_GAIN,
            ORIENTATION_SMOOTHING,
        );
        self.rotation.x = blend_scalar(
            self.rotation.x,
            camera_offset.y * ORIENTATION_GAIN,
            ORIENTATION_SMOOTHING,
        );
    }

    #[inline]
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    #[inline]
    pub fn lift(&self) -> f32 {
        self.lift
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::Y * self.lift)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
    }
}
