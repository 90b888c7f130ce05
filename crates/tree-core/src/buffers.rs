//! `#[repr(C)]` layouts handed to the renderer once per frame.
//!
//! Field order and padding match the WGSL declarations in `shaders/`.

use glam::{Mat4, Vec3};

/// One foliage point: both positions travel to the GPU, the blend happens
/// there.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FoliagePoint {
    pub formed: [f32; 3],
    pub chaos: [f32; 3],
}

/// Per-instance transform and color for ornaments, lights and photo panels.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
        }
    }

    #[inline]
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.model[3][0], self.model[3][1], self.model[3][2])
    }

    /// Length of the first basis column; the uniform scale for spheres.
    #[inline]
    pub fn uniform_scale(&self) -> f32 {
        Vec3::new(self.model[0][0], self.model[0][1], self.model[0][2]).length()
    }
}

/// Uniform block shared by every pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// Scene group transform (float + gesture orientation).
    pub group: [[f32; 4]; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    pub color_a: [f32; 4],
    pub color_b: [f32; 4],
    /// x: elapsed seconds, y: foliage progress, zw: viewport size in pixels.
    pub params: [f32; 4],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            group: Mat4::IDENTITY.to_cols_array_2d(),
            camera_right: [1.0, 0.0, 0.0, 0.0],
            camera_up: [0.0, 1.0, 0.0, 0.0],
            color_a: [0.0; 4],
            color_b: [0.0; 4],
            params: [0.0, 1.0, 1.0, 1.0],
        }
    }
}
