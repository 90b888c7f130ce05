//! One render-loop tick, independent of any window or graphics context.

use crate::buffers::{InstanceRaw, SceneUniforms};
use crate::config::SceneConfig;
use crate::constants::{srgb_to_linear, EMERALD, GOLD};
use crate::error::ConfigError;
use crate::foliage::FoliageBlend;
use crate::mode::{ModeController, TreeMode};
use crate::scene::Scene;
use crate::state::{Camera, CameraRig, SceneOrientation};
use glam::Mat4;

/// Everything the renderer needs for one frame, borrowed from `Experience`.
pub struct FrameOutput<'a> {
    pub uniforms: SceneUniforms,
    pub ornaments: &'a [InstanceRaw],
    pub lights: &'a [InstanceRaw],
    pub photos: &'a [InstanceRaw],
    pub foliage_count: u32,
}

/// Session state: the element store plus the shared animation scalars.
pub struct Experience {
    scene: Scene,
    foliage: FoliageBlend,
    orientation: SceneOrientation,
    rig: CameraRig,
    elapsed: f32,
}

impl Experience {
    pub fn new(config: &SceneConfig, initial: TreeMode) -> Result<Self, ConfigError> {
        let scene = Scene::generate(config)?;
        Ok(Self::from_scene(scene, initial, config.rates.foliage_progress))
    }

    pub fn from_scene(scene: Scene, initial: TreeMode, progress_rate: f32) -> Self {
        Self {
            scene,
            foliage: FoliageBlend::new(initial, progress_rate),
            orientation: SceneOrientation::default(),
            rig: CameraRig::default(),
            elapsed: 0.0,
        }
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.foliage.progress()
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn orientation(&self) -> &SceneOrientation {
        &self.orientation
    }

    #[inline]
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        self.rig.camera(aspect)
    }

    /// Advance every animated quantity by one frame and return the buffers.
    ///
    /// Blend rates are per frame; `dt_sec` only drives the camera orbit and
    /// the elapsed clock used by the time-keyed motion.
    pub fn advance(
        &mut self,
        dt_sec: f32,
        controller: &ModeController,
        viewport: [f32; 2],
    ) -> FrameOutput<'_> {
        self.elapsed += dt_sec.max(0.0);
        let t = self.elapsed;
        let mode = controller.mode();

        let progress = self.foliage.step(mode);
        self.orientation.step(controller.camera_offset(), t);
        self.rig.step(mode, dt_sec);

        self.scene.ornaments.advance(mode, t);
        self.scene.lights.advance(mode, t);
        self.scene.photos.advance(mode, t);

        let camera = self.rig.camera(viewport[0] / viewport[1].max(1.0));
        let uniforms = self.uniforms(&camera, self.orientation.matrix(), progress, viewport);
        FrameOutput {
            uniforms,
            ornaments: self.scene.ornaments.instances(),
            lights: self.scene.lights.instances(),
            photos: self.scene.photos.instances(),
            foliage_count: self.scene.foliage.len() as u32,
        }
    }

    fn uniforms(
        &self,
        camera: &Camera,
        group: Mat4,
        progress: f32,
        viewport: [f32; 2],
    ) -> SceneUniforms {
        let (right, up) = camera.billboard_axes();
        let [ar, ag, ab] = srgb_to_linear(EMERALD);
        let [br, bg, bb] = srgb_to_linear(GOLD);
        SceneUniforms {
            view_proj: camera.view_proj().to_cols_array_2d(),
            group: group.to_cols_array_2d(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            color_a: [ar, ag, ab, 1.0],
            color_b: [br, bg, bb, 1.0],
            params: [self.elapsed, progress, viewport[0], viewport[1]],
        }
    }
}
