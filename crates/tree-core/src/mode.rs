//! The two-state tree mode and the controller that owns it.
//!
//! The controller is the only writer of the mode and of the gesture-derived
//! camera offset. Everything that animates reads it through `&ModeController`.

use crate::constants::{CAMERA_OFFSET_GAIN_X, CAMERA_OFFSET_GAIN_Y};
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TreeMode {
    /// Every element heads for its place on the tree.
    #[default]
    Formed,
    /// Every element heads for its scattered position.
    Chaos,
}

impl TreeMode {
    /// Scalar target for the foliage progress: 1 formed, 0 chaos.
    #[inline]
    pub fn progress_target(self) -> f32 {
        match self {
            TreeMode::Formed => 1.0,
            TreeMode::Chaos => 0.0,
        }
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            TreeMode::Formed => TreeMode::Chaos,
            TreeMode::Chaos => TreeMode::Formed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TreeMode::Formed => "FORMED",
            TreeMode::Chaos => "CHAOS",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModeController {
    mode: TreeMode,
    camera_offset: Vec2,
}

impl ModeController {
    pub fn new(mode: TreeMode) -> Self {
        Self {
            mode,
            camera_offset: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn mode(&self) -> TreeMode {
        self.mode
    }

    /// Returns true when the mode actually changed.
    pub fn set_mode(&mut self, mode: TreeMode) -> bool {
        if self.mode == mode {
            return false;
        }
        log::info!("[mode] {} -> {}", self.mode.label(), mode.label());
        self.mode = mode;
        true
    }

    pub fn toggle(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    #[inline]
    pub fn camera_offset(&self) -> Vec2 {
        self.camera_offset
    }

    /// Recenter a normalized gesture position around (0.5, 0.5); image `y`
    /// grows downward so the vertical axis is flipped.
    pub fn set_gesture_position(&mut self, position: Vec2) {
        self.camera_offset = Vec2::new(
            (position.x - 0.5) * CAMERA_OFFSET_GAIN_X,
            (0.5 - position.y) * CAMERA_OFFSET_GAIN_Y,
        );
    }
}
