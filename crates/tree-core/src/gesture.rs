//! Brightness-blob gesture heuristic.
//!
//! This is a coarse proxy, not hand tracking: it thresholds the red channel
//! of a small frame and treats the bright pixels as "the hand". A large blob
//! reads as an open hand (scatter), a small one as a closed fist (form).
//! Any bright object or a lighting change will fool it. A real implementation
//! would swap in a hand-pose model; the thresholds here are kept as-is so
//! behavior stays comparable.

use crate::error::CaptureError;
use crate::mode::{ModeController, TreeMode};
use glam::Vec2;
use std::time::Duration;

pub const SAMPLE_WIDTH: u32 = 160;
pub const SAMPLE_HEIGHT: u32 = 120;
pub const SAMPLE_PERIOD: Duration = Duration::from_millis(100);

pub const RED_THRESHOLD: u8 = 200; // strictly greater counts as bright
pub const MIN_BLOB_PIXELS: u32 = 50; // at or below: noise, sample dropped
pub const FORMED_MAX_PIXELS: u32 = 400; // below: closed hand
pub const CHAOS_MIN_PIXELS: u32 = 800; // above: open hand

/// Borrowed RGBA8 frame, row-major, no row padding.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    width: u32,
    height: u32,
    rgba: &'a [u8],
}

impl<'a> FrameView<'a> {
    pub fn new(width: u32, height: u32, rgba: &'a [u8]) -> Result<Self, CaptureError> {
        let needed = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() < needed {
            return Err(CaptureError::FrameRead(format!(
                "expected {needed} bytes for {width}x{height} RGBA, got {}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba: &rgba[..needed],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlobStats {
    pub count: u32,
    /// Centroid normalized by the frame size, in [0, 1]².
    pub centroid: Vec2,
}

pub fn measure_blob(frame: &FrameView<'_>) -> BlobStats {
    let w = frame.width as usize;
    let mut sum_x = 0u64;
    let mut sum_y = 0u64;
    let mut count = 0u32;
    for (i, px) in frame.rgba.chunks_exact(4).enumerate() {
        if px[0] > RED_THRESHOLD {
            sum_x += (i % w) as u64;
            sum_y += (i / w) as u64;
            count += 1;
        }
    }
    if count == 0 {
        return BlobStats::default();
    }
    let n = count as f64;
    BlobStats {
        count,
        centroid: Vec2::new(
            (sum_x as f64 / n / frame.width as f64) as f32,
            (sum_y as f64 / n / frame.height as f64) as f32,
        ),
    }
}

/// Mode suggested by a blob of `count` pixels. Counts in
/// `[FORMED_MAX_PIXELS, CHAOS_MIN_PIXELS]` are a dead zone so an in-between
/// blob does not flicker the tree.
pub fn classify_count(count: u32) -> Option<TreeMode> {
    if count > CHAOS_MIN_PIXELS {
        Some(TreeMode::Chaos)
    } else if count > MIN_BLOB_PIXELS && count < FORMED_MAX_PIXELS {
        Some(TreeMode::Formed)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    pub position: Vec2,
    pub mode: Option<TreeMode>,
}

impl GestureSample {
    pub fn apply(&self, controller: &mut ModeController) {
        controller.set_gesture_position(self.position);
        if let Some(mode) = self.mode {
            controller.set_mode(mode);
        }
    }
}

/// `None` when the blob is too small to say anything.
pub fn classify(stats: &BlobStats) -> Option<GestureSample> {
    if stats.count <= MIN_BLOB_PIXELS {
        return None;
    }
    Some(GestureSample {
        position: stats.centroid,
        mode: classify_count(stats.count),
    })
}

pub fn classify_frame(frame: &FrameView<'_>) -> Option<GestureSample> {
    classify(&measure_blob(frame))
}
