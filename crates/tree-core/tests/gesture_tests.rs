use glam::Vec2;
use tree_core::gesture::*;
use tree_core::{CaptureError, ModeController, TreeMode};

const W: u32 = SAMPLE_WIDTH;
const H: u32 = SAMPLE_HEIGHT;

fn dark_frame() -> Vec<u8> {
    let mut rgba = vec![0u8; (W * H * 4) as usize];
    for px in rgba.chunks_exact_mut(4) {
        px[3] = 255;
    }
    rgba
}

fn light(rgba: &mut [u8], x: u32, y: u32) {
    let i = ((y * W + x) * 4) as usize;
    rgba[i] = 255;
}

/// `n` bright pixels packed in rows starting at (x0, y0).
fn block(n: u32, x0: u32, y0: u32, row: u32) -> Vec<u8> {
    let mut rgba = dark_frame();
    for k in 0..n {
        light(&mut rgba, x0 + k % row, y0 + k / row);
    }
    rgba
}

/// 600 bright pixels in point-symmetric pairs around (80, 60).
fn centered_600() -> Vec<u8> {
    let mut rgba = dark_frame();
    for dx in 1..=15 {
        for dy in -10i32..10 {
            light(&mut rgba, 80 + dx, (60 + dy) as u32);
            light(&mut rgba, 80 - dx, (60 - dy) as u32);
        }
    }
    rgba
}

fn sample_into(rgba: &[u8], controller: &mut ModeController) -> Option<GestureSample> {
    let frame = FrameView::new(W, H, rgba).unwrap();
    let sample = classify_frame(&frame);
    if let Some(s) = &sample {
        s.apply(controller);
    }
    sample
}

#[test]
fn centered_mid_blob_moves_camera_but_not_mode() {
    let rgba = centered_600();
    let stats = measure_blob(&FrameView::new(W, H, &rgba).unwrap());
    assert_eq!(stats.count, 600);

    let mut c = ModeController::new(TreeMode::Formed);
    c.set_gesture_position(Vec2::new(0.9, 0.1));
    let sample = sample_into(&rgba, &mut c).unwrap();
    assert!((sample.position - Vec2::new(0.5, 0.5)).length() < 1e-6);
    assert_eq!(sample.mode, None);
    assert!(c.camera_offset().length() < 1e-5);
    assert_eq!(c.mode(), TreeMode::Formed);
}

#[test]
fn large_blob_scatters() {
    let mut c = ModeController::new(TreeMode::Formed);
    let sample = sample_into(&block(900, 10, 10, 30), &mut c).unwrap();
    assert_eq!(sample.mode, Some(TreeMode::Chaos));
    assert_eq!(c.mode(), TreeMode::Chaos);
}

#[test]
fn small_blob_forms() {
    let mut c = ModeController::new(TreeMode::Chaos);
    let sample = sample_into(&block(200, 100, 80, 20), &mut c).unwrap();
    assert_eq!(sample.mode, Some(TreeMode::Formed));
    assert_eq!(c.mode(), TreeMode::Formed);
}

#[test]
fn tiny_blob_changes_nothing() {
    let mut c = ModeController::new(TreeMode::Chaos);
    c.set_gesture_position(Vec2::new(0.25, 0.75));
    let before = c.clone();
    assert!(sample_into(&block(10, 0, 0, 5), &mut c).is_none());
    assert_eq!(c, before);
}

#[test]
fn count_thresholds_are_strict() {
    assert_eq!(classify_count(50), None);
    assert_eq!(classify_count(51), Some(TreeMode::Formed));
    assert_eq!(classify_count(399), Some(TreeMode::Formed));
    assert_eq!(classify_count(400), None);
    assert_eq!(classify_count(800), None);
    assert_eq!(classify_count(801), Some(TreeMode::Chaos));

    let exactly_min = BlobStats {
        count: MIN_BLOB_PIXELS,
        centroid: Vec2::splat(0.3),
    };
    assert!(classify(&exactly_min).is_none());
}

#[test]
fn red_threshold_is_strictly_greater() {
    let mut rgba = dark_frame();
    rgba[0] = RED_THRESHOLD;
    rgba[4] = RED_THRESHOLD + 1;
    let stats = measure_blob(&FrameView::new(W, H, &rgba).unwrap());
    assert_eq!(stats.count, 1);
}

#[test]
fn only_the_red_channel_counts() {
    let mut rgba = dark_frame();
    for px in rgba.chunks_exact_mut(4).take(500) {
        px[1] = 255;
        px[2] = 255;
    }
    let stats = measure_blob(&FrameView::new(W, H, &rgba).unwrap());
    assert_eq!(stats.count, 0);
    assert_eq!(stats.centroid, Vec2::ZERO);
}

#[test]
fn centroid_is_normalized_by_frame_size() {
    // One column at x = 40, rows 0..120: centroid (40/160, 59.5/120).
    let mut rgba = dark_frame();
    for y in 0..H {
        light(&mut rgba, 40, y);
    }
    let stats = measure_blob(&FrameView::new(W, H, &rgba).unwrap());
    assert_eq!(stats.count, H);
    assert!((stats.centroid.x - 0.25).abs() < 1e-6);
    assert!((stats.centroid.y - 59.5 / 120.0).abs() < 1e-6);
}

#[test]
fn short_buffers_are_rejected() {
    let rgba = vec![0u8; 100];
    assert!(matches!(
        FrameView::new(W, H, &rgba),
        Err(CaptureError::FrameRead(_))
    ));
    assert!(FrameView::new(0, H, &rgba).is_err());
}
