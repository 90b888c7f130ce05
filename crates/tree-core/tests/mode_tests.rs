use glam::Vec2;
use tree_core::{ModeController, TreeMode};

#[test]
fn default_mode_is_formed() {
    assert_eq!(TreeMode::default(), TreeMode::Formed);
    assert_eq!(ModeController::default().mode(), TreeMode::Formed);
}

#[test]
fn set_mode_is_idempotent() {
    let mut c = ModeController::new(TreeMode::Formed);
    assert!(!c.set_mode(TreeMode::Formed));
    assert_eq!(c.mode(), TreeMode::Formed);
    assert!(c.set_mode(TreeMode::Chaos));
    assert!(!c.set_mode(TreeMode::Chaos));
    assert_eq!(c.mode(), TreeMode::Chaos);
}

#[test]
fn toggle_flips_and_flips_back() {
    let mut c = ModeController::new(TreeMode::Chaos);
    c.toggle();
    assert_eq!(c.mode(), TreeMode::Formed);
    c.toggle();
    assert_eq!(c.mode(), TreeMode::Chaos);
}

#[test]
fn progress_targets() {
    assert_eq!(TreeMode::Formed.progress_target(), 1.0);
    assert_eq!(TreeMode::Chaos.progress_target(), 0.0);
}

#[test]
fn gesture_position_maps_to_camera_offset() {
    let mut c = ModeController::default();
    assert_eq!(c.camera_offset(), Vec2::ZERO);

    c.set_gesture_position(Vec2::new(0.5, 0.5));
    assert!(c.camera_offset().length() < 1e-6);

    // Image y grows downward, so the top edge looks up.
    c.set_gesture_position(Vec2::new(0.0, 0.0));
    assert!((c.camera_offset() - Vec2::new(-5.0, 2.5)).length() < 1e-6);

    c.set_gesture_position(Vec2::new(1.0, 1.0));
    assert!((c.camera_offset() - Vec2::new(5.0, -2.5)).length() < 1e-6);
}

#[test]
fn gesture_position_does_not_touch_mode() {
    let mut c = ModeController::new(TreeMode::Chaos);
    c.set_gesture_position(Vec2::new(0.2, 0.9));
    assert_eq!(c.mode(), TreeMode::Chaos);
}
