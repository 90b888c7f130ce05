// Host-side tests for the page control helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod ui {
    include!("../src/ui.rs");
}

use tree_core::tracker::GestureStatus;
use tree_core::{CaptureError, TreeMode};
use ui::*;

#[test]
fn exactly_one_mode_button_is_active() {
    assert_eq!(mode_buttons(TreeMode::Formed), (true, false));
    assert_eq!(mode_buttons(TreeMode::Chaos), (false, true));
}

#[test]
fn camera_button_follows_status() {
    assert_eq!(camera_button_label(&GestureStatus::Inactive), "Enable camera");
    assert_eq!(camera_button_label(&GestureStatus::Starting), "Cancel");
    assert_eq!(camera_button_label(&GestureStatus::Active), "Disable camera");
    assert_eq!(
        camera_button_label(&GestureStatus::Failed("denied".into())),
        "Enable camera"
    );
}

#[test]
fn status_line_shows_mode_only_while_tracking() {
    let active = status_line(&GestureStatus::Active, TreeMode::Chaos);
    assert!(active.contains("CHAOS"));
    let off = status_line(&GestureStatus::Inactive, TreeMode::Chaos);
    assert!(!off.contains("CHAOS"));
    let failed = status_line(&GestureStatus::Failed("no camera".into()), TreeMode::Formed);
    assert!(failed.contains("no camera"));
}

#[test]
fn key_commands() {
    assert_eq!(key_command("f"), Some(KeyCommand::SetMode(TreeMode::Formed)));
    assert_eq!(key_command("C"), Some(KeyCommand::SetMode(TreeMode::Chaos)));
    assert_eq!(key_command(" "), Some(KeyCommand::ToggleMode));
    assert_eq!(key_command("g"), Some(KeyCommand::ToggleCamera));
    assert_eq!(key_command("Enter"), None);
}

#[test]
fn permission_errors_are_recognized() {
    assert_eq!(
        capture_error("NotAllowedError", "Permission denied"),
        CaptureError::PermissionDenied
    );
    assert_eq!(
        capture_error("NotFoundError", "Requested device not found"),
        CaptureError::Unavailable("NotFoundError: Requested device not found".into())
    );
    assert_eq!(
        capture_error("AbortError", ""),
        CaptureError::Unavailable("AbortError".into())
    );
}

#[test]
fn element_ids_match_the_page() {
    let html = include_str!("../static/index.html");
    for id in [
        CANVAS_ID,
        BTN_FORMED,
        BTN_CHAOS,
        BTN_CAMERA,
        STATUS_ID,
        VIDEO_ID,
        SAMPLE_CANVAS_ID,
    ] {
        assert!(html.contains(&format!("id=\"{id}\"")), "missing #{id}");
    }
}

#[test]
fn release_detaches_only_its_own_stream() {
    assert!(owns_video_source(Some("stream-a"), "stream-a"));
    // A newer activation has already attached its stream.
    assert!(!owns_video_source(Some("stream-b"), "stream-a"));
    assert!(!owns_video_source(None, "stream-a"));
}
