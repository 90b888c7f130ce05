// DOM-free pieces of the page controls: element ids, button state and the
// status line text.

use tree_core::tracker::GestureStatus;
use tree_core::{CaptureError, TreeMode};

pub const CANVAS_ID: &str = "app-canvas";
pub const BTN_FORMED: &str = "btn-formed";
pub const BTN_CHAOS: &str = "btn-chaos";
pub const BTN_CAMERA: &str = "btn-camera";
pub const STATUS_ID: &str = "gesture-status";
pub const VIDEO_ID: &str = "gesture-video";
pub const SAMPLE_CANVAS_ID: &str = "gesture-canvas";

pub const ACTIVE_CLASS: &str = "active";

/// Which mode buttons are highlighted for `mode`, as (formed, chaos).
#[inline]
pub fn mode_buttons(mode: TreeMode) -> (bool, bool) {
    (mode == TreeMode::Formed, mode == TreeMode::Chaos)
}

pub fn camera_button_label(status: &GestureStatus) -> &'static str {
    match status {
        GestureStatus::Inactive | GestureStatus::Failed(_) => "Enable camera",
        GestureStatus::Starting => "Cancel",
        GestureStatus::Active => "Disable camera",
    }
}

pub fn status_line(status: &GestureStatus, mode: TreeMode) -> String {
    match status {
        GestureStatus::Active => format!("{} · {}", status.label(), mode.label()),
        _ => status.label(),
    }
}

/// Keyboard shortcuts shared with the desktop build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    SetMode(TreeMode),
    ToggleMode,
    ToggleCamera,
}

pub fn key_command(key: &str) -> Option<KeyCommand> {
    match key {
        "f" | "F" => Some(KeyCommand::SetMode(TreeMode::Formed)),
        "c" | "C" => Some(KeyCommand::SetMode(TreeMode::Chaos)),
        " " => Some(KeyCommand::ToggleMode),
        "g" | "G" => Some(KeyCommand::ToggleCamera),
        _ => None,
    }
}

/// Map a rejected `getUserMedia` (DOMException name and message).
pub fn capture_error(name: &str, message: &str) -> CaptureError {
    match name {
        "NotAllowedError" | "SecurityError" => CaptureError::PermissionDenied,
        _ if message.is_empty() => CaptureError::Unavailable(name.to_string()),
        _ => CaptureError::Unavailable(format!("{name}: {message}")),
    }
}

/// The gesture video element is shared by every activation. A camera may only
/// detach it while its own stream (by `MediaStream.id`) is the one attached.
pub fn owns_video_source(attached: Option<&str>, own: &str) -> bool {
    attached == Some(own)
}
