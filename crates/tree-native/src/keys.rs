use tree_core::TreeMode;
use winit::keyboard::{Key, NamedKey};

/// What a key press asks the app to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SetMode(TreeMode),
    ToggleMode,
    Gesture,
    Quit,
}

pub fn command_for_key(key: &Key) -> Option<Command> {
    match key {
        Key::Named(NamedKey::Space) => Some(Command::ToggleMode),
        Key::Named(NamedKey::Escape) => Some(Command::Quit),
        Key::Character(c) => match c.as_str() {
            "f" | "F" => Some(Command::SetMode(TreeMode::Formed)),
            "c" | "C" => Some(Command::SetMode(TreeMode::Chaos)),
            "g" | "G" => Some(Command::Gesture),
            _ => None,
        },
        _ => None,
    }
}

/// One wheel notch moves the camera this far along its view ray.
pub const WHEEL_ZOOM_STEP: f32 = 1.0;

#[inline]
pub fn zoomed_distance(current: f32, wheel_lines: f32) -> f32 {
    current - wheel_lines * WHEEL_ZOOM_STEP
}
