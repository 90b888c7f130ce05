use thiserror::Error;

/// Failures while acquiring or reading the gesture camera.
///
/// All of these are terminal for the current capture session: the tracker
/// moves to `Failed` and the user has to re-activate capture.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("camera access denied")]
    PermissionDenied,
    #[error("camera unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read camera frame: {0}")]
    FrameRead(String),
}

/// Rejected session parameters.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("tree height must be positive, got {0}")]
    Height(f32),
    #[error("tree radius must be positive, got {0}")]
    Radius(f32),
    #[error("chaos extent for {category} must be positive, got {value}")]
    ChaosExtent { category: &'static str, value: f32 },
    #[error("vertical inset {inset} leaves no room on a tree of height {height}")]
    Inset { inset: f32, height: f32 },
    #[error("blend rate for {category} must be in (0, 1], got {value}")]
    BlendRate { category: &'static str, value: f32 },
}
