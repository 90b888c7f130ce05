use glam::Vec3;

// Session-wide tuning constants shared by the native and web frontends.

// Element counts per category
pub const FOLIAGE_COUNT: usize = 15_000;
pub const ORNAMENT_COUNT: usize = 120;
pub const LIGHT_COUNT: usize = 80;
pub const PHOTO_COUNT: usize = 24;

// Tree envelope
pub const TREE_HEIGHT: f32 = 12.0;
pub const TREE_RADIUS: f32 = 5.0; // base radius of the cone
pub const CHAOS_RADIUS: f32 = 25.0; // foliage sphere, ornament cube half-extent

// Per-category envelope tweaks
pub const ORNAMENT_RADIUS_SCALE: f32 = 0.95;
pub const ORNAMENT_Y_INSET: f32 = 0.5;
pub const LIGHT_RADIUS_SCALE: f32 = 0.8;
pub const LIGHT_CHAOS_EXTENT: f32 = 20.0;
pub const PHOTO_RADIUS_SCALE: f32 = 1.05; // panels hang just outside the foliage
pub const PHOTO_Y_INSET: f32 = 1.0;
pub const PHOTO_CHAOS_EXTENT: f32 = 17.5;

// Foliage chaos shell: distance = (MIN + (1 - MIN) * u) * CHAOS_RADIUS
pub const CHAOS_SHELL_MIN: f32 = 0.3;

// Blend rates (fraction of the remaining distance covered per frame)
pub const FOLIAGE_PROGRESS_RATE: f32 = 0.05;
pub const ORNAMENT_RATE_MIN: f32 = 0.02;
pub const ORNAMENT_RATE_SPAN: f32 = 0.05;
pub const LIGHT_RATE: f32 = 0.1; // lights move faster than ornaments
pub const PHOTO_RATE: f32 = 0.03;

// Sizes
pub const ORNAMENT_SIZE_MIN: f32 = 0.15;
pub const ORNAMENT_SIZE_SPAN: f32 = 0.2;
pub const LIGHT_SIZE: f32 = 0.05;
pub const LIGHT_OPACITY: f32 = 0.8;
pub const PHOTO_TILT_SPAN: f32 = 0.5; // random roll in [-0.25, 0.25)

// Secondary motion
pub const PHOTO_FLOAT_AMPLITUDE: f32 = 0.1;
pub const LIGHT_PULSE_FREQ: f32 = 10.0;
pub const LIGHT_PULSE_BASE: f32 = 0.8;
pub const LIGHT_PULSE_AMPLITUDE: f32 = 0.5;

// Foliage shader protocol
pub const SWIRL_RATE: f32 = 0.5; // radians per second about +Y
pub const CHAOS_WOBBLE_AMPLITUDE: f32 = 0.1;
pub const POINT_SIZE_PX: f32 = 20.0; // at unit depth
pub const POINT_ALPHA_BASE: f32 = 0.4;
pub const POINT_ALPHA_SPAN: f32 = 0.6;

// Scene group motion
pub const GROUP_FLOAT_FREQ: f32 = 0.5;
pub const GROUP_FLOAT_AMPLITUDE: f32 = 0.2;
pub const ORIENTATION_GAIN: f32 = 0.05; // camera offset -> radians
pub const ORIENTATION_SMOOTHING: f32 = 0.1;

// Gesture position -> camera offset gains
pub const CAMERA_OFFSET_GAIN_X: f32 = 10.0;
pub const CAMERA_OFFSET_GAIN_Y: f32 = 5.0;

// Camera rig
pub const CAMERA_EYE: [f32; 3] = [0.0, 4.0, 20.0];
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_MIN_DISTANCE: f32 = 10.0;
pub const CAMERA_MAX_DISTANCE: f32 = 30.0;
pub const AUTO_ROTATE_PERIOD_SEC: f32 = 120.0; // one orbit while formed
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;

// Palette (sRGB, as authored)
pub const EMERALD: [f32; 3] = [0.016, 0.224, 0.153]; // #043927
pub const GOLD: [f32; 3] = [0.831, 0.686, 0.216]; // #D4AF37
pub const RUBY: [f32; 3] = [0.608, 0.067, 0.118]; // #9B111E
pub const SNOW: [f32; 3] = [1.0, 1.0, 1.0];
pub const BACKGROUND: [f32; 3] = [0.004, 0.039, 0.031]; // #010A08

pub const ORNAMENT_PALETTE: [[f32; 3]; 4] = [GOLD, RUBY, EMERALD, SNOW];

#[inline]
pub fn camera_eye_vec3() -> Vec3 {
    Vec3::new(CAMERA_EYE[0], CAMERA_EYE[1], CAMERA_EYE[2])
}

/// Convert an authored sRGB triple to linear light for the shaders.
#[inline]
pub fn srgb_to_linear(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(|c| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    })
}
