pub mod animation;
pub mod buffers;
pub mod config;
pub mod constants;
pub mod distribution;
pub mod element;
pub mod error;
pub mod foliage;
pub mod frame;
pub mod gesture;
pub mod mode;
pub mod scene;
pub mod state;
pub mod tracker;

#[cfg(feature = "gpu")]
pub mod render;

pub static COMMON_WGSL: &str = include_str!("../shaders/common.wgsl");
pub static FOLIAGE_WGSL: &str = include_str!("../shaders/foliage.wgsl");
pub static INSTANCE_WGSL: &str = include_str!("../shaders/instance.wgsl");

pub use buffers::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use mode::*;
pub use state::*;
