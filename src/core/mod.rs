pub mod builder;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod geo;
pub mod viewport;

pub use builder::CameraBuilder;
pub use config::{AnimationDefaults, CameraConfig, InteractionConfig, MotionProfile};
pub use geo::{LatLng, LatLngBounds, Point};
pub use viewport::Viewport;
