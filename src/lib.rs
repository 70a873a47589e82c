//! # maplet-camera
//!
//! Camera animation engine and event bus for interactive Rust maps.
//!
//! A [`Camera`] drives a [`ViewTransform`] (center, zoom, bearing, pitch)
//! through immediate jumps, eased transitions and van Wijk–Nuij flights,
//! firing `move`/`zoom`/`rotate`/`pitch` lifecycle events on an [`Evented`]
//! bus. Frames come from a host-supplied [`FrameScheduler`] and time from a
//! [`Clock`], so the same engine runs in a browser, a native window or a test.

pub mod animation;
pub mod camera;
pub mod core;
pub mod events;
pub mod input;
pub mod prelude;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::CameraBuilder,
    config::{CameraConfig, MotionProfile},
    geo::{LatLng, LatLngBounds, Point},
    viewport::Viewport,
};

pub use camera::{
    AnimationOptions, Camera, CameraOptions, EaseToOptions, FitBoundsOptions, FlyToOptions,
};

pub use events::{Event, EventSource, Evented};

pub use input::{InputEvent, InputHandler, MapMouseEvent, MapTouchEvent, MapWheelEvent};

pub use traits::{Clock, FrameScheduler, ViewTransform};

pub use animation::{EasingFunction, ManualClock, ManualScheduler};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),
}

/// Error type alias for convenience
pub type Error = MapError;
