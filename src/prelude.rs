//! Prelude module for common maplet-camera types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use maplet_camera::prelude::*;`

pub use crate::core::{
    builder::CameraBuilder,
    config::{AnimationDefaults, CameraConfig, InteractionConfig, MotionProfile},
    geo::{LatLng, LatLngBounds, Point},
    viewport::Viewport,
};

pub use crate::camera::{
    AnimationOptions, BoundsCamera, Camera, CameraOptions, EaseToOptions, FitBoundsOptions,
    FlightOptions, FlyToOptions, Padding,
};

pub use crate::events::{
    listener, names, Event, EventData, EventSource, Evented, Listener, ParentData,
};

pub use crate::input::{
    EventHandled, InputEvent, InputHandler, KeyModifiers, MapMouseEvent, MapTouchEvent,
    MapWheelEvent, MouseButton, TouchEventType, TouchPoint, WheelDeltaMode,
};

pub use crate::animation::{
    interpolate, EasingFunction, InstantClock, ManualClock, ManualScheduler,
};

#[cfg(feature = "wasm")]
pub use crate::animation::{AnimationFrameScheduler, PerformanceClock};

pub use crate::traits::{Clock, FrameHandle, FrameScheduler, ViewTransform};

pub use crate::{Error as MapError, Result};

pub use std::rc::Rc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
