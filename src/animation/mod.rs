pub mod interpolation;
pub mod scheduler;

// Re-export commonly used types and functions for convenience
pub use interpolation::{interpolate, EasingFunction, UnitBezier};
pub use scheduler::{InstantClock, ManualClock, ManualScheduler};

#[cfg(feature = "wasm")]
pub use scheduler::{AnimationFrameScheduler, PerformanceClock};
