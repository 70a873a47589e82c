//! Core constants derived from common web-map camera conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Size in pixels of the world at zoom 0.
pub const TILE_SIZE: f64 = 512.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

/// Zoom limits applied by a freshly created viewport.
pub const DEFAULT_MIN_ZOOM: f64 = 0.0;
pub const DEFAULT_MAX_ZOOM: f64 = 22.0;

/// Steepest pitch, in degrees, the viewport accepts.
pub const MAX_PITCH: f64 = 60.0;

/// Bearings closer to north than this (in degrees) snap back to north.
pub const DEFAULT_BEARING_SNAP: f64 = 7.0;

/// Default `ease_to` duration in milliseconds.
pub const DEFAULT_EASE_DURATION_MS: f64 = 500.0;

/// Default duration of `reset_north` in milliseconds.
pub const DEFAULT_RESET_NORTH_DURATION_MS: f64 = 1000.0;

/// Average flight speed in ρ-screenfuls per second.
pub const DEFAULT_FLY_SPEED: f64 = 1.2;

/// ρ: the zoom-out curvature of a flight (van Wijk & Nuij, 2003).
pub const DEFAULT_FLY_CURVE: f64 = 1.42;

/// Programmatic +/- zoom step when calling `zoom_in/zoom_out`.
pub const DEFAULT_ZOOM_DELTA: f64 = 1.0;

/// Bounds of the pan speedup base used by `ease_to`.
pub const EASE_SPEEDUP_MIN: f64 = 0.5;
pub const EASE_SPEEDUP_MAX: f64 = 2.0;

/// Below this planar distance (pixels) a flight is treated as zoom-only.
pub const FLIGHT_EPSILON: f64 = 0.000_001;
