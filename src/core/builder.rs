//! Camera builder for fluent API configuration
//!
//! [`CameraBuilder`] assembles a [`Viewport`], a [`CameraConfig`] and the
//! host's frame scheduler and clock into a ready [`Camera`].

use crate::{
    animation::{InstantClock, ManualScheduler},
    camera::Camera,
    core::{
        config::{CameraConfig, MotionProfile},
        constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM},
        geo::{LatLng, LatLngBounds, Point},
        viewport::Viewport,
    },
    traits::{Clock, FrameScheduler, ViewTransform},
    MapError, Result,
};
use std::rc::Rc;

/// Builder for creating and configuring [`Camera`] instances
pub struct CameraBuilder {
    center: LatLng,
    zoom: f64,
    size: Point,
    bearing: f64,
    pitch: f64,
    min_zoom: Option<f64>,
    max_zoom: Option<f64>,
    max_bounds: Option<LatLngBounds>,
    render_world_copies: bool,
    profile: MotionProfile,
    scheduler: Option<Rc<dyn FrameScheduler>>,
    clock: Option<Rc<dyn Clock>>,
}

impl CameraBuilder {
    /// Create a new CameraBuilder with default settings
    pub fn new() -> Self {
        Self {
            center: LatLng::default(),
            zoom: 0.0,
            size: Point::new(800.0, 600.0),
            bearing: 0.0,
            pitch: 0.0,
            min_zoom: None,
            max_zoom: None,
            max_bounds: None,
            render_world_copies: true,
            profile: MotionProfile::default(),
            scheduler: None,
            clock: None,
        }
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64) -> Self {
        self.center = center;
        self.zoom = zoom;
        self
    }

    /// Viewport size in pixels
    pub fn with_size(mut self, size: Point) -> Self {
        self.size = size;
        self
    }

    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = bearing;
        self
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch;
        self
    }

    /// Set zoom limits
    pub fn with_zoom_limits(mut self, min_zoom: Option<f64>, max_zoom: Option<f64>) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Constrain the center to `bounds`; longitudes then stop wrapping freely
    pub fn with_max_bounds(mut self, bounds: LatLngBounds) -> Self {
        self.max_bounds = Some(bounds);
        self
    }

    pub fn with_render_world_copies(mut self, enabled: bool) -> Self {
        self.render_world_copies = enabled;
        self
    }

    /// Set the motion profile
    pub fn with_profile(mut self, profile: MotionProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set a custom configuration
    pub fn with_config(mut self, config: CameraConfig) -> Self {
        self.profile = MotionProfile::Custom(config);
        self
    }

    /// Frame scheduler driving animations. Required.
    pub fn with_scheduler(mut self, scheduler: Rc<dyn FrameScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Time source for animations. Defaults to an [`InstantClock`].
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    fn viewport(&self) -> Result<Viewport> {
        let min_zoom = self.min_zoom.unwrap_or(DEFAULT_MIN_ZOOM);
        let max_zoom = self.max_zoom.unwrap_or(DEFAULT_MAX_ZOOM);
        if !(min_zoom <= max_zoom) {
            return Err(MapError::InvalidOptions(format!(
                "min_zoom ({}) must not exceed max_zoom ({})",
                min_zoom, max_zoom
            )));
        }
        if !(self.size.x >= 0.0 && self.size.y >= 0.0) {
            return Err(MapError::InvalidOptions(format!(
                "viewport size must be non-negative, got {}x{}",
                self.size.x, self.size.y
            )));
        }
        if !self.center.is_valid() {
            return Err(MapError::InvalidOptions(format!(
                "invalid center ({}, {})",
                self.center.lat, self.center.lng
            )));
        }

        let mut viewport = Viewport::new(LatLng::default(), self.zoom, self.size);
        viewport.set_zoom_limits(min_zoom, max_zoom);
        viewport.set_render_world_copies(self.render_world_copies);
        viewport.set_max_bounds(self.max_bounds.clone());
        viewport.set_zoom(self.zoom);
        viewport.set_center(self.center);
        viewport.set_bearing(self.bearing);
        viewport.set_pitch(self.pitch);
        Ok(viewport)
    }

    /// Build the camera with the configured options
    pub fn build(self) -> Result<Rc<Camera<Viewport>>> {
        let viewport = self.viewport()?;
        let config = self.profile.resolve();
        let scheduler = self.scheduler.ok_or_else(|| {
            MapError::InvalidOptions("a frame scheduler is required".to_string())
        })?;
        let clock = self
            .clock
            .unwrap_or_else(|| Rc::new(InstantClock::new()) as Rc<dyn Clock>);

        log::debug!(
            "building camera at ({}, {}) zoom {} in {}x{}",
            viewport.center().lat,
            viewport.center().lng,
            viewport.zoom(),
            self.size.x,
            self.size.y
        );
        Ok(Camera::new(viewport, scheduler, clock, config))
    }
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience methods for common camera configurations
impl CameraBuilder {
    /// A camera driven by an explicitly pumped scheduler, for tests, servers
    /// and offline rendering
    pub fn headless(
        center: LatLng,
        zoom: f64,
        size: Point,
        scheduler: Rc<ManualScheduler>,
    ) -> Self {
        Self::new()
            .with_center_and_zoom(center, zoom)
            .with_size(size)
            .with_scheduler(scheduler)
    }

    /// Honor the platform's reduced-motion preference
    pub fn reduced_motion(self) -> Self {
        self.with_profile(MotionProfile::ReducedMotion)
    }

    /// A camera animated by `requestAnimationFrame` and timed by `performance.now()`
    #[cfg(feature = "wasm")]
    pub fn browser(center: LatLng, zoom: f64, size: Point) -> Result<Self> {
        use crate::animation::{AnimationFrameScheduler, PerformanceClock};

        let scheduler = AnimationFrameScheduler::new()
            .ok_or_else(|| MapError::InvalidOptions("no browser window available".to_string()))?;
        let clock = PerformanceClock::new()
            .ok_or_else(|| MapError::InvalidOptions("no performance timer available".to_string()))?;
        Ok(Self::new()
            .with_center_and_zoom(center, zoom)
            .with_size(size)
            .with_scheduler(Rc::new(scheduler))
            .with_clock(Rc::new(clock)))
    }
}
