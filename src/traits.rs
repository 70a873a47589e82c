//! Shared trait abstractions for the collaborators the camera drives
//!
//! The camera never owns projection math or a frame loop. It mutates a
//! [`ViewTransform`], asks a [`FrameScheduler`] for the next frame and reads
//! time from a [`Clock`]. Hosts plug in their own implementations; the crate
//! ships reference ones for tests and headless use.

use crate::core::geo::{LatLng, Point};

/// Mutable viewport state plus the projection the camera needs
///
/// Setters are expected to keep the transform renderable: zoom is clamped
/// into `[min_zoom, max_zoom]`, pitch into the supported range and bearing
/// wrapped into `[-180, 180)`.
pub trait ViewTransform {
    fn center(&self) -> LatLng;
    fn set_center(&mut self, center: LatLng);

    fn zoom(&self) -> f64;
    fn set_zoom(&mut self, zoom: f64);

    fn bearing(&self) -> f64;
    fn set_bearing(&mut self, bearing: f64);

    fn pitch(&self) -> f64;
    fn set_pitch(&mut self, pitch: f64);

    fn min_zoom(&self) -> f64;
    fn max_zoom(&self) -> f64;

    /// Viewport width in pixels
    fn width(&self) -> f64;
    /// Viewport height in pixels
    fn height(&self) -> f64;

    /// Pixel position of the viewport center
    fn center_point(&self) -> Point {
        Point::new(self.width() / 2.0, self.height() / 2.0)
    }

    /// Scale factor of the current zoom, `2^zoom`
    fn scale(&self) -> f64 {
        self.zoom_scale(self.zoom())
    }

    /// Geographic coordinate to world pixel coordinate at the current zoom
    fn project(&self, lat_lng: &LatLng) -> Point;

    /// World pixel coordinate at the current zoom to geographic coordinate
    fn unproject(&self, point: &Point) -> LatLng;

    /// Geographic coordinate to viewport pixel
    fn location_point(&self, lat_lng: &LatLng) -> Point;

    /// Viewport pixel to geographic coordinate
    fn point_location(&self, point: &Point) -> LatLng;

    /// Moves the center so that `lat_lng` renders exactly at `point`
    fn set_location_at_point(&mut self, lat_lng: &LatLng, point: &Point);

    /// Scale factor corresponding to a zoom difference
    fn zoom_scale(&self, zoom: f64) -> f64 {
        2_f64.powf(zoom)
    }

    /// Zoom difference corresponding to a scale factor
    fn scale_zoom(&self, scale: f64) -> f64 {
        scale.log2()
    }

    /// Whether copies of the world are rendered side by side
    fn render_world_copies(&self) -> bool {
        true
    }

    /// Explicit longitude constraint, if any
    fn lng_range(&self) -> Option<(f64, f64)> {
        None
    }
}

/// Opaque handle to a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Callback run once on the next frame
pub type FrameCallback = Box<dyn FnOnce()>;

/// Per-frame scheduling primitive supplied by the host
///
/// `request_frame` must never run the callback synchronously.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Monotonic time source in milliseconds
pub trait Clock {
    fn now(&self) -> f64;
}
