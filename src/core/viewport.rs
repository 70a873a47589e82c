use crate::core::constants::{
    DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, MAX_LATITUDE, MAX_PITCH, TILE_SIZE,
};
use crate::core::geo::{LatLng, LatLngBounds, Point};
use crate::traits::ViewTransform;
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center, zoom, bearing, pitch and screen size
///
/// This is the reference [`ViewTransform`]: a spherical Web Mercator world of
/// `TILE_SIZE * 2^zoom` pixels, rotated by the bearing around the viewport
/// center. Pitch is stored and clamped but does not tilt the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    center: LatLng,
    /// The current zoom level
    zoom: f64,
    /// Compass direction of the top of the viewport, in degrees
    bearing: f64,
    /// Tilt away from straight-down, in degrees
    pitch: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    min_zoom: f64,
    /// The maximum allowed zoom level
    max_zoom: f64,
    /// Maximum bounds for the map center
    max_bounds: Option<LatLngBounds>,
    /// Whether world copies are drawn side by side (longitudes wrap)
    render_world_copies: bool,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let mut viewport = Self {
            center: LatLng::default(),
            zoom: DEFAULT_MIN_ZOOM,
            bearing: 0.0,
            pitch: 0.0,
            size,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            max_bounds: None,
            render_world_copies: true,
        };
        viewport.set_zoom(zoom);
        viewport.set_center(center);
        viewport
    }

    /// Sets the maximum bounds for the map center
    pub fn set_max_bounds(&mut self, bounds: Option<LatLngBounds>) {
        self.max_bounds = bounds;
        let center = self.center;
        self.set_center(center);
    }

    /// Get the maximum bounds for the map if set
    pub fn max_bounds(&self) -> Option<&LatLngBounds> {
        self.max_bounds.as_ref()
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    pub fn set_render_world_copies(&mut self, render_world_copies: bool) {
        self.render_world_copies = render_world_copies;
    }

    /// Size of the whole world in pixels at the current zoom
    pub fn world_size(&self) -> f64 {
        TILE_SIZE * self.scale()
    }

    /// Rotation applied to the map plane, in radians
    fn angle(&self) -> f64 {
        -self.bearing.to_radians()
    }

    /// Gets the current viewport bounds in geographical coordinates
    pub fn bounds(&self) -> LatLngBounds {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(self.size.x, 0.0),
            Point::new(self.size.x, self.size.y),
            Point::new(0.0, self.size.y),
        ];
        let first = self.point_location(&corners[0]);
        let mut bounds = LatLngBounds::new(first, first);
        for corner in &corners[1..] {
            bounds.extend(&self.point_location(corner));
        }
        bounds
    }

    /// Gets the resolution in meters per pixel at the current zoom level
    pub fn resolution(&self) -> f64 {
        let earth_circumference = 40_075_016.686;
        earth_circumference * self.center.lat.to_radians().cos() / self.world_size()
    }

    /// Clamps center to the Mercator latitude limit and to max_bounds if set
    fn clamp_center(&self, center: LatLng) -> LatLng {
        let mut clamped = center;
        if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&clamped.lat) {
            clamped.lat = LatLng::clamp_lat(clamped.lat);
        }
        if let Some(bounds) = &self.max_bounds {
            clamped.lat = clamped
                .lat
                .clamp(bounds.south_west.lat, bounds.north_east.lat);
            clamped.lng = clamped
                .lng
                .clamp(bounds.south_west.lng, bounds.north_east.lng);
        }
        clamped
    }
}

impl ViewTransform for Viewport {
    fn center(&self) -> LatLng {
        self.center
    }

    fn set_center(&mut self, center: LatLng) {
        self.center = self.clamp_center(center);
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    fn bearing(&self) -> f64 {
        self.bearing
    }

    fn set_bearing(&mut self, bearing: f64) {
        self.bearing = LatLng::wrap_lng(bearing);
    }

    fn pitch(&self) -> f64 {
        self.pitch
    }

    fn set_pitch(&mut self, pitch: f64) {
        self.pitch = pitch.clamp(0.0, MAX_PITCH);
    }

    fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    fn width(&self) -> f64 {
        self.size.x
    }

    fn height(&self) -> f64 {
        self.size.y
    }

    fn project(&self, lat_lng: &LatLng) -> Point {
        let world_size = self.world_size();
        Point::new(
            lat_lng.mercator_x() * world_size / 360.0,
            lat_lng.mercator_y() * world_size / 360.0,
        )
    }

    fn unproject(&self, point: &Point) -> LatLng {
        let world_size = self.world_size();
        LatLng::from_mercator(point.x * 360.0 / world_size, point.y * 360.0 / world_size)
    }

    fn location_point(&self, lat_lng: &LatLng) -> Point {
        let offset = self
            .project(lat_lng)
            .subtract(&self.project(&self.center))
            .rotate(self.angle());
        self.center_point().add(&offset)
    }

    fn point_location(&self, point: &Point) -> LatLng {
        let offset = point.subtract(&self.center_point()).rotate(-self.angle());
        self.unproject(&self.project(&self.center).add(&offset))
    }

    fn set_location_at_point(&mut self, lat_lng: &LatLng, point: &Point) {
        let offset = point.subtract(&self.center_point()).rotate(-self.angle());
        let center = self.unproject(&self.project(lat_lng).subtract(&offset));
        if self.render_world_copies {
            self.set_center(center.wrap());
        } else {
            self.set_center(center);
        }
    }

    fn render_world_copies(&self) -> bool {
        self.render_world_copies
    }

    fn lng_range(&self) -> Option<(f64, f64)> {
        self.max_bounds
            .as_ref()
            .map(|bounds| (bounds.south_west.lng, bounds.north_east.lng))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}
