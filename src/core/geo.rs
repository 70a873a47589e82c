use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::core::constants::MAX_LATITUDE;

/// Wraps `n` into the half-open range `[min, max)`.
pub fn wrap(n: f64, min: f64, max: f64) -> f64 {
    let d = max - min;
    let w = ((n - min) % d + d) % d + min;
    // `%` can round up to `max` for values just below `min`
    if w >= max {
        min
    } else {
        w
    }
}

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Returns the same location with the longitude wrapped into `[-180, 180)`
    pub fn wrap(&self) -> LatLng {
        LatLng::new(self.lat, Self::wrap_lng(self.lng))
    }

    /// Wraps longitude to `[-180, 180)`
    pub fn wrap_lng(lng: f64) -> f64 {
        if (-180.0..180.0).contains(&lng) {
            lng
        } else {
            wrap(lng, -180.0, 180.0)
        }
    }

    /// Clamps latitude to the range representable in Web Mercator
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Mercator x in degrees-space, `[0, 360)` for wrapped longitudes
    pub(crate) fn mercator_x(&self) -> f64 {
        180.0 + self.lng
    }

    /// Mercator y in degrees-space, 0 at the north edge of the world
    pub(crate) fn mercator_y(&self) -> f64 {
        180.0 - (180.0 / PI) * (PI / 4.0 + self.lat * PI / 360.0).tan().ln()
    }

    /// Inverse of [`LatLng::mercator_x`]/[`LatLng::mercator_y`]
    pub(crate) fn from_mercator(x: f64, y: f64) -> Self {
        let y2 = 180.0 - y;
        let lat = 360.0 / PI * (y2 * PI / 180.0).exp().atan() - 90.0;
        Self::new(lat, x - 180.0)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn divide(&self, scalar: f64) -> Point {
        Point::new(self.x / scalar, self.y / scalar)
    }

    /// Length of the vector from the origin
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        self.subtract(other).magnitude()
    }

    /// Rotates around the origin by `angle` radians (clockwise on screen, y down)
    pub fn rotate(&self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y)
    }

    /// Arithmetic mean of a set of points
    pub fn centroid(points: &[Point]) -> Option<Point> {
        if points.is_empty() {
            return None;
        }
        let sum = points
            .iter()
            .fold(Point::default(), |acc, point| acc.add(point));
        Some(sum.divide(points.len() as f64))
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    pub fn north_west(&self) -> LatLng {
        LatLng::new(self.north_east.lat, self.south_west.lng)
    }

    pub fn south_east(&self) -> LatLng {
        LatLng::new(self.south_west.lat, self.north_east.lng)
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}
