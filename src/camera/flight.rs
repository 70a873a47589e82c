//! "Optimal path" flight between two views
//!
//! Van Wijk, Jarke J.; Nuij, Wim A. A. "Smooth and efficient zooming and
//! panning." INFOVIS '03, pp. 15-21. Names follow the paper: `w` is the
//! visible span, `u` the distance travelled over the ground plane, `s` the
//! path parameter measured in ρ-screenfuls and `S` the total path length.

use crate::core::constants::FLIGHT_EPSILON;

/// A zoom-out, pan, zoom-in curve parameterized by `s ∈ [0, length]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightPath {
    /// Hyperbolic path that pans and zooms together
    Optimal {
        /// r₀: zoom-out factor during the ascent
        r0: f64,
        rho: f64,
        /// w₀: initial visible span in pixels
        w0: f64,
        /// u₁: planar distance to travel in pixels at the initial scale
        u1: f64,
        length: f64,
    },
    /// Exponential zoom with no panning
    ZoomOnly {
        /// -1 when zooming in, 1 when zooming out
        direction: f64,
        rho: f64,
        length: f64,
    },
}

impl FlightPath {
    /// Plans a flight from span `w0` to span `w1` over planar distance `u1`
    /// with curvature `rho`.
    ///
    /// Returns `None` when there is neither distance to cover nor a zoom
    /// change worth animating along a flight path; the caller should ease.
    pub fn plan(w0: f64, w1: f64, u1: f64, rho: f64) -> Option<FlightPath> {
        let rho2 = rho * rho;

        // rᵢ: zoom-out factor at one end, 0 for the ascent, 1 for the descent
        let r = |descent: bool| {
            let (sign, w) = if descent { (-1.0, w1) } else { (1.0, w0) };
            let b = (w1 * w1 - w0 * w0 + sign * rho2 * rho2 * u1 * u1) / (2.0 * w * rho2 * u1);
            ((b * b + 1.0).sqrt() - b).ln()
        };

        let r0 = r(false);
        let length = (r(true) - r0) / rho;

        if u1.abs() >= FLIGHT_EPSILON && length.is_finite() {
            return Some(FlightPath::Optimal {
                r0,
                rho,
                w0,
                u1,
                length,
            });
        }

        // u₀ = u₁: no ascent and descent needed
        if (w0 - w1).abs() < FLIGHT_EPSILON {
            return None;
        }

        Some(FlightPath::ZoomOnly {
            direction: if w1 < w0 { -1.0 } else { 1.0 },
            rho,
            length: (w1 / w0).ln().abs() / rho,
        })
    }

    /// S: total length of the path in ρ-screenfuls
    pub fn length(&self) -> f64 {
        match self {
            FlightPath::Optimal { length, .. } | FlightPath::ZoomOnly { length, .. } => *length,
        }
    }

    /// w(s): visible span relative to the initial span
    pub fn span(&self, s: f64) -> f64 {
        match *self {
            FlightPath::Optimal { r0, rho, .. } => r0.cosh() / (r0 + rho * s).cosh(),
            FlightPath::ZoomOnly { direction, rho, .. } => (direction * rho * s).exp(),
        }
    }

    /// u(s): fraction of the planar distance covered
    pub fn distance(&self, s: f64) -> f64 {
        match *self {
            FlightPath::Optimal { r0, rho, w0, u1, .. } => {
                w0 * ((r0.cosh() * (r0 + rho * s).tanh() - r0.sinh()) / (rho * rho)) / u1
            }
            FlightPath::ZoomOnly { .. } => 0.0,
        }
    }
}

/// ρ that makes the flight's apex reach span `w_max` over distance `u1`
pub fn curve_for_max_span(w_max: f64, u1: f64) -> f64 {
    (w_max / u1 * 2.0).sqrt()
}
