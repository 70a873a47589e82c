use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Linear interpolation between two scalars, exact at both endpoints
pub fn interpolate(start: f64, end: f64, t: f64) -> f64 {
    start * (1.0 - t) + end * t
}

/// Various easing functions for animations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EasingFunction {
    /// CSS `ease`, the cubic bezier (0.25, 0.1, 0.25, 1). Camera default.
    Ease,
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseOutExpo,
    /// Cubic bezier with control points (x1, y1) and (x2, y2)
    CubicBezier(f64, f64, f64, f64),
    #[serde(skip)]
    Custom(fn(f64) -> f64),
}

impl Default for EasingFunction {
    fn default() -> Self {
        EasingFunction::Ease
    }
}

impl EasingFunction {
    /// Apply the easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            EasingFunction::Ease => UnitBezier::new(0.25, 0.1, 0.25, 1.0).solve(t),
            EasingFunction::Linear => t,
            EasingFunction::EaseInQuad => t * t,
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::EaseInCubic => t * t * t,
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            EasingFunction::EaseOutSine => (t * PI / 2.0).sin(),
            EasingFunction::EaseInOutSine => -(((PI * t).cos() - 1.0) / 2.0),
            EasingFunction::EaseOutExpo => 1.0 - (2.0_f64).powf(-10.0 * t),
            EasingFunction::CubicBezier(x1, y1, x2, y2) => {
                UnitBezier::new(*x1, *y1, *x2, *y2).solve(t)
            }
            EasingFunction::Custom(f) => f(t),
        }
    }
}

/// Cubic bezier from (0, 0) to (1, 1), evaluated as a timing function
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl UnitBezier {
    const EPSILON: f64 = 1e-6;
    const NEWTON_ITERATIONS: usize = 8;
    const BISECTION_ITERATIONS: usize = 64;

    pub fn new(p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> Self {
        let cx = 3.0 * p1x;
        let bx = 3.0 * (p2x - p1x) - cx;
        let cy = 3.0 * p1y;
        let by = 3.0 * (p2y - p1y) - cy;
        Self {
            ax: 1.0 - cx - bx,
            bx,
            cx,
            ay: 1.0 - cy - by,
            by,
            cy,
        }
    }

    fn sample_curve_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_curve_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_curve_derivative_x(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Finds the curve parameter whose x equals `x`
    fn solve_curve_x(&self, x: f64) -> f64 {
        let mut t2 = x;
        for _ in 0..Self::NEWTON_ITERATIONS {
            let x2 = self.sample_curve_x(t2) - x;
            if x2.abs() < Self::EPSILON {
                return t2;
            }
            let d2 = self.sample_curve_derivative_x(t2);
            if d2.abs() < Self::EPSILON {
                break;
            }
            t2 -= x2 / d2;
        }

        // Newton did not converge, fall back to bisection
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t2 = x;
        if t2 < t0 {
            return t0;
        }
        if t2 > t1 {
            return t1;
        }
        for _ in 0..Self::BISECTION_ITERATIONS {
            if t0 >= t1 {
                break;
            }
            let x2 = self.sample_curve_x(t2);
            if (x2 - x).abs() < Self::EPSILON {
                return t2;
            }
            if x > x2 {
                t0 = t2;
            } else {
                t1 = t2;
            }
            t2 = (t1 - t0) * 0.5 + t0;
        }
        t2
    }

    /// y of the curve at horizontal position `x`
    pub fn solve(&self, x: f64) -> f64 {
        self.sample_curve_y(self.solve_curve_x(x))
    }
}
