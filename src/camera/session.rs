//! The single in-flight animation of a camera

use crate::animation::{interpolate, EasingFunction};
use crate::camera::flight::FlightPath;
use crate::core::constants::{EASE_SPEEDUP_MAX, EASE_SPEEDUP_MIN};
use crate::core::geo::{LatLng, Point};
use crate::events::EventData;
use crate::traits::{FrameHandle, ViewTransform};

/// Which axes an animation is changing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Axes {
    pub zooming: bool,
    pub rotating: bool,
    pub pitching: bool,
}

/// Start and target of a scalar axis
#[derive(Debug, Clone, Copy)]
pub(crate) struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn changes(&self) -> bool {
        self.start != self.end
    }

    pub fn at(&self, k: f64) -> f64 {
        interpolate(self.start, self.end, k)
    }
}

/// Everything needed to place the camera at progress `k`
#[derive(Debug, Clone, Copy)]
pub(crate) enum EasePath {
    /// Straight screen-space pan with zoom-dependent speedup, or a fixed anchor
    Linear {
        zoom: Span,
        bearing: Span,
        pitch: Span,
        /// World pixel of the start location at the start zoom
        from: Point,
        delta: Point,
        final_scale: f64,
        point_at_offset: Point,
        around: Option<(LatLng, Point)>,
    },
    /// Zoom and center follow a flight path
    Flight {
        path: FlightPath,
        zoom: Span,
        bearing: Span,
        pitch: Span,
        center: LatLng,
        from: Point,
        delta: Point,
        point_at_offset: Point,
    },
}

impl EasePath {
    /// Writes the camera state at eased progress `k` into `transform`
    pub fn apply<T>(&self, transform: &mut T, axes: Axes, k: f64)
    where
        T: ViewTransform + ?Sized,
    {
        match *self {
            EasePath::Linear {
                zoom,
                bearing,
                pitch,
                from,
                delta,
                final_scale,
                point_at_offset,
                around,
            } => {
                if axes.zooming {
                    transform.set_zoom(zoom.at(k));
                }
                if axes.rotating {
                    transform.set_bearing(bearing.at(k));
                }
                if axes.pitching {
                    transform.set_pitch(pitch.at(k));
                }

                if let Some((location, point)) = around {
                    transform.set_location_at_point(&location, &point);
                    return;
                }

                let scale = transform.zoom_scale(transform.zoom() - zoom.start);
                let base = if zoom.end > zoom.start {
                    final_scale.min(EASE_SPEEDUP_MAX)
                } else {
                    final_scale.max(EASE_SPEEDUP_MIN)
                };
                let speedup = base.powf(1.0 - k);
                let center =
                    transform.unproject(&from.add(&delta.multiply(k * speedup)).multiply(scale));
                place_center(transform, center, &point_at_offset);
            }
            EasePath::Flight {
                path,
                zoom,
                bearing,
                pitch,
                center,
                from,
                delta,
                point_at_offset,
            } => {
                let s = k * path.length();
                let scale = 1.0 / path.span(s);

                let next_zoom = if k == 1.0 {
                    zoom.end
                } else {
                    zoom.start + transform.scale_zoom(scale)
                };
                transform.set_zoom(next_zoom);
                if axes.rotating {
                    transform.set_bearing(bearing.at(k));
                }
                if axes.pitching {
                    transform.set_pitch(pitch.at(k));
                }

                let next_center = if k == 1.0 {
                    center
                } else {
                    transform
                        .unproject(&from.add(&delta.multiply(path.distance(s))).multiply(scale))
                };
                place_center(transform, next_center, &point_at_offset);
            }
        }
    }
}

fn place_center<T>(transform: &mut T, center: LatLng, point: &Point)
where
    T: ViewTransform + ?Sized,
{
    let center = if transform.render_world_copies() {
        center.wrap()
    } else {
        center
    };
    transform.set_location_at_point(&center, point);
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Phase {
    Animating {
        start: f64,
        duration: f64,
        easing: EasingFunction,
        path: EasePath,
    },
    /// Final frame applied; end events are held until `until`
    Settling { until: f64 },
}

/// The active animation. Replaced or cleared as a whole, never field by field.
#[derive(Debug, Clone)]
pub(crate) struct EaseSession {
    pub id: u64,
    pub phase: Phase,
    pub axes: Axes,
    pub event_data: EventData,
    pub delay_end_events: f64,
    pub frame: Option<FrameHandle>,
}

impl EaseSession {
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::Viewport;

    #[test]
    fn test_span_endpoints_are_exact() {
        let span = Span::new(0.1, 0.7);
        assert_eq!(span.at(0.0), 0.1);
        assert_eq!(span.at(1.0), 0.7);
        assert!(span.changes());
        assert!(!Span::new(3.0, 3.0).changes());
    }

    #[test]
    fn test_linear_path_reaches_target() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 2.0, Point::new(512.0, 512.0));
        let target = LatLng::new(10.0, 20.0);
        let from = viewport.project(&viewport.center());
        let delta = viewport.project(&target).subtract(&from);
        let path = EasePath::Linear {
            zoom: Span::new(2.0, 4.0),
            bearing: Span::new(0.0, 0.0),
            pitch: Span::new(0.0, 0.0),
            from,
            delta,
            final_scale: 4.0,
            point_at_offset: viewport.center_point(),
            around: None,
        };
        let axes = Axes {
            zooming: true,
            ..Axes::default()
        };

        path.apply(&mut viewport, axes, 1.0);
        assert_eq!(viewport.zoom(), 4.0);
        assert!((viewport.center().lat - 10.0).abs() < 1e-6);
        assert!((viewport.center().lng - 20.0).abs() < 1e-6);
    }

    /// Fraction of the planned pan covered at `k`, measured in start-zoom pixels
    fn pan_fraction_at(start_zoom: f64, end_zoom: f64, k: f64) -> f64 {
        let reference = Viewport::new(LatLng::new(0.0, 0.0), start_zoom, Point::new(512.0, 512.0));
        let from = reference.project(&reference.center());
        let delta = reference.project(&LatLng::new(0.0, 40.0)).subtract(&from);
        let path = EasePath::Linear {
            zoom: Span::new(start_zoom, end_zoom),
            bearing: Span::new(0.0, 0.0),
            pitch: Span::new(0.0, 0.0),
            from,
            delta,
            final_scale: reference.zoom_scale(end_zoom - start_zoom),
            point_at_offset: reference.center_point(),
            around: None,
        };
        let axes = Axes {
            zooming: true,
            ..Axes::default()
        };

        let mut viewport = reference.clone();
        path.apply(&mut viewport, axes, k);
        (reference.project(&viewport.center()).x - from.x) / delta.x
    }

    #[test]
    fn test_pan_speedup_mid_animation() {
        // (start zoom, end zoom, expected speedup base)
        let cases = [
            (4.0, 4.5, 2.0_f64.sqrt()),
            (4.0, 7.0, 2.0),
            (4.0, 3.5, 0.5_f64.sqrt()),
            (4.0, 1.0, 0.5),
        ];
        for (start, end, base) in cases {
            let covered = pan_fraction_at(start, end, 0.5);
            let expected = 0.5 * base.sqrt();
            assert!(
                (covered - expected).abs() < 1e-9,
                "zoom {} -> {}: covered {} expected {}",
                start,
                end,
                covered,
                expected
            );
        }
    }

    #[test]
    fn test_pan_without_zoom_is_linear() {
        assert!((pan_fraction_at(4.0, 4.0, 0.25) - 0.25).abs() < 1e-9);
        assert!((pan_fraction_at(4.0, 4.0, 1.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_stays_fixed() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 3.0, Point::new(400.0, 400.0));
        let anchor = LatLng::new(5.0, 5.0);
        let anchor_point = viewport.location_point(&anchor);
        let path = EasePath::Linear {
            zoom: Span::new(3.0, 5.0),
            bearing: Span::new(0.0, 0.0),
            pitch: Span::new(0.0, 0.0),
            from: Point::default(),
            delta: Point::default(),
            final_scale: 4.0,
            point_at_offset: viewport.center_point(),
            around: Some((anchor, anchor_point)),
        };
        let axes = Axes {
            zooming: true,
            ..Axes::default()
        };

        path.apply(&mut viewport, axes, 0.5);
        let now = viewport.location_point(&anchor);
        assert!(now.distance_to(&anchor_point) < 1e-6);
    }
}
