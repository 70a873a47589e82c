//! Option records for camera operations
//!
//! Every field that may be left out is an `Option`: `None` means "keep the
//! current value" (or "use the configured default"), which is distinct from
//! explicitly passing the current value.

use crate::animation::EasingFunction;
use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};

/// Target camera state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    pub center: Option<LatLng>,
    pub zoom: Option<f64>,
    pub bearing: Option<f64>,
    pub pitch: Option<f64>,
    /// Geographic point that stays fixed on screen while zooming or rotating
    pub around: Option<LatLng>,
}

impl CameraOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_center(mut self, center: LatLng) -> Self {
        self.center = Some(center);
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = Some(bearing);
        self
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn with_around(mut self, around: LatLng) -> Self {
        self.around = Some(around);
        self
    }
}

/// How a transition is animated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationOptions {
    /// Milliseconds; `None` uses the operation's default
    pub duration: Option<f64>,
    pub easing: Option<EasingFunction>,
    /// Pixel offset of the target center from the viewport center
    pub offset: Point,
    /// `false` forces the duration to 0
    pub animate: bool,
    /// Animate even when reduced motion is configured
    pub essential: bool,
    /// Hold back the end events this many milliseconds after the last frame
    pub delay_end_events: f64,
    /// Skip `movestart`, for gestures that already fired it
    pub no_move_start: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration: None,
            easing: None,
            offset: Point::default(),
            animate: true,
            essential: false,
            delay_end_events: 0.0,
            no_move_start: false,
        }
    }
}

impl AnimationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completes in a single synchronous step
    pub fn instant() -> Self {
        Self::default().with_duration(0.0)
    }

    pub fn with_duration(mut self, duration_ms: f64) -> Self {
        self.duration = Some(duration_ms);
        self
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn essential(mut self) -> Self {
        self.essential = true;
        self
    }

    pub fn with_delay_end_events(mut self, delay_ms: f64) -> Self {
        self.delay_end_events = delay_ms;
        self
    }

    pub fn without_move_start(mut self) -> Self {
        self.no_move_start = true;
        self
    }
}

/// Tuning of the `fly_to` flight path; unset fields use the configured defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightOptions {
    /// ρ, the zoom-out curvature
    pub curve: Option<f64>,
    /// Zoom at the apex of the flight; overrides `curve`
    pub min_zoom: Option<f64>,
    /// Average speed in ρ-screenfuls per second
    pub speed: Option<f64>,
    /// Average speed in screenfuls per second; overrides `speed`
    pub screen_speed: Option<f64>,
    /// Flights that would last longer than this (ms) jump instead
    pub max_duration: Option<f64>,
}

impl FlightOptions {
    pub fn with_curve(mut self, curve: f64) -> Self {
        self.curve = Some(curve);
        self
    }

    pub fn with_min_zoom(mut self, min_zoom: f64) -> Self {
        self.min_zoom = Some(min_zoom);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_screen_speed(mut self, screen_speed: f64) -> Self {
        self.screen_speed = Some(screen_speed);
        self
    }

    pub fn with_max_duration(mut self, max_duration_ms: f64) -> Self {
        self.max_duration = Some(max_duration_ms);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EaseToOptions {
    pub camera: CameraOptions,
    pub animation: AnimationOptions,
}

impl EaseToOptions {
    pub fn new(camera: CameraOptions) -> Self {
        Self {
            camera,
            animation: AnimationOptions::default(),
        }
    }

    pub fn with_animation(mut self, animation: AnimationOptions) -> Self {
        self.animation = animation;
        self
    }
}

impl From<CameraOptions> for EaseToOptions {
    fn from(camera: CameraOptions) -> Self {
        Self::new(camera)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlyToOptions {
    pub camera: CameraOptions,
    pub animation: AnimationOptions,
    pub flight: FlightOptions,
}

impl FlyToOptions {
    pub fn new(camera: CameraOptions) -> Self {
        Self {
            camera,
            ..Self::default()
        }
    }

    pub fn with_animation(mut self, animation: AnimationOptions) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_flight(mut self, flight: FlightOptions) -> Self {
        self.flight = flight;
        self
    }
}

impl From<CameraOptions> for FlyToOptions {
    fn from(camera: CameraOptions) -> Self {
        Self::new(camera)
    }
}

/// Distances in pixels from each viewport edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Per-edge padding as supplied by the caller; every edge must be present
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaddingEdges {
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
    pub right: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Padding {
    Uniform(f64),
    Edges(PaddingEdges),
}

impl Default for Padding {
    fn default() -> Self {
        Padding::Uniform(0.0)
    }
}

impl Padding {
    pub fn edges(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Padding::Edges(PaddingEdges {
            top: Some(top),
            bottom: Some(bottom),
            left: Some(left),
            right: Some(right),
        })
    }

    /// The four insets, or `None` if any edge is missing
    pub fn insets(&self) -> Option<EdgeInsets> {
        match self {
            Padding::Uniform(p) => Some(EdgeInsets {
                top: *p,
                bottom: *p,
                left: *p,
                right: *p,
            }),
            Padding::Edges(edges) => Some(EdgeInsets {
                top: edges.top?,
                bottom: edges.bottom?,
                left: edges.left?,
                right: edges.right?,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitBoundsOptions {
    pub padding: Padding,
    /// Pixel offset of the fitted center from the viewport center
    pub offset: Point,
    /// Upper limit for the fitted zoom; defaults to the transform's maximum
    pub max_zoom: Option<f64>,
    /// Ease in a straight line instead of flying
    pub linear: bool,
    pub animation: AnimationOptions,
    pub flight: FlightOptions,
}

impl FitBoundsOptions {
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_max_zoom(mut self, max_zoom: f64) -> Self {
        self.max_zoom = Some(max_zoom);
        self
    }

    pub fn linear(mut self, linear: bool) -> Self {
        self.linear = linear;
        self
    }

    pub fn with_animation(mut self, animation: AnimationOptions) -> Self {
        self.animation = animation;
        self
    }
}

/// Camera computed to fit a set of bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsCamera {
    pub center: LatLng,
    pub zoom: f64,
    pub bearing: f64,
    /// Requested offset plus the shift caused by uneven padding
    pub offset: Point,
}

impl BoundsCamera {
    pub fn camera_options(&self) -> CameraOptions {
        CameraOptions::new()
            .with_center(self.center)
            .with_zoom(self.zoom)
            .with_bearing(self.bearing)
    }
}
