//! Configuration system for camera behavior tuning
//!
//! A [`MotionProfile`] resolves into a [`CameraConfig`], either from a preset
//! or a custom configuration, which can also be loaded from JSON.

use crate::animation::EasingFunction;
use crate::core::constants::{
    DEFAULT_BEARING_SNAP, DEFAULT_EASE_DURATION_MS, DEFAULT_FLY_CURVE, DEFAULT_FLY_SPEED,
    DEFAULT_RESET_NORTH_DURATION_MS, DEFAULT_ZOOM_DELTA,
};
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum MotionProfile {
    Standard,
    /// Non-essential animations complete instantly
    ReducedMotion,
    Custom(CameraConfig),
}

impl MotionProfile {
    pub fn resolve(&self) -> CameraConfig {
        match self {
            Self::Standard => CameraConfig::default(),
            Self::ReducedMotion => CameraConfig {
                animation: AnimationDefaults {
                    reduced_motion: true,
                    ..AnimationDefaults::default()
                },
                interaction: InteractionConfig {
                    wheel_zoom_duration_ms: 0.0,
                    ..InteractionConfig::default()
                },
                ..CameraConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Bearings within this many degrees of north snap to north
    pub bearing_snap: f64,
    pub animation: AnimationDefaults,
    pub interaction: InteractionConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            bearing_snap: DEFAULT_BEARING_SNAP,
            animation: AnimationDefaults::default(),
            interaction: InteractionConfig::default(),
        }
    }
}

impl CameraConfig {
    /// Parses a configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Defaults applied when an animation request leaves a field unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationDefaults {
    pub ease_duration_ms: f64,
    pub reset_north_duration_ms: f64,
    pub easing: EasingFunction,
    pub fly_speed: f64,
    pub fly_curve: f64,
    pub zoom_delta: f64,
    pub reduced_motion: bool,
}

impl Default for AnimationDefaults {
    fn default() -> Self {
        Self {
            ease_duration_ms: DEFAULT_EASE_DURATION_MS,
            reset_north_duration_ms: DEFAULT_RESET_NORTH_DURATION_MS,
            easing: EasingFunction::Ease,
            fly_speed: DEFAULT_FLY_SPEED,
            fly_curve: DEFAULT_FLY_CURVE,
            zoom_delta: DEFAULT_ZOOM_DELTA,
            reduced_motion: false,
        }
    }
}

/// Which default gesture behaviors the input handler applies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub drag_pan: bool,
    pub scroll_zoom: bool,
    pub double_click_zoom: bool,
    pub touch_pan: bool,
    pub wheel_zoom_duration_ms: f64,
    pub double_click_zoom_duration_ms: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_pan: true,
            scroll_zoom: true,
            double_click_zoom: true,
            touch_pan: true,
            wheel_zoom_duration_ms: 200.0,
            double_click_zoom_duration_ms: 300.0,
        }
    }
}
