use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Device class a scene export was tuned for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum DeviceTarget {
    /// Adapt to whatever device is running the viewer.
    #[default]
    Universal,
    /// Mouse and keyboard.
    Desktop,
    /// Touch screen.
    Mobile,
}

impl DeviceTarget {
    /// Whether touch-oriented tuning applies on a device with or without a
    /// touch screen.
    #[must_use]
    pub fn prefers_touch(self, touch_device: bool) -> bool {
        match self {
            Self::Mobile => true,
            Self::Desktop => false,
            Self::Universal => touch_device,
        }
    }

    /// Upper bound on the renderer's pixel ratio, if any.
    #[must_use]
    pub fn max_pixel_ratio(self, touch_device: bool) -> Option<f32> {
        match self {
            Self::Mobile => Some(2.0),
            Self::Desktop => Some(3.0),
            Self::Universal if touch_device => Some(2.0),
            Self::Universal => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Orbit controls tuning.
pub struct ControlsOptions {
    /// Ease user motion out over several frames instead of applying it at
    /// once.
    #[schemars(title = "Damping")]
    pub enable_damping: bool,
    /// Fraction of pending motion applied per frame when damping.
    #[schemars(title = "Damping Factor", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping_factor: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub zoom_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Closest the user may zoom to the target.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest the user may zoom from the target.
    #[schemars(skip)]
    pub max_distance: f32,
    /// Lowest polar angle (radians from +Y) the user may orbit to.
    #[schemars(skip)]
    pub min_polar_angle: f32,
    /// Highest polar angle the user may orbit to.
    #[schemars(skip)]
    pub max_polar_angle: f32,
}

impl Default for ControlsOptions {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.1,
            max_distance: 100.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }
}

impl ControlsOptions {
    /// Copy with speeds and distance limits tuned for a device class.
    #[must_use]
    pub fn tuned_for(&self, device: DeviceTarget, touch_device: bool) -> Self {
        if device.prefers_touch(touch_device) {
            Self {
                rotate_speed: 0.8,
                zoom_speed: 1.2,
                pan_speed: 1.0,
                min_distance: 0.5,
                max_distance: 50.0,
                ..self.clone()
            }
        } else {
            Self {
                rotate_speed: 1.0,
                zoom_speed: 1.0,
                pan_speed: 1.0,
                min_distance: 0.1,
                max_distance: 100.0,
                ..self.clone()
            }
        }
    }
}
