use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection defaults and model-framing parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees, used when an export has none.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Multiplier on the tight framing distance when fitting a model.
    #[schemars(title = "Fit Padding", range(min = 1.0, max = 5.0), extend("step" = 0.1))]
    pub fit_padding: f32,
    /// Far plane as a multiple of the fitted distance.
    #[schemars(skip)]
    pub fit_far_factor: f32,
    /// Minimum orbit distance as a fraction of the model's largest extent.
    #[schemars(skip)]
    pub fit_min_distance_factor: f32,
    /// Maximum orbit distance as a multiple of the fitted distance.
    #[schemars(skip)]
    pub fit_max_distance_factor: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.01,
            zfar: 1000.0,
            fit_padding: 2.2,
            fit_far_factor: 200.0,
            fit_min_distance_factor: 0.2,
            fit_max_distance_factor: 50.0,
        }
    }
}
