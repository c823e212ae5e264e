use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::util::easing::EasingFunction;

/// Segment duration when neither a keyframe nor the options give a usable
/// one.
pub const DEFAULT_DURATION_MS: u32 = 1200;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Keyframe playback parameters.
pub struct AnimationOptions {
    /// Segment duration used when a keyframe's own duration is missing or
    /// not positive.
    #[schemars(title = "Default Duration (ms)", range(min = 100, max = 10000), extend("step" = 50))]
    pub default_duration_ms: u32,
    /// Curve applied to each segment's progress.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// Frame rate of the headless player.
    #[schemars(skip)]
    pub frame_rate: u32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            default_duration_ms: DEFAULT_DURATION_MS,
            easing: EasingFunction::Linear,
            frame_rate: 60,
        }
    }
}

impl AnimationOptions {
    /// [`default_duration_ms`](Self::default_duration_ms) as a `Duration`,
    /// or [`DEFAULT_DURATION_MS`] when it is zero.
    #[must_use]
    pub fn default_duration(&self) -> Duration {
        let ms = match self.default_duration_ms {
            0 => DEFAULT_DURATION_MS,
            ms => ms,
        };
        Duration::from_millis(u64::from(ms))
    }
}
