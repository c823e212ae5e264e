//! Easing curves applied to segment progress.
//!
//! Keyframe transitions are linear by default; presets may pick a curve to
//! soften the start or end of every segment.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing curve mapping raw progress in `[0, 1]` to eased progress.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EasingFunction {
    /// No easing; progress is used as-is.
    #[default]
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Hermite smoothstep: `3t² - 2t³`, zero slope at both ends.
    SmoothStep,
    /// Cubic Bezier-style curve with fixed endpoints and two control values.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control value.
        c1: f32,
        /// Second control value.
        c2: f32,
    },
}

impl EasingFunction {
    /// Ease-out curve used by presets that want a gentle arrival.
    pub const EASE_OUT: Self = Self::CubicHermite { c1: 0.33, c2: 1.0 };

    /// Evaluate the curve at `t`.
    ///
    /// Input is clamped to `[0, 1]`; every curve maps 0 to 0 and 1 to 1.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_is_identity() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn every_curve_hits_endpoints() {
        for easing in [
            EasingFunction::Linear,
            EasingFunction::QuadraticIn,
            EasingFunction::QuadraticOut,
            EasingFunction::SmoothStep,
            EasingFunction::EASE_OUT,
        ] {
            assert!(easing.evaluate(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.evaluate(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(EasingFunction::Linear.evaluate(-0.5), 0.0);
        assert_eq!(EasingFunction::Linear.evaluate(1.5), 1.0);
        assert_eq!(EasingFunction::SmoothStep.evaluate(2.0), 1.0);
    }

    #[test]
    fn smoothstep_is_symmetric() {
        let s = EasingFunction::SmoothStep;
        assert_eq!(s.evaluate(0.5), 0.5);
        let a = s.evaluate(0.25);
        let b = s.evaluate(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ease_out_runs_ahead_early() {
        assert!(EasingFunction::EASE_OUT.evaluate(0.25) > 0.25);
    }

    #[test]
    fn default_is_linear() {
        assert_eq!(EasingFunction::default(), EasingFunction::Linear);
    }

    #[test]
    fn parses_tagged_toml() {
        let easing: EasingFunction =
            toml::from_str("kind = \"cubic_hermite\"\nc1 = 0.2\nc2 = 0.9\n")
                .unwrap();
        assert_eq!(easing, EasingFunction::CubicHermite { c1: 0.2, c2: 0.9 });
    }
}
