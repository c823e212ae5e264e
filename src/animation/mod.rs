//! Keyframed camera animation.
//!
//! A [`KeyframeSequence`] is played by a [`KeyframeAnimator`], one segment
//! (pair of neighbouring keyframes) at a time. Each frame the animator
//! interpolates a [`CameraPose`] and writes it through the camera and
//! controls handle traits.

/// Frame-driven playback of keyframe sequences.
pub mod animator;
/// Lerp, slerp and orbit-arc helpers.
pub mod interpolation;
/// Authored keyframes and their ordering.
pub mod keyframe;
/// Interpolated camera state and how it is applied.
pub mod pose;
/// Per-playback segment bookkeeping.
pub mod run;

pub use animator::{FrameStatus, KeyframeAnimator};
pub use interpolation::InterpolationContext;
pub use keyframe::{Keyframe, KeyframeSequence};
pub use pose::CameraPose;
