//! Keyframes and keyframe sequences.

use std::fmt;

use glam::{Quat, Vec3};
use web_time::Duration;

use super::interpolation::normalize_quat;

/// One authored camera pose.
///
/// Built once and never mutated; the orientation is normalized on the way
/// in so interpolation can rely on unit quaternions.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    index: u32,
    position: Vec3,
    target: Vec3,
    zoom: f32,
    fovy: Option<f32>,
    znear: Option<f32>,
    zfar: Option<f32>,
    orientation: Option<Quat>,
    duration: Option<Duration>,
}

impl Keyframe {
    /// Keyframe at `position` looking at `target`, zoomed to their
    /// distance, with no projection, orientation or duration of its own.
    #[must_use]
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            index: 0,
            position,
            target,
            zoom: position.distance(target),
            fovy: None,
            znear: None,
            zfar: None,
            orientation: None,
            duration: None,
        }
    }

    /// Set the authoring index used in log messages.
    #[must_use]
    pub fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    /// Set the orbit radius around the target.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the camera rotation; it is normalized here.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = Some(normalize_quat(orientation));
        self
    }

    /// Set the vertical field of view in degrees.
    #[must_use]
    pub fn with_fovy(mut self, fovy: f32) -> Self {
        self.fovy = Some(fovy);
        self
    }

    /// Set the near clip plane.
    #[must_use]
    pub fn with_znear(mut self, znear: f32) -> Self {
        self.znear = Some(znear);
        self
    }

    /// Set the far clip plane.
    #[must_use]
    pub fn with_zfar(mut self, zfar: f32) -> Self {
        self.zfar = Some(zfar);
        self
    }

    /// Set the duration of the transition into this keyframe. Zero means
    /// "use the default".
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = (!duration.is_zero()).then_some(duration);
        self
    }

    /// Same as [`with_duration`](Self::with_duration) for a millisecond
    /// count; non-positive, non-finite or out-of-range values mean "use the
    /// default".
    #[must_use]
    pub fn with_duration_ms(self, millis: f64) -> Self {
        match Duration::try_from_secs_f64(millis / 1000.0) {
            Ok(duration) if millis > 0.0 => self.with_duration(duration),
            _ => Self {
                duration: None,
                ..self
            },
        }
    }

    /// Authoring index.
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Camera world position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Look-at target.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Orbit radius around the target.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Vertical field of view in degrees, if authored.
    #[must_use]
    pub fn fovy(&self) -> Option<f32> {
        self.fovy
    }

    /// Near clip plane, if authored.
    #[must_use]
    pub fn znear(&self) -> Option<f32> {
        self.znear
    }

    /// Far clip plane, if authored.
    #[must_use]
    pub fn zfar(&self) -> Option<f32> {
        self.zfar
    }

    /// Unit camera rotation, if authored.
    #[must_use]
    pub fn orientation(&self) -> Option<Quat> {
        self.orientation
    }

    /// Transition duration into this keyframe, falling back to `default`.
    #[must_use]
    pub fn transition_duration(&self, default: Duration) -> Duration {
        self.duration.unwrap_or(default)
    }
}

impl fmt::Display for Keyframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "keyframe {}", self.index)
    }
}

/// Ordered keyframes; segment `i` runs from keyframe `i` to `i + 1`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyframeSequence {
    frames: Vec<Keyframe>,
}

impl KeyframeSequence {
    /// Sequence over `frames` in order.
    #[must_use]
    pub fn new(frames: Vec<Keyframe>) -> Self {
        Self { frames }
    }

    /// Number of keyframes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there are no keyframes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether there is at least one transition to play.
    #[must_use]
    pub fn is_animatable(&self) -> bool {
        self.frames.len() >= 2
    }

    /// Number of transitions.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Keyframe at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Keyframe> {
        self.frames.get(index)
    }

    /// Endpoints of segment `index`.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<(&Keyframe, &Keyframe)> {
        Some((self.frames.get(index)?, self.frames.get(index + 1)?))
    }

    /// Iterate keyframes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Keyframe> {
        self.frames.iter()
    }

    /// Total playback time; the first keyframe's duration is not counted.
    #[must_use]
    pub fn total_duration(&self, default: Duration) -> Duration {
        self.frames
            .iter()
            .skip(1)
            .map(|k| k.transition_duration(default))
            .sum()
    }
}

impl FromIterator<Keyframe> for KeyframeSequence {
    fn from_iter<I: IntoIterator<Item = Keyframe>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a KeyframeSequence {
    type Item = &'a Keyframe;
    type IntoIter = std::slice::Iter<'a, Keyframe>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
