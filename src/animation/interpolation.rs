//! Interpolation between two keyframes.
//!
//! Target, zoom and projection scalars are lerped. The eye travels along an
//! arc around the interpolated target, and the orientation is slerped along
//! the shortest arc.

use glam::{Quat, Vec3};

use super::keyframe::Keyframe;
use super::pose::CameraPose;
use crate::camera::spherical::Spherical;

/// Quaternions shorter than this are treated as missing.
const MIN_QUAT_LENGTH: f32 = 1e-6;

/// Per-frame progress through a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationContext {
    /// Raw progress in `[0, 1]`, straight from the clock.
    pub raw_t: f32,
    /// Progress after easing; this is what the interpolation uses.
    pub eased_t: f32,
}

impl InterpolationContext {
    /// Context with distinct raw and eased values.
    #[must_use]
    pub fn simple(raw_t: f32, eased_t: f32) -> Self {
        Self { raw_t, eased_t }
    }

    /// Context without easing.
    #[must_use]
    pub fn linear(raw_t: f32) -> Self {
        Self::simple(raw_t, raw_t)
    }
}

/// Scalar lerp.
#[inline]
#[must_use]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Per-axis lerp.
#[inline]
#[must_use]
pub fn lerp_vec3(start: Vec3, end: Vec3, t: f32) -> Vec3 {
    start + (end - start) * t
}

/// Lerp for optional values: a value present on one side only is held.
#[inline]
#[must_use]
pub fn lerp_optional(start: Option<f32>, end: Option<f32>, t: f32) -> Option<f32> {
    match (start, end) {
        (Some(a), Some(b)) => Some(lerp(a, b, t)),
        (held @ Some(_), None) | (None, held) => held,
    }
}

/// Unit-length copy of `q`; zero-length or non-finite input becomes the
/// identity rotation.
#[must_use]
pub fn normalize_quat(q: Quat) -> Quat {
    let length = q.length();
    if length.is_finite() && length > MIN_QUAT_LENGTH {
        q * length.recip()
    } else {
        Quat::IDENTITY
    }
}

/// Shortest-arc spherical interpolation between two rotations.
///
/// Inputs are normalized first; `end` is negated when the pair lies in
/// opposite hemispheres. The endpoints are returned unchanged at `t <= 0`
/// and `t >= 1`, and the result is always unit length.
#[must_use]
pub fn slerp_shortest(start: Quat, end: Quat, t: f32) -> Quat {
    let start = normalize_quat(start);
    let end = normalize_quat(end);
    if t <= 0.0 {
        return start;
    }
    if t >= 1.0 {
        return end;
    }
    let near_end = if start.dot(end) < 0.0 { -end } else { end };
    normalize_quat(start.slerp(near_end, t))
}

/// Arc placement of the eye around a moving target.
///
/// Remembers the last well-defined angles of each endpoint so that an
/// endpoint sitting on the target (zero offset) holds its previous
/// direction instead of producing NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitArc {
    start: Option<Spherical>,
    end: Option<Spherical>,
}

impl OrbitArc {
    /// Arc with no remembered angles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arc for the next segment: this segment's end becomes its start.
    #[must_use]
    pub fn carried_forward(self) -> Self {
        Self {
            start: self.end,
            end: None,
        }
    }

    /// Eye position at `t` between `start` and `end`, at `radius` from
    /// `target`.
    ///
    /// Both endpoints are expressed relative to the *interpolated* target;
    /// their polar and azimuth angles are lerped. A negative radius is
    /// treated as zero.
    pub fn position(
        &mut self,
        target: Vec3,
        start: Vec3,
        end: Vec3,
        radius: f32,
        t: f32,
    ) -> Vec3 {
        let start_now = Spherical::from_offset(start - target);
        let end_now = Spherical::from_offset(end - target);

        let from = start_now
            .or(self.start)
            .or(end_now)
            .or(self.end)
            .unwrap_or_default();
        let to = end_now.or(self.end).unwrap_or(from);
        if start_now.is_some() {
            self.start = start_now;
        }
        if end_now.is_some() {
            self.end = end_now;
        }

        let arc = Spherical::new(
            radius.max(0.0),
            lerp(from.phi, to.phi, t),
            lerp(from.theta, to.theta, t),
        );
        target + arc.to_offset()
    }
}

/// Camera pose at `ctx.eased_t` between two keyframes.
pub fn interpolate_pose(
    from: &Keyframe,
    to: &Keyframe,
    ctx: &InterpolationContext,
    arc: &mut OrbitArc,
) -> CameraPose {
    let t = ctx.eased_t;
    let target = lerp_vec3(from.target(), to.target(), t);
    let zoom = lerp(from.zoom(), to.zoom(), t);
    let position = arc.position(target, from.position(), to.position(), zoom, t);
    let orientation = match (from.orientation(), to.orientation()) {
        (Some(a), Some(b)) => Some(slerp_shortest(a, b, t)),
        _ => None,
    };

    CameraPose {
        position,
        target,
        zoom,
        fovy: lerp_optional(from.fovy(), to.fovy(), t),
        znear: lerp_optional(from.znear(), to.znear(), t),
        zfar: lerp_optional(from.zfar(), to.zfar(), t),
        orientation,
    }
}
