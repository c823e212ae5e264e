use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;

/// Offsets shorter than this have no meaningful direction.
pub const DEGENERATE_RADIUS: f32 = 1e-6;

/// Polar angles are kept this far from the poles by [`Spherical::make_safe`].
const POLE_EPSILON: f32 = 1e-6;

/// Spherical coordinates of an offset from an orbit target.
///
/// `phi` is the polar angle measured from +Y, `theta` the azimuth
/// `atan2(x, z)` around +Y. An offset along +Z has `phi = π/2, theta = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the target.
    pub radius: f32,
    /// Polar angle from +Y in radians, in `[0, π]`.
    pub phi: f32,
    /// Azimuth around +Y in radians, in `(-π, π]`.
    pub theta: f32,
}

impl Default for Spherical {
    fn default() -> Self {
        Self::new(1.0, FRAC_PI_2, 0.0)
    }
}

impl Spherical {
    /// Coordinates from explicit components.
    #[must_use]
    pub const fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    /// Convert a Cartesian offset.
    ///
    /// Returns `None` for offsets shorter than [`DEGENERATE_RADIUS`] (or
    /// non-finite ones), whose angles are undefined.
    #[must_use]
    pub fn from_offset(offset: Vec3) -> Option<Self> {
        let radius = offset.length();
        if !radius.is_finite() || radius < DEGENERATE_RADIUS {
            return None;
        }
        Some(Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        })
    }

    /// Convert back to a Cartesian offset.
    #[must_use]
    pub fn to_offset(&self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Pull `phi` off the poles so the azimuth stays well-defined.
    #[must_use]
    pub fn make_safe(self) -> Self {
        Self {
            phi: self.phi.clamp(POLE_EPSILON, PI - POLE_EPSILON),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_z_is_equator_zero_azimuth() {
        let s = Spherical::from_offset(Vec3::new(0.0, 0.0, 5.0)).unwrap();
        assert!((s.radius - 5.0).abs() < 1e-6);
        assert!((s.phi - FRAC_PI_2).abs() < 1e-6);
        assert!(s.theta.abs() < 1e-6);
    }

    #[test]
    fn plus_x_is_quarter_turn() {
        let s = Spherical::from_offset(Vec3::new(5.0, 0.0, 0.0)).unwrap();
        assert!((s.theta - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn offset_survives_conversion() {
        let offset = Vec3::new(-1.3, 2.1, 0.7);
        let back = Spherical::from_offset(offset).unwrap().to_offset();
        assert!((back - offset).length() < 1e-5);
    }

    #[test]
    fn zero_offset_has_no_angles() {
        assert!(Spherical::from_offset(Vec3::ZERO).is_none());
        assert!(Spherical::from_offset(Vec3::splat(1e-8)).is_none());
        assert!(Spherical::from_offset(Vec3::new(f32::NAN, 0.0, 1.0)).is_none());
    }

    #[test]
    fn pole_offset_is_finite() {
        let s = Spherical::from_offset(Vec3::new(0.0, 3.0, 0.0)).unwrap();
        assert_eq!(s.phi, 0.0);
        assert!(s.theta.is_finite());
        assert!(s.make_safe().phi > 0.0);
    }
}
