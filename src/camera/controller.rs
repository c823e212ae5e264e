use glam::{Quat, Vec2, Vec3};

use super::core::Camera;
use super::handle::{CameraHandle, ControlsHandle};
use super::spherical::Spherical;
use crate::options::{CameraOptions, ControlsOptions};

/// Radians of orbit per pixel of drag at rotate speed 1.
const ROTATE_RADIANS_PER_PIXEL: f32 = 0.005;
/// Target travel per pixel of drag, per unit of orbit distance.
const PAN_UNITS_PER_PIXEL: f32 = 0.002;
/// Distance factor per wheel step at zoom speed 1.
const ZOOM_BASE: f32 = 0.95;
/// Pending motion below this is dropped.
const MOTION_EPSILON: f32 = 1e-5;

/// Orbit controls: a look-at target plus damped user rotate/zoom/pan.
///
/// User input only accumulates pending motion; [`update`](ControlsHandle::update)
/// applies it. When nothing is pending, `update` just re-reads the orbit
/// from the camera, so poses written by an animator are left untouched.
///
/// A target written through [`ControlsHandle::set_target`] marks the next
/// update as a resync: pending motion is held, not applied, until an
/// update arrives without a fresh external pose.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    target: Vec3,
    external_pose: bool,
    orbit: Spherical,
    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
    pan_offset: Vec3,
    options: ControlsOptions,
}

impl OrbitControls {
    /// Controls orbiting `target`.
    #[must_use]
    pub fn new(target: Vec3, options: ControlsOptions) -> Self {
        Self {
            target,
            external_pose: false,
            orbit: Spherical::default(),
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            options,
        }
    }

    /// Active tuning.
    #[must_use]
    pub fn options(&self) -> &ControlsOptions {
        &self.options
    }

    /// Orbit as of the last update.
    #[must_use]
    pub fn orbit(&self) -> Spherical {
        self.orbit
    }

    /// Override the user zoom limits.
    pub fn set_distance_limits(&mut self, min: f32, max: f32) {
        self.options.min_distance = min;
        self.options.max_distance = max.max(min);
    }

    /// Queue an orbit drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        let scale = ROTATE_RADIANS_PER_PIXEL * self.options.rotate_speed;
        self.theta_delta -= delta.x * scale;
        self.phi_delta -= delta.y * scale;
    }

    /// Queue a zoom of `steps` wheel notches; positive moves closer.
    pub fn zoom(&mut self, steps: f32) {
        self.scale *= ZOOM_BASE.powf(steps * self.options.zoom_speed);
    }

    /// Queue a screen-space pan of `delta` pixels for a camera with the
    /// given orientation.
    pub fn pan(&mut self, delta: Vec2, orientation: Quat) {
        let right = orientation * Vec3::X;
        let up = orientation * Vec3::Y;
        let speed =
            PAN_UNITS_PER_PIXEL * self.options.pan_speed * self.orbit.radius;
        self.pan_offset += (right * -delta.x + up * delta.y) * speed;
    }

    /// Whether user motion is waiting to be applied.
    #[must_use]
    pub fn has_pending_motion(&self) -> bool {
        self.theta_delta.abs() > MOTION_EPSILON
            || self.phi_delta.abs() > MOTION_EPSILON
            || (self.scale - 1.0).abs() > MOTION_EPSILON
            || self.pan_offset.length() > MOTION_EPSILON
    }

    /// Drop any pending user motion.
    pub fn cancel_motion(&mut self) {
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.scale = 1.0;
        self.pan_offset = Vec3::ZERO;
    }

    /// Frame the box `min..max`: aim at its center from +Z, at a distance
    /// where it fits the field of view with `fit_padding` to spare.
    ///
    /// Also tightens the zoom limits and far plane to the model's scale.
    /// Returns the chosen distance, or `None` for an empty or non-finite
    /// box.
    pub fn fit_to_bounds(
        &mut self,
        camera: &mut Camera,
        min: Vec3,
        max: Vec3,
        options: &CameraOptions,
    ) -> Option<f32> {
        let size = max - min;
        let max_dim = size.max_element();
        if !size.is_finite() || max_dim <= 0.0 {
            return None;
        }
        let center = (min + max) * 0.5;
        let half_fov = camera.fovy.to_radians() * 0.5;
        let distance = (max_dim * 0.5 / half_fov.tan()).abs() * options.fit_padding;

        self.cancel_motion();
        self.target = center;
        camera.position = center + Vec3::Z * distance;
        camera.look_at(center);
        self.set_distance_limits(
            (max_dim * options.fit_min_distance_factor).max(0.01),
            distance * options.fit_max_distance_factor,
        );
        camera.zfar = distance * options.fit_far_factor;
        camera.update_projection();
        let _ = self.update(camera);

        log::debug!("fit camera to bounds: center {center}, distance {distance:.3}");
        Some(distance)
    }

    fn decay_motion(&mut self, applied: f32) {
        let keep = 1.0 - applied;
        self.theta_delta *= keep;
        self.phi_delta *= keep;
        self.pan_offset *= keep;
        self.scale = 1.0;
        if !self.has_pending_motion() {
            self.cancel_motion();
        }
    }
}

impl ControlsHandle for OrbitControls {
    fn target(&self) -> Vec3 {
        self.target
    }

    fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.external_pose = true;
    }

    fn update<C: CameraHandle>(&mut self, camera: &mut C) -> bool {
        if let Some(orbit) =
            Spherical::from_offset(camera.position() - self.target)
        {
            self.orbit = orbit;
        }
        if std::mem::take(&mut self.external_pose) || !self.has_pending_motion() {
            return false;
        }

        let applied = if self.options.enable_damping {
            self.options.damping_factor.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let orbit = Spherical {
            radius: (self.orbit.radius * self.scale)
                .max(self.options.min_distance)
                .min(self.options.max_distance),
            phi: (self.orbit.phi + self.phi_delta * applied)
                .max(self.options.min_polar_angle)
                .min(self.options.max_polar_angle),
            theta: self.orbit.theta + self.theta_delta * applied,
        }
        .make_safe();

        self.target += self.pan_offset * applied;
        camera.set_position(self.target + orbit.to_offset());
        camera.look_at(self.target);
        self.orbit = orbit;
        self.decay_motion(applied);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(position: Vec3) -> Camera {
        let mut camera = Camera::new(60.0, 1.0, 0.1, 100.0);
        camera.position = position;
        camera.look_at(Vec3::ZERO);
        camera
    }

    fn undamped() -> ControlsOptions {
        ControlsOptions {
            enable_damping: false,
            ..ControlsOptions::default()
        }
    }

    #[test]
    fn idle_update_leaves_camera_alone() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        camera.orientation = Quat::from_rotation_y(0.7);
        let before = camera.clone();
        let mut controls = OrbitControls::new(Vec3::ZERO, undamped());

        assert!(!controls.update(&mut camera));
        assert_eq!(camera, before);
        assert!((controls.orbit().radius - 5.0).abs() < 1e-5);
    }

    #[test]
    fn rotate_orbits_at_constant_distance() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        let mut controls = OrbitControls::new(Vec3::ZERO, undamped());
        controls.rotate(Vec2::new(-100.0, 0.0));

        assert!(controls.update(&mut camera));
        assert!((camera.position.length() - 5.0).abs() < 1e-4);
        assert!(camera.position.x > 0.0);
        assert!(!controls.has_pending_motion());
        let to_target = (-camera.position).normalize();
        assert!((camera.forward() - to_target).length() < 1e-4);
    }

    #[test]
    fn zoom_respects_distance_limits() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        let mut controls = OrbitControls::new(Vec3::ZERO, undamped());
        controls.set_distance_limits(4.0, 6.0);
        controls.zoom(50.0);
        assert!(controls.update(&mut camera));
        assert!((camera.position.length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        let mut controls = OrbitControls::new(Vec3::ZERO, ControlsOptions::default());
        controls.rotate(Vec2::new(-200.0, 0.0));

        assert!(controls.update(&mut camera));
        let first = controls.orbit().theta;
        assert!(controls.has_pending_motion());
        assert!(controls.update(&mut camera));
        assert!(controls.orbit().theta > first);
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        let mut controls = OrbitControls::new(Vec3::ZERO, undamped());
        let _ = controls.update(&mut camera);
        controls.pan(Vec2::new(-50.0, 0.0), camera.orientation);

        assert!(controls.update(&mut camera));
        assert!(controls.target().x > 0.0);
        let offset = camera.position - controls.target();
        assert!((offset.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn external_pose_holds_pending_motion() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        let mut controls = OrbitControls::new(Vec3::ZERO, undamped());
        controls.rotate(Vec2::new(-100.0, 0.0));
        controls.zoom(3.0);

        camera.position = Vec3::new(0.0, 2.0, 4.0);
        camera.orientation = Quat::from_rotation_x(-0.3);
        let written = camera.clone();
        controls.set_target(Vec3::Y);
        assert!(!controls.update(&mut camera));
        assert_eq!(camera, written);
        assert!(controls.has_pending_motion());
        assert!((controls.orbit().radius - 17.0f32.sqrt()).abs() < 1e-4);

        // no fresh external pose: the held motion now applies
        assert!(controls.update(&mut camera));
        assert!(!controls.has_pending_motion());
        assert!(camera.position.x > 0.0);
    }

    #[test]
    fn fit_frames_box_center() {
        let mut camera = Camera::new(75.0, 1.0, 0.01, 1000.0);
        let mut controls = OrbitControls::new(Vec3::ZERO, undamped());
        let distance = controls
            .fit_to_bounds(
                &mut camera,
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(1.0, 2.0, 1.0),
                &CameraOptions::default(),
            )
            .unwrap();

        let expected = (1.0 / 37.5f32.to_radians().tan()) * 2.2;
        assert!((distance - expected).abs() < 1e-4);
        assert_eq!(controls.target(), Vec3::new(0.0, 1.0, 0.0));
        assert!((camera.position - Vec3::new(0.0, 1.0, distance)).length() < 1e-4);
        assert!((camera.zfar - distance * 200.0).abs() < 1e-2);
        assert!((controls.options().min_distance - 0.4).abs() < 1e-6);
    }

    #[test]
    fn fit_rejects_empty_box() {
        let mut camera = Camera::new(75.0, 1.0, 0.01, 1000.0);
        let before = camera.clone();
        let mut controls = OrbitControls::new(Vec3::ZERO, undamped());
        assert!(controls
            .fit_to_bounds(&mut camera, Vec3::ONE, Vec3::ONE, &CameraOptions::default())
            .is_none());
        assert_eq!(camera, before);
    }
}
