use glam::{Quat, Vec3};

/// Mutable view of a camera that an animator can drive.
///
/// Setters only store values; projection-affecting changes take effect
/// after [`update_projection`](Self::update_projection).
pub trait CameraHandle {
    /// Current eye position.
    fn position(&self) -> Vec3;
    /// Move the eye.
    fn set_position(&mut self, position: Vec3);
    /// Current world rotation.
    fn orientation(&self) -> Quat;
    /// Replace the world rotation.
    fn set_orientation(&mut self, orientation: Quat);
    /// Set the vertical field of view in degrees.
    fn set_fovy(&mut self, fovy: f32);
    /// Set the near clipping plane distance.
    fn set_znear(&mut self, znear: f32);
    /// Set the far clipping plane distance.
    fn set_zfar(&mut self, zfar: f32);
    /// Rotate to face `target`.
    fn look_at(&mut self, target: Vec3);
    /// Recompute the projection after field of view or clip plane changes.
    fn update_projection(&mut self);
}

/// Orbit-style controls that keep a look-at target for a camera.
pub trait ControlsHandle {
    /// Current look-at target.
    fn target(&self) -> Vec3;
    /// Move the look-at target as part of an externally written pose.
    fn set_target(&mut self, target: Vec3);
    /// Reconcile internal orbit state with `camera`.
    ///
    /// Must be called after every external pose change, and must leave a
    /// pose written since the last [`set_target`](Self::set_target) as it
    /// is. Returns `true` if the controls moved the camera.
    fn update<C: CameraHandle>(&mut self, camera: &mut C) -> bool;
}
