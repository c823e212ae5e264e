use glam::{Quat, Vec3};

use crate::camera::{Camera, CameraHandle, ControlsHandle};

/// Interpolated camera state for one frame.
///
/// Projection scalars and orientation are optional: `None` leaves that part
/// of the camera as it is (for the orientation, the camera is aimed at the
/// target instead).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position.
    pub position: Vec3,
    /// Look-at target.
    pub target: Vec3,
    /// Distance from the eye to the target.
    pub zoom: f32,
    /// Vertical field of view in degrees.
    pub fovy: Option<f32>,
    /// Near clip plane.
    pub znear: Option<f32>,
    /// Far clip plane.
    pub zfar: Option<f32>,
    /// World rotation.
    pub orientation: Option<Quat>,
}

impl CameraPose {
    /// Full pose of `camera` aimed at `target`.
    #[must_use]
    pub fn capture(camera: &Camera, target: Vec3) -> Self {
        Self {
            position: camera.position,
            target,
            zoom: camera.position.distance(target),
            fovy: Some(camera.fovy),
            znear: Some(camera.znear),
            zfar: Some(camera.zfar),
            orientation: Some(camera.orientation),
        }
    }

    /// Write this pose to `camera` and `controls`.
    ///
    /// The projection is refreshed and the controls reconciled every time,
    /// even when only the position moved.
    pub fn apply<C: CameraHandle, K: ControlsHandle>(
        &self,
        camera: &mut C,
        controls: &mut K,
    ) {
        controls.set_target(self.target);
        camera.set_position(self.position);
        match self.orientation {
            Some(orientation) => camera.set_orientation(orientation),
            None => camera.look_at(self.target),
        }
        if let Some(fovy) = self.fovy {
            camera.set_fovy(fovy);
        }
        if let Some(znear) = self.znear {
            camera.set_znear(znear);
        }
        if let Some(zfar) = self.zfar {
            camera.set_zfar(zfar);
        }
        camera.update_projection();
        let _ = controls.update(camera);
    }
}
