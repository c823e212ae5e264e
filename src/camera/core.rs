use glam::{Mat3, Mat4, Quat, Vec3};

use super::handle::CameraHandle;
use super::spherical::DEGENERATE_RADIUS;

/// Perspective camera with an explicit world orientation.
///
/// Projection parameters are plain fields; the cached projection matrix is
/// only refreshed by [`update_projection`](Self::update_projection), so
/// callers batch their changes and recompute once.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// World rotation; the camera looks down its local -Z with +Y up.
    pub orientation: Quat,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    projection: Mat4,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// Uniform block holding the view-projection matrix and camera metadata,
/// laid out for direct upload by a renderer.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Padding for 16-byte alignment.
    pub(crate) _pad: [f32; 2],
}

impl Camera {
    /// Camera at the origin looking down -Z.
    #[must_use]
    pub fn new(fovy: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            aspect,
            fovy,
            znear,
            zfar,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Recompute the projection matrix from the current fields.
    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
    }

    /// Projection matrix as of the last [`update_projection`](Self::update_projection).
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
            .inverse()
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Unit viewing direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Rotate so the camera faces `target`, keeping +Y up where possible.
    ///
    /// Does nothing when `target` coincides with the eye.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.position;
        if dir.length() < DEGENERATE_RADIUS {
            return;
        }
        let forward = dir.normalize();
        // Looking straight up or down: any horizontal axis works as "up".
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-10 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_at_rh(self.position, target, up);
        let rotation = Mat3::from_mat4(view).transpose();
        self.orientation = Quat::from_mat3(&rotation).normalize();
    }

    /// Resize the viewport and refresh the projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_projection();
    }

    /// Snapshot for GPU upload.
    #[must_use]
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            position: self.position.to_array(),
            aspect: self.aspect,
            forward: self.forward().to_array(),
            fovy: self.fovy,
            znear: self.znear,
            zfar: self.zfar,
            _pad: [0.0; 2],
        }
    }
}

impl CameraHandle for Camera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }

    fn set_fovy(&mut self, fovy: f32) {
        self.fovy = fovy;
    }

    fn set_znear(&mut self, znear: f32) {
        self.znear = znear;
    }

    fn set_zfar(&mut self, zfar: f32) {
        self.zfar = zfar;
    }

    fn look_at(&mut self, target: Vec3) {
        Camera::look_at(self, target);
    }

    fn update_projection(&mut self) {
        Camera::update_projection(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_faces_target() {
        let mut camera = Camera::new(60.0, 1.5, 0.1, 100.0);
        camera.position = Vec3::new(3.0, 2.0, 5.0);
        camera.look_at(Vec3::ZERO);
        let expected = (Vec3::ZERO - camera.position).normalize();
        assert!((camera.forward() - expected).length() < 1e-5);
        assert!((camera.orientation.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn look_at_straight_down_is_finite() {
        let mut camera = Camera::new(60.0, 1.0, 0.1, 100.0);
        camera.position = Vec3::new(0.0, 10.0, 0.0);
        camera.look_at(Vec3::ZERO);
        assert!(camera.orientation.is_finite());
        assert!((camera.forward() - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn look_at_own_position_is_ignored() {
        let mut camera = Camera::new(60.0, 1.0, 0.1, 100.0);
        camera.orientation = Quat::from_rotation_y(0.4);
        camera.look_at(camera.position);
        assert_eq!(camera.orientation, Quat::from_rotation_y(0.4));
    }

    #[test]
    fn projection_is_cached_until_updated() {
        let mut camera = Camera::new(60.0, 1.0, 0.1, 100.0);
        let before = camera.projection_matrix();
        camera.fovy = 30.0;
        assert_eq!(camera.projection_matrix(), before);
        camera.update_projection();
        assert_ne!(camera.projection_matrix(), before);
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let mut camera = Camera::new(60.0, 1.0, 0.1, 100.0);
        camera.position = Vec3::new(1.0, 2.0, 3.0);
        camera.orientation = Quat::from_rotation_x(0.3);
        let eye_in_view = camera.view_matrix().transform_point3(camera.position);
        assert!(eye_in_view.length() < 1e-5);
    }

    #[test]
    fn uniform_bytes_cover_every_field() {
        let camera = Camera::new(75.0, 2.0, 0.01, 1500.0);
        let uniform = camera.uniform();
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&uniform));
        assert_eq!(floats.len(), 28);
        assert_eq!(uniform.fovy, 75.0);
        assert_eq!(uniform.zfar, 1500.0);
    }
}
