//! Scene export documents.
//!
//! The JSON an authoring tool writes next to a model: the initial camera,
//! camera keyframes, a simple light rig and viewer settings. Field names
//! are camelCase on the wire; unknown fields are ignored.

use std::path::Path;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::animation::interpolation::normalize_quat;
use crate::animation::{Keyframe, KeyframeSequence};
use crate::camera::Camera;
use crate::error::ShowreelError;
use crate::options::{
    AnimationOptions, CameraOptions, DeviceTarget, DEFAULT_DURATION_MS,
};

/// A point or direction as `{x, y, z}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl From<Point3> for Vec3 {
    fn from(p: Point3) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

impl From<Vec3> for Point3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// A rotation as `{x, y, z, w}`; not necessarily normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuatRecord {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W component.
    pub w: f32,
}

impl Default for QuatRecord {
    fn default() -> Self {
        Quat::IDENTITY.into()
    }
}

impl From<QuatRecord> for Quat {
    fn from(q: QuatRecord) -> Self {
        Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

impl From<Quat> for QuatRecord {
    fn from(q: Quat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

/// Camera pose the viewer opens with and returns to on reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InitialCamera {
    /// Vertical field of view in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fov: Option<f32>,
    /// Near clip plane.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near: Option<f32>,
    /// Far clip plane.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub far: Option<f32>,
    /// Eye position.
    pub position: Point3,
    /// Orbit target.
    pub target: Point3,
    /// Eye rotation; when absent the camera looks at the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quaternion: Option<QuatRecord>,
}

impl Default for InitialCamera {
    fn default() -> Self {
        Self {
            fov: None,
            near: None,
            far: None,
            position: Point3 {
                x: 0.0,
                y: 0.0,
                z: 5.0,
            },
            target: Point3::default(),
            quaternion: None,
        }
    }
}

impl InitialCamera {
    /// Build a camera in this pose; projection values the export leaves
    /// out come from `defaults`.
    #[must_use]
    pub fn to_camera(&self, aspect: f32, defaults: &CameraOptions) -> Camera {
        let mut camera = Camera::new(
            self.fov.unwrap_or(defaults.fovy),
            aspect,
            self.near.unwrap_or(defaults.znear),
            self.far.unwrap_or(defaults.zfar),
        );
        camera.position = self.position.into();
        match self.quaternion {
            Some(q) => camera.orientation = normalize_quat(q.into()),
            None => camera.look_at(self.target.into()),
        }
        camera
    }
}

/// One authored camera keyframe on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyframeRecord {
    /// Authoring index (1-based in exports, informational only).
    #[serde(default)]
    pub index: u32,
    /// Eye position.
    pub position: Point3,
    /// Orbit target.
    pub target: Point3,
    /// Orbit radius; defaults to the position-target distance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f32>,
    /// Vertical field of view in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fov: Option<f32>,
    /// Near clip plane.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub near: Option<f32>,
    /// Far clip plane.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub far: Option<f32>,
    /// Eye rotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quaternion: Option<QuatRecord>,
    /// Milliseconds taken to reach this keyframe from the previous one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl KeyframeRecord {
    /// Convert to an animation keyframe.
    #[must_use]
    pub fn to_keyframe(&self) -> Keyframe {
        let mut keyframe = Keyframe::new(self.position.into(), self.target.into())
            .with_index(self.index);
        if let Some(zoom) = self.zoom {
            keyframe = keyframe.with_zoom(zoom);
        }
        if let Some(fov) = self.fov {
            keyframe = keyframe.with_fovy(fov);
        }
        if let Some(near) = self.near {
            keyframe = keyframe.with_znear(near);
        }
        if let Some(far) = self.far {
            keyframe = keyframe.with_zfar(far);
        }
        if let Some(q) = self.quaternion {
            keyframe = keyframe.with_orientation(q.into());
        }
        if let Some(ms) = self.duration {
            keyframe = keyframe.with_duration_ms(ms);
        }
        keyframe
    }

    fn validate(&self) -> Result<(), ShowreelError> {
        let fail = |reason: &str| ShowreelError::InvalidKeyframe {
            index: self.index,
            reason: reason.to_owned(),
        };
        if !Vec3::from(self.position).is_finite() {
            return Err(fail("position is not finite"));
        }
        if !Vec3::from(self.target).is_finite() {
            return Err(fail("target is not finite"));
        }
        if self.zoom.is_some_and(|z| !z.is_finite() || z < 0.0) {
            return Err(fail("zoom must be a finite, non-negative distance"));
        }
        if self.fov.is_some_and(|f| !(f > 0.0 && f < 180.0)) {
            return Err(fail("fov must lie strictly between 0 and 180 degrees"));
        }
        if self.near.is_some_and(|n| !(n.is_finite() && n > 0.0)) {
            return Err(fail("near plane must be positive"));
        }
        if self.far.is_some_and(|f| !f.is_finite()) {
            return Err(fail("far plane is not finite"));
        }
        if let (Some(near), Some(far)) = (self.near, self.far) {
            if far <= near {
                return Err(fail("far plane must lie beyond the near plane"));
            }
        }
        if let Some(q) = self.quaternion {
            let q = Quat::from(q);
            if !q.is_finite() || q.length_squared() == 0.0 {
                return Err(fail("quaternion must be finite and non-zero"));
            }
        }
        if self.duration.is_some_and(|d| !d.is_finite()) {
            return Err(fail("duration is not finite"));
        }
        Ok(())
    }
}

/// Hemisphere (sky/ground) light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HemisphereLight {
    /// Light intensity.
    pub intensity: f32,
    /// Sky color, packed `0xRRGGBB`.
    pub color: u32,
    /// Ground color, packed `0xRRGGBB`.
    pub ground_color: u32,
}

impl Default for HemisphereLight {
    fn default() -> Self {
        Self {
            intensity: 1.2,
            color: 0xFF_FFFF,
            ground_color: 0x88_8888,
        }
    }
}

/// Directional key light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    /// Light intensity.
    pub intensity: f32,
    /// Color, packed `0xRRGGBB`.
    pub color: u32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            intensity: 0.8,
            color: 0xFF_FFFF,
        }
    }
}

/// Lights shipped with the export. Either may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Lighting {
    /// Ambient sky/ground light.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hemisphere: Option<HemisphereLight>,
    /// Key light.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directional: Option<DirectionalLight>,
}

/// Viewer playback settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Default segment duration in milliseconds.
    pub animation_speed: u32,
    /// Start the camera animation as soon as the viewer opens.
    pub auto_play_camera: bool,
    /// Start model clip playback as soon as the viewer opens.
    pub auto_play_model: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            animation_speed: DEFAULT_DURATION_MS,
            auto_play_camera: false,
            auto_play_model: false,
        }
    }
}

/// A complete scene export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneExport {
    /// Opening camera pose.
    pub camera: InitialCamera,
    /// Camera keyframes in playback order.
    pub keyframes: Vec<KeyframeRecord>,
    /// Light rig.
    pub lighting: Lighting,
    /// Clear color, packed `0xRRGGBB`.
    pub background: u32,
    /// Playback settings.
    pub settings: Settings,
    /// Device class the export was tuned for.
    pub device_target: DeviceTarget,
}

impl SceneExport {
    /// Parse an export from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ShowreelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse an export file.
    pub fn load(path: &Path) -> Result<Self, ShowreelError> {
        let content = std::fs::read_to_string(path)?;
        let export = Self::from_json(&content)?;
        log::info!(
            "loaded scene export {} ({} keyframes)",
            path.display(),
            export.keyframes.len()
        );
        Ok(export)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ShowreelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Keyframes as an animation sequence.
    #[must_use]
    pub fn keyframes(&self) -> KeyframeSequence {
        self.keyframes.iter().map(KeyframeRecord::to_keyframe).collect()
    }

    /// `base` with the default segment duration taken from the export's
    /// settings.
    #[must_use]
    pub fn animation_options(&self, base: &AnimationOptions) -> AnimationOptions {
        AnimationOptions {
            default_duration_ms: if self.settings.animation_speed > 0 {
                self.settings.animation_speed
            } else {
                base.default_duration_ms
            },
            ..base.clone()
        }
    }

    /// Check the initial camera and every keyframe for values that would
    /// produce a broken view, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ShowreelError> {
        let camera = &self.camera;
        if let Some(fov) = camera.fov.filter(|f| !(*f > 0.0 && *f < 180.0)) {
            return Err(ShowreelError::InvalidCamera(format!(
                "fov {fov} must lie strictly between 0 and 180 degrees"
            )));
        }
        if camera.near.is_some_and(|n| !(n.is_finite() && n > 0.0)) {
            return Err(ShowreelError::InvalidCamera(
                "near plane must be positive".to_owned(),
            ));
        }
        if camera.far.is_some_and(|f| !f.is_finite()) {
            return Err(ShowreelError::InvalidCamera(
                "far plane is not finite".to_owned(),
            ));
        }
        if let (Some(near), Some(far)) = (camera.near, camera.far) {
            if far <= near {
                return Err(ShowreelError::InvalidCamera(format!(
                    "clip planes {near}..{far} are not an increasing range"
                )));
            }
        }
        if !Vec3::from(camera.position).is_finite() || !Vec3::from(camera.target).is_finite() {
            return Err(ShowreelError::InvalidCamera(
                "position and target must be finite".to_owned(),
            ));
        }
        if let Some(q) = camera.quaternion {
            let q = Quat::from(q);
            if !q.is_finite() || q.length_squared() == 0.0 {
                return Err(ShowreelError::InvalidCamera(
                    "quaternion must be finite and non-zero".to_owned(),
                ));
            }
        }
        self.keyframes.iter().try_for_each(KeyframeRecord::validate)
    }
}

/// One rendered frame of camera state, as the headless player writes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseRecord {
    /// Frame number, starting at 0.
    pub frame: u64,
    /// Time since playback started, in milliseconds.
    pub time_ms: f64,
    /// Keyframe segment being played, if any.
    pub segment: Option<usize>,
    /// Eye position.
    pub position: Point3,
    /// Orbit target.
    pub target: Point3,
    /// Eye rotation.
    pub quaternion: QuatRecord,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
}

impl PoseRecord {
    /// Record `camera` orbiting `target` at `elapsed` into playback.
    #[must_use]
    pub fn capture(
        frame: u64,
        elapsed: Duration,
        segment: Option<usize>,
        camera: &Camera,
        target: Vec3,
    ) -> Self {
        Self {
            frame,
            time_ms: elapsed.as_secs_f64() * 1000.0,
            segment,
            position: camera.position.into(),
            target: target.into(),
            quaternion: camera.orientation.into(),
            fov: camera.fovy,
            near: camera.znear,
            far: camera.zfar,
        }
    }
}

/// Unpack `0xRRGGBB` into `[r, g, b]` channels in `0..=1`.
#[must_use]
pub fn unpack_rgb(packed: u32) -> [f32; 3] {
    let channel = |shift: u32| ((packed >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}
