//! Browser bindings.
//!
//! The page keeps its own renderer; each animation frame it calls
//! [`WebViewer::tick`] and reads [`WebViewer::pose`] or
//! [`WebViewer::uniform`] to position its camera.

use glam::{Vec2, Vec3};
use wasm_bindgen::prelude::*;

use crate::camera::{Camera, ControlsHandle, OrbitControls};
use crate::options::Options;
use crate::scene::{unpack_rgb, PlayOutcome, SceneExport, ViewerScene};
use crate::util::clock::{SystemClock, TimeSource};

/// Floats in a [`WebViewer::pose`] array: position (3), target (3),
/// quaternion xyzw (4), fov, near, far.
pub const POSE_LEN: usize = 13;

fn touch_device() -> bool {
    web_sys::window().is_some_and(|w| w.navigator().max_touch_points() > 0)
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A scene export driven from JavaScript.
#[wasm_bindgen]
pub struct WebViewer {
    scene: ViewerScene,
    clock: SystemClock,
}

#[wasm_bindgen]
impl WebViewer {
    /// Parse and validate `json`, then build the viewer for a canvas of
    /// `width` x `height` pixels.
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str, width: u32, height: u32) -> Result<WebViewer, JsValue> {
        let export = SceneExport::from_json(json).map_err(to_js)?;
        export.validate().map_err(to_js)?;
        let clock = SystemClock;
        let aspect = if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        let scene = ViewerScene::builder(export)
            .with_options(Options::default())
            .with_aspect(aspect)
            .with_touch_device(touch_device())
            .build(clock.now());
        Ok(Self { scene, clock })
    }

    /// Play the camera animation; `false` if there is none or it is
    /// already playing.
    #[wasm_bindgen(js_name = playCamera)]
    pub fn play_camera(&mut self) -> bool {
        let outcome = self.scene.play_camera(self.clock.now());
        if outcome == PlayOutcome::NoAnimation {
            log::warn!("no camera animation available");
        }
        outcome == PlayOutcome::Started
    }

    /// Stop the camera animation.
    pub fn stop(&mut self) {
        self.scene.stop();
    }

    /// Return to the opening camera.
    #[wasm_bindgen(js_name = resetView)]
    pub fn reset_view(&mut self) {
        self.scene.reset_view();
    }

    /// Frame a model's bounding box. Returns the camera distance, or a
    /// negative value for an empty box.
    #[wasm_bindgen(js_name = fitToBounds)]
    pub fn fit_to_bounds(
        &mut self,
        min_x: f32,
        min_y: f32,
        min_z: f32,
        max_x: f32,
        max_y: f32,
        max_z: f32,
    ) -> f32 {
        self.scene
            .fit_to_bounds(
                Vec3::new(min_x, min_y, min_z),
                Vec3::new(max_x, max_y, max_z),
            )
            .unwrap_or(-1.0)
    }

    /// Track a canvas resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.scene.resize(width, height);
    }

    /// Queue an orbit drag in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.scene.controls_mut().rotate(Vec2::new(dx, dy));
    }

    /// Queue a zoom in wheel notches; positive moves closer.
    pub fn zoom(&mut self, steps: f32) {
        self.scene.controls_mut().zoom(steps);
    }

    /// Advance one frame. Returns whether the camera animation is still
    /// playing.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        self.scene.frame(now, &mut |_: &Camera, _: &OrbitControls| {})
    }

    /// Current camera pose as [`POSE_LEN`] floats.
    pub fn pose(&self) -> Vec<f32> {
        let camera = self.scene.camera();
        let target = self.scene.controls().target();
        let mut pose = Vec::with_capacity(POSE_LEN);
        pose.extend_from_slice(&camera.position.to_array());
        pose.extend_from_slice(&target.to_array());
        pose.extend_from_slice(&camera.orientation.to_array());
        pose.extend_from_slice(&[camera.fovy, camera.znear, camera.zfar]);
        pose
    }

    /// Camera uniform block as floats, ready for a uniform buffer.
    pub fn uniform(&self) -> Vec<f32> {
        let uniform = self.scene.camera().uniform();
        bytemuck::cast_slice(std::slice::from_ref(&uniform)).to_vec()
    }

    /// Clear color as `[r, g, b]`.
    pub fn background(&self) -> Vec<f32> {
        self.scene.background().to_vec()
    }

    /// Hemisphere light as `[intensity, sky r, g, b, ground r, g, b]`, or
    /// empty when the export has none.
    #[wasm_bindgen(js_name = hemisphereLight)]
    pub fn hemisphere_light(&self) -> Vec<f32> {
        self.scene
            .lighting()
            .hemisphere
            .map(|light| {
                let mut out = vec![light.intensity];
                out.extend_from_slice(&unpack_rgb(light.color));
                out.extend_from_slice(&unpack_rgb(light.ground_color));
                out
            })
            .unwrap_or_default()
    }

    /// Directional light as `[intensity, r, g, b]`, or empty when the
    /// export has none.
    #[wasm_bindgen(js_name = directionalLight)]
    pub fn directional_light(&self) -> Vec<f32> {
        self.scene
            .lighting()
            .directional
            .map(|light| {
                let mut out = vec![light.intensity];
                out.extend_from_slice(&unpack_rgb(light.color));
                out
            })
            .unwrap_or_default()
    }

    /// Whether the page should start the model's clip on load.
    #[wasm_bindgen(js_name = autoPlayModel)]
    pub fn auto_play_model(&self) -> bool {
        self.scene.auto_play_model()
    }

    /// Pixel ratio cap for the device class, or 0 for none.
    #[wasm_bindgen(js_name = maxPixelRatio)]
    pub fn max_pixel_ratio(&self) -> f32 {
        self.scene.max_pixel_ratio().unwrap_or(0.0)
    }
}

/// Module start: route panics and `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }
}
