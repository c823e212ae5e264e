//! A scene export wired to a camera, orbit controls and an animator.
//!
//! ```
//! # use showreel::camera::{Camera, OrbitControls};
//! # use showreel::scene::{SceneExport, ViewerScene};
//! # use showreel::options::Options;
//! # use web_time::Instant;
//! let export = SceneExport::default();
//! let mut viewer = ViewerScene::new(export, &Options::default(), Instant::now());
//! let mut draw = |camera: &Camera, _: &OrbitControls| {
//!     let _uniform = camera.uniform();
//! };
//! let running = viewer.frame(Instant::now(), &mut draw);
//! assert!(!running);
//! ```

use std::sync::Arc;

use glam::Vec3;
use web_time::Instant;

use super::export::{unpack_rgb, Lighting, SceneExport};
use crate::animation::{FrameStatus, KeyframeAnimator, KeyframeSequence};
use crate::camera::{Camera, ControlsHandle, OrbitControls};
use crate::options::{CameraOptions, Options};

/// Consumer of the per-frame camera state, e.g. a GPU renderer.
pub trait SceneRenderer {
    /// Draw one frame from `camera`.
    fn render(&mut self, camera: &Camera, controls: &OrbitControls);
}

impl<F: FnMut(&Camera, &OrbitControls)> SceneRenderer for F {
    fn render(&mut self, camera: &Camera, controls: &OrbitControls) {
        self(camera, controls);
    }
}

/// Result of [`ViewerScene::play_camera`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Playback began from the first keyframe.
    Started,
    /// A run was already active and was left alone.
    AlreadyRunning,
    /// The export has fewer than two keyframes.
    NoAnimation,
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`ViewerScene`].
pub struct ViewerSceneBuilder {
    export: SceneExport,
    options: Options,
    aspect: f32,
    touch_device: bool,
}

impl ViewerSceneBuilder {
    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the viewport aspect ratio (width / height).
    #[must_use]
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Whether the host has a touch screen; picks mobile tuning for
    /// universal exports.
    #[must_use]
    pub fn with_touch_device(mut self, touch_device: bool) -> Self {
        self.touch_device = touch_device;
        self
    }

    /// Build the scene, starting the camera animation at `now` if the
    /// export asks for autoplay.
    #[must_use]
    pub fn build(self, now: Instant) -> ViewerScene {
        let Self {
            export,
            options,
            aspect,
            touch_device,
        } = self;

        let mut camera = export.camera.to_camera(aspect, &options.camera);
        let controls_options = options
            .controls
            .tuned_for(export.device_target, touch_device);
        let mut controls =
            OrbitControls::new(export.camera.target.into(), controls_options);
        let _ = controls.update(&mut camera);

        let animator =
            KeyframeAnimator::new(&export.animation_options(&options.animation));
        let keyframes = Arc::new(export.keyframes());
        let mut scene = ViewerScene {
            camera,
            controls,
            animator,
            keyframes,
            camera_options: options.camera,
            touch_device,
            export,
        };

        if scene.export.settings.auto_play_camera {
            let outcome = scene.play_camera(now);
            log::debug!("camera autoplay: {outcome:?}");
        }
        scene
    }
}

// ── Scene ────────────────────────────────────────────────────────────────

/// Viewer state for one scene export.
#[derive(Debug)]
pub struct ViewerScene {
    export: SceneExport,
    camera: Camera,
    controls: OrbitControls,
    animator: KeyframeAnimator,
    keyframes: Arc<KeyframeSequence>,
    camera_options: CameraOptions,
    touch_device: bool,
}

impl ViewerScene {
    /// Start building a scene for `export`.
    #[must_use]
    pub fn builder(export: SceneExport) -> ViewerSceneBuilder {
        ViewerSceneBuilder {
            export,
            options: Options::default(),
            aspect: 1.0,
            touch_device: false,
        }
    }

    /// Scene with square aspect on a non-touch device.
    #[must_use]
    pub fn new(export: SceneExport, options: &Options, now: Instant) -> Self {
        Self::builder(export).with_options(options.clone()).build(now)
    }

    /// The export this scene was built from.
    #[must_use]
    pub fn export(&self) -> &SceneExport {
        &self.export
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The orbit controls.
    #[must_use]
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// The orbit controls, for feeding user input.
    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    /// The camera animator.
    #[must_use]
    pub fn animator(&self) -> &KeyframeAnimator {
        &self.animator
    }

    /// The export's keyframes.
    #[must_use]
    pub fn keyframes(&self) -> &Arc<KeyframeSequence> {
        &self.keyframes
    }

    /// Whether the camera animation is playing.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Whether the host should frame the model itself because the export
    /// has no keyframes.
    #[must_use]
    pub fn needs_fit(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Clear color as `[r, g, b]` in `0..=1`.
    #[must_use]
    pub fn background(&self) -> [f32; 3] {
        unpack_rgb(self.export.background)
    }

    /// The export's light rig, for the host to build its lights from.
    #[must_use]
    pub fn lighting(&self) -> &Lighting {
        &self.export.lighting
    }

    /// Whether the host should start the model's own clip on open.
    #[must_use]
    pub fn auto_play_model(&self) -> bool {
        self.export.settings.auto_play_model
    }

    /// Pixel ratio cap for the renderer, if the device class has one.
    #[must_use]
    pub fn max_pixel_ratio(&self) -> Option<f32> {
        self.export
            .device_target
            .max_pixel_ratio(self.touch_device)
    }

    /// Play the export's keyframes from the start.
    pub fn play_camera(&mut self, now: Instant) -> PlayOutcome {
        if !self.keyframes.is_animatable() {
            log::info!("no camera animation available");
            return PlayOutcome::NoAnimation;
        }
        if self.animator.is_running() {
            return PlayOutcome::AlreadyRunning;
        }
        self.animator.start(Arc::clone(&self.keyframes), now);
        PlayOutcome::Started
    }

    /// Stop the camera animation where it is.
    pub fn stop(&mut self) {
        self.animator.stop();
    }

    /// Return to the export's opening camera and stop any animation.
    pub fn reset_view(&mut self) {
        self.animator.stop();
        let aspect = self.camera.aspect;
        self.camera = self.export.camera.to_camera(aspect, &self.camera_options);
        self.controls.cancel_motion();
        self.controls.set_target(self.export.camera.target.into());
        let _ = self.controls.update(&mut self.camera);
        log::debug!("view reset");
    }

    /// Frame the box `min..max` with the camera. Returns the chosen
    /// distance, or `None` for an empty box.
    pub fn fit_to_bounds(&mut self, min: Vec3, max: Vec3) -> Option<f32> {
        self.controls
            .fit_to_bounds(&mut self.camera, min, max, &self.camera_options)
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Advance one frame: step the animation, let the controls apply user
    /// motion when nothing is animating, then render.
    ///
    /// Input queued while an animation plays is held until the first frame
    /// after the run ends; the finishing frame shows the last keyframe
    /// exactly. Returns whether the camera animation is still running.
    pub fn frame<R: SceneRenderer + ?Sized>(
        &mut self,
        now: Instant,
        renderer: &mut R,
    ) -> bool {
        let status = self
            .animator
            .step(now, &mut self.camera, &mut self.controls);
        if status == FrameStatus::Idle {
            let _ = self.controls.update(&mut self.camera);
        }
        renderer.render(&self.camera, &self.controls);
        self.animator.is_running()
    }
}
