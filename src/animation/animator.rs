use std::fmt;
use std::sync::Arc;

use web_time::{Duration, Instant};

use super::interpolation::InterpolationContext;
use super::keyframe::KeyframeSequence;
use super::run::{AnimationRun, AnimatorState};
use crate::camera::{CameraHandle, ControlsHandle};
use crate::options::AnimationOptions;
use crate::util::easing::EasingFunction;

/// What a call to [`KeyframeAnimator::step`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStatus {
    /// No run was active; nothing was touched.
    Idle,
    /// A pose was applied and the run continues.
    ///
    /// A frame that completes a segment reports that segment at progress
    /// 1; the next segment begins on the following frame.
    Running {
        /// Segment the applied pose belongs to.
        segment: usize,
        /// Raw progress through that segment.
        progress: f32,
    },
    /// The final pose was applied and the run ended.
    Finished,
}

impl FrameStatus {
    /// Whether the animator wants another frame.
    #[must_use]
    pub fn wants_frame(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

/// Plays keyframe sequences onto a camera and its controls.
///
/// Call [`start`](Self::start) once, then [`step`](Self::step) once per
/// rendered frame. Each segment `i -> i + 1` takes the end keyframe's
/// duration (or the default) and begins on the frame after the previous
/// segment reached progress 1.
pub struct KeyframeAnimator {
    state: AnimatorState,
    default_duration: Duration,
    easing: EasingFunction,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for KeyframeAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyframeAnimator")
            .field("state", &self.state)
            .field("default_duration", &self.default_duration)
            .field("easing", &self.easing)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for KeyframeAnimator {
    fn default() -> Self {
        Self::new(&AnimationOptions::default())
    }
}

impl KeyframeAnimator {
    /// Idle animator using the playback `options`.
    #[must_use]
    pub fn new(options: &AnimationOptions) -> Self {
        Self {
            state: AnimatorState::Idle,
            default_duration: options.default_duration(),
            easing: options.easing,
            on_complete: None,
        }
    }

    /// Register a callback run each time a sequence plays to its end.
    ///
    /// Not called when a run is cut short by [`stop`](Self::stop).
    pub fn set_on_complete(&mut self, callback: impl FnMut() + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Whether a run is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// The active run, if any.
    #[must_use]
    pub fn run(&self) -> Option<&AnimationRun> {
        match &self.state {
            AnimatorState::Running(run) => Some(run),
            AnimatorState::Idle => None,
        }
    }

    /// Segment in progress, if running.
    #[must_use]
    pub fn current_segment(&self) -> Option<usize> {
        self.run().map(AnimationRun::segment)
    }

    /// Raw progress through the segment in progress, if running.
    #[must_use]
    pub fn segment_progress(&self, now: Instant) -> Option<f32> {
        self.run().map(|run| run.progress(now, self.default_duration))
    }

    /// Begin playing `sequence` from its first segment at `now`.
    ///
    /// Ignored while another run is active, and for sequences with fewer
    /// than two keyframes. Nothing is written to the camera until the
    /// next [`step`](Self::step).
    pub fn start(&mut self, sequence: impl Into<Arc<KeyframeSequence>>, now: Instant) {
        if self.is_running() {
            log::debug!("keyframe animation already running; start ignored");
            return;
        }
        let sequence = sequence.into();
        let count = sequence.len();
        let Some(run) = AnimationRun::new(sequence, now) else {
            log::warn!("need at least 2 keyframes to animate, got {count}");
            return;
        };
        log::info!("playing {count} camera keyframes");
        self.state = AnimatorState::Running(run);
    }

    /// Advance the active run to `now` and apply the resulting pose.
    ///
    /// Does nothing when idle, so a step that lands after
    /// [`stop`](Self::stop) never touches the camera.
    pub fn step<C: CameraHandle, K: ControlsHandle>(
        &mut self,
        now: Instant,
        camera: &mut C,
        controls: &mut K,
    ) -> FrameStatus {
        let AnimatorState::Running(run) = &mut self.state else {
            return FrameStatus::Idle;
        };

        let raw_t = run.progress(now, self.default_duration);
        let ctx = InterpolationContext::simple(raw_t, self.easing.evaluate(raw_t));
        if let Some(pose) = run.interpolate(&ctx) {
            pose.apply(camera, controls);
        }

        let status = FrameStatus::Running {
            segment: run.segment(),
            progress: raw_t,
        };
        if raw_t < 1.0 {
            return status;
        }
        if run.advance(now) {
            log::debug!("camera keyframe segment {} started", run.segment());
            return status;
        }

        self.state = AnimatorState::Idle;
        log::info!("camera keyframe animation finished");
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
        FrameStatus::Finished
    }

    /// Cancel the active run, leaving the camera where the last step put
    /// it. Safe to call at any time.
    pub fn stop(&mut self) {
        if let AnimatorState::Running(run) = &self.state {
            log::debug!("camera keyframe animation stopped in segment {}", run.segment());
        }
        self.state = AnimatorState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::{Quat, Vec3};

    use super::*;
    use crate::animation::keyframe::Keyframe;
    use crate::camera::{Camera, OrbitControls};
    use crate::options::ControlsOptions;

    fn rig() -> (Camera, OrbitControls) {
        let mut camera = Camera::new(60.0, 1.0, 0.1, 100.0);
        camera.position = Vec3::new(9.0, 9.0, 9.0);
        let controls = OrbitControls::new(Vec3::ZERO, ControlsOptions::default());
        (camera, controls)
    }

    fn three_keyframes() -> KeyframeSequence {
        KeyframeSequence::new(vec![
            Keyframe::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO).with_index(0),
            Keyframe::new(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO)
                .with_index(1)
                .with_duration_ms(1000.0),
            Keyframe::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO)
                .with_index(2)
                .with_duration_ms(2000.0),
        ])
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn first_segment_lasts_its_end_keyframe_duration() {
        let (mut camera, mut controls) = rig();
        let mut animator = KeyframeAnimator::default();
        let t0 = Instant::now();
        animator.start(three_keyframes(), t0);

        let status = animator.step(t0 + ms(500), &mut camera, &mut controls);
        assert_eq!(
            status,
            FrameStatus::Running {
                segment: 0,
                progress: 0.5
            }
        );
        let half = 5.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!((camera.position - Vec3::new(half, 0.0, half)).length() < 1e-3);

        let status = animator.step(t0 + ms(1000), &mut camera, &mut controls);
        assert_eq!(
            status,
            FrameStatus::Running {
                segment: 0,
                progress: 1.0
            }
        );
        assert!((camera.position - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-3);
        assert_eq!(animator.current_segment(), Some(1));

        // a repeated timestamp does not advance a second time
        let status = animator.step(t0 + ms(1000), &mut camera, &mut controls);
        assert_eq!(
            status,
            FrameStatus::Running {
                segment: 1,
                progress: 0.0
            }
        );
    }

    #[test]
    fn runs_to_completion_and_lands_on_last_keyframe() {
        let (mut camera, mut controls) = rig();
        let mut animator = KeyframeAnimator::default();
        let t0 = Instant::now();
        animator.start(three_keyframes(), t0);

        let _ = animator.step(t0 + ms(1000), &mut camera, &mut controls);
        let _ = animator.step(t0 + ms(2000), &mut camera, &mut controls);
        assert_eq!(animator.current_segment(), Some(1));
        let status = animator.step(t0 + ms(3000), &mut camera, &mut controls);
        assert_eq!(status, FrameStatus::Finished);
        assert!(!animator.is_running());
        assert!((camera.position - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-3);
        assert_eq!(controls.target(), Vec3::ZERO);
    }

    #[test]
    fn default_duration_applies_without_keyframe_duration() {
        let (mut camera, mut controls) = rig();
        let mut animator = KeyframeAnimator::default();
        let t0 = Instant::now();
        animator.start(
            KeyframeSequence::new(vec![
                Keyframe::new(Vec3::Z, Vec3::ZERO),
                Keyframe::new(Vec3::X, Vec3::ZERO).with_duration_ms(-10.0),
            ]),
            t0,
        );
        let status = animator.step(t0 + ms(600), &mut camera, &mut controls);
        let FrameStatus::Running { segment, progress } = status else {
            panic!("expected a running frame, got {status:?}");
        };
        assert_eq!(segment, 0);
        assert!((progress - 0.5).abs() < 1e-5);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let (mut camera, mut controls) = rig();
        let mut animator = KeyframeAnimator::default();
        let t0 = Instant::now();
        animator.start(three_keyframes(), t0);
        let _ = animator.step(t0 + ms(1000), &mut camera, &mut controls);

        animator.start(three_keyframes(), t0 + ms(1100));
        assert_eq!(animator.current_segment(), Some(1));
        assert_eq!(
            animator.run().map(AnimationRun::segment_start),
            Some(t0 + ms(1000))
        );
    }

    #[test]
    fn short_sequences_never_touch_the_camera() {
        for count in 0..2 {
            let (mut camera, mut controls) = rig();
            let before = camera.clone();
            let mut animator = KeyframeAnimator::default();
            let t0 = Instant::now();
            let frames = (0..count)
                .map(|_| Keyframe::new(Vec3::X, Vec3::Y))
                .collect::<Vec<_>>();
            animator.start(KeyframeSequence::new(frames), t0);

            assert!(!animator.is_running());
            assert_eq!(
                animator.step(t0 + ms(100), &mut camera, &mut controls),
                FrameStatus::Idle
            );
            assert_eq!(camera, before);
            assert_eq!(controls.target(), Vec3::ZERO);
        }
    }

    #[test]
    fn stop_is_idempotent_and_blocks_later_steps() {
        let (mut camera, mut controls) = rig();
        let mut animator = KeyframeAnimator::default();
        animator.stop();
        assert!(!animator.is_running());

        let t0 = Instant::now();
        animator.start(three_keyframes(), t0);
        let _ = animator.step(t0 + ms(250), &mut camera, &mut controls);
        let frozen = camera.clone();
        animator.stop();
        animator.stop();

        assert_eq!(
            animator.step(t0 + ms(750), &mut camera, &mut controls),
            FrameStatus::Idle
        );
        assert_eq!(camera, frozen);
    }

    #[test]
    fn restart_after_stop_begins_at_segment_zero() {
        let (mut camera, mut controls) = rig();
        let mut animator = KeyframeAnimator::default();
        let t0 = Instant::now();
        animator.start(three_keyframes(), t0);
        let _ = animator.step(t0 + ms(1000), &mut camera, &mut controls);
        animator.stop();

        animator.start(three_keyframes(), t0 + ms(1500));
        assert_eq!(animator.current_segment(), Some(0));
        assert_eq!(animator.segment_progress(t0 + ms(2000)), Some(0.5));
    }

    #[test]
    fn completion_callback_fires_once() {
        let (mut camera, mut controls) = rig();
        let calls = Rc::new(Cell::new(0));
        let mut animator = KeyframeAnimator::default();
        let counter = Rc::clone(&calls);
        animator.set_on_complete(move || counter.set(counter.get() + 1));

        let t0 = Instant::now();
        animator.start(
            KeyframeSequence::new(vec![
                Keyframe::new(Vec3::Z, Vec3::ZERO),
                Keyframe::new(Vec3::X, Vec3::ZERO).with_duration_ms(100.0),
            ]),
            t0,
        );
        assert_eq!(
            animator.step(t0 + ms(100), &mut camera, &mut controls),
            FrameStatus::Finished
        );
        let _ = animator.step(t0 + ms(200), &mut camera, &mut controls);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn stop_does_not_report_completion() {
        let calls = Rc::new(Cell::new(0));
        let mut animator = KeyframeAnimator::default();
        let counter = Rc::clone(&calls);
        animator.set_on_complete(move || counter.set(counter.get() + 1));
        animator.start(three_keyframes(), Instant::now());
        animator.stop();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn orientation_is_slerped_when_both_ends_have_one() {
        let (mut camera, mut controls) = rig();
        let mut animator = KeyframeAnimator::default();
        let t0 = Instant::now();
        animator.start(
            KeyframeSequence::new(vec![
                Keyframe::new(Vec3::Z, Vec3::ZERO).with_orientation(Quat::IDENTITY),
                Keyframe::new(Vec3::Z, Vec3::ZERO)
                    .with_orientation(Quat::from_rotation_y(1.0))
                    .with_duration_ms(1000.0),
            ]),
            t0,
        );
        let _ = animator.step(t0 + ms(500), &mut camera, &mut controls);
        assert!(camera.orientation.dot(Quat::from_rotation_y(0.5)).abs() > 1.0 - 1e-5);
    }

    #[test]
    fn easing_shapes_interpolation_but_not_timing() {
        let (mut camera, mut controls) = rig();
        let options = AnimationOptions {
            easing: EasingFunction::QuadraticIn,
            ..AnimationOptions::default()
        };
        let mut animator = KeyframeAnimator::new(&options);
        let t0 = Instant::now();
        animator.start(
            KeyframeSequence::new(vec![
                Keyframe::new(Vec3::Z, Vec3::ZERO).with_zoom(2.0),
                Keyframe::new(Vec3::Z, Vec3::ZERO)
                    .with_zoom(6.0)
                    .with_duration_ms(1000.0),
            ]),
            t0,
        );
        let status = animator.step(t0 + ms(500), &mut camera, &mut controls);
        assert_eq!(
            status,
            FrameStatus::Running {
                segment: 0,
                progress: 0.5
            }
        );
        assert!((camera.position.length() - 3.0).abs() < 1e-4);
    }
}
