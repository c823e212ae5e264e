//! State of one playback through a keyframe sequence.

use std::sync::Arc;

use web_time::{Duration, Instant};

use super::interpolation::{interpolate_pose, InterpolationContext, OrbitArc};
use super::keyframe::{Keyframe, KeyframeSequence};
use super::pose::CameraPose;

/// Whether an animator is playing.
///
/// The `Running` variant owns everything a playback needs, so clearing it
/// is the only way to cancel and a cancelled run cannot be resumed.
#[derive(Debug, Default)]
pub enum AnimatorState {
    /// Nothing is playing.
    #[default]
    Idle,
    /// A sequence is playing.
    Running(AnimationRun),
}

impl AnimatorState {
    /// Whether a run is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }
}

/// One playback of a sequence, segment by segment.
#[derive(Debug, Clone)]
pub struct AnimationRun {
    sequence: Arc<KeyframeSequence>,
    segment: usize,
    segment_start: Instant,
    arc: OrbitArc,
}

impl AnimationRun {
    /// Run starting at segment 0 at `now`.
    ///
    /// Returns `None` if `sequence` has fewer than two keyframes.
    #[must_use]
    pub fn new(sequence: Arc<KeyframeSequence>, now: Instant) -> Option<Self> {
        sequence.is_animatable().then(|| Self {
            sequence,
            segment: 0,
            segment_start: now,
            arc: OrbitArc::new(),
        })
    }

    /// The sequence being played.
    #[must_use]
    pub fn sequence(&self) -> &Arc<KeyframeSequence> {
        &self.sequence
    }

    /// Index of the segment in progress.
    #[must_use]
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// When the segment in progress began.
    #[must_use]
    pub fn segment_start(&self) -> Instant {
        self.segment_start
    }

    /// Endpoints of the segment in progress.
    #[must_use]
    pub fn endpoints(&self) -> Option<(&Keyframe, &Keyframe)> {
        self.sequence.segment(self.segment)
    }

    /// Duration of the segment in progress; the end keyframe's own
    /// duration wins over `default`.
    #[must_use]
    pub fn segment_duration(&self, default: Duration) -> Duration {
        self.endpoints()
            .map_or(default, |(_, end)| end.transition_duration(default))
    }

    /// Raw progress through the segment in progress, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Instant, default: Duration) -> f32 {
        let elapsed = now.saturating_duration_since(self.segment_start);
        let duration = self.segment_duration(default);
        if duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
        }
    }

    /// Pose for the segment in progress.
    pub fn interpolate(&mut self, ctx: &InterpolationContext) -> Option<CameraPose> {
        let (from, to) = self.sequence.segment(self.segment)?;
        Some(interpolate_pose(from, to, ctx, &mut self.arc))
    }

    /// Move to the next segment, starting it at `now`.
    ///
    /// Returns `false` (and stays put) if the segment in progress was the
    /// last one.
    pub fn advance(&mut self, now: Instant) -> bool {
        if self.segment + 1 >= self.sequence.segment_count() {
            return false;
        }
        self.segment += 1;
        self.segment_start = now;
        self.arc = self.arc.carried_forward();
        true
    }
}
