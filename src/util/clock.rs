//! Time sources for frame-driven playback.
//!
//! The animator never reads the wall clock itself; hosts hand it the
//! current instant each frame. [`SystemClock`] backs interactive viewers,
//! [`ManualClock`] backs tests and the headless player.

use std::cell::Cell;

use web_time::{Duration, Instant};

/// Source of "now" for one frame loop.
pub trait TimeSource {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall clock (`performance.now()` on wasm).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Cell<Duration>,
}

impl ManualClock {
    /// Clock anchored at the current wall-clock instant.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Clock anchored at `origin`.
    #[must_use]
    pub fn starting_at(origin: Instant) -> Self {
        Self {
            origin,
            elapsed: Cell::new(Duration::ZERO),
        }
    }

    /// Move the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.elapsed.set(self.elapsed.get() + step);
    }

    /// Total time advanced since the anchor.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

/// Frame interval for a target rate; a rate of 0 falls back to 60 Hz.
#[must_use]
pub fn frame_interval(fps: u32) -> Duration {
    let fps = if fps == 0 { 60 } else { fps };
    Duration::from_secs_f64(1.0 / f64::from(fps))
}
