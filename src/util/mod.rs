//! Shared utilities: easing curves and frame time sources.

pub mod clock;
pub mod easing;
