//! Camera system for keyframed scene viewing.
//!
//! Provides a perspective camera, orbit controls, the handle traits an
//! animator drives them through, and the spherical coordinates both use.

/// Orbit controls with damped rotate, zoom and pan.
pub mod controller;
/// Perspective camera and GPU uniform type.
pub mod core;
/// Traits through which animators mutate cameras and controls.
pub mod handle;
/// Radius/polar/azimuth coordinates of an offset from a target.
pub mod spherical;

pub use self::controller::OrbitControls;
pub use self::core::{Camera, CameraUniform};
pub use self::handle::{CameraHandle, ControlsHandle};
pub use self::spherical::Spherical;
