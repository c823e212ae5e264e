// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera keyframe animation for 3D scene viewers.
//!
//! Showreel plays authored camera keyframes (position, target, zoom,
//! projection and orientation) onto a perspective camera and its orbit
//! controls, one frame at a time. Between two keyframes the target and
//! projection are lerped, the eye swings along an arc around the moving
//! target, and the orientation is slerped along the shortest arc.
//!
//! # Key entry points
//!
//! - [`animation::KeyframeAnimator`] - frame-driven keyframe playback
//! - [`camera::Camera`] and [`camera::OrbitControls`] - the driven rig,
//!   reachable through the [`camera::CameraHandle`] and
//!   [`camera::ControlsHandle`] traits
//! - [`scene::SceneExport`] - the JSON scene export format
//! - [`scene::ViewerScene`] - an export wired to camera, controls and
//!   animator, with play/stop/reset for host UI
//! - [`options::Options`] - playback, camera and controls tuning with TOML
//!   presets
//!
//! # Frame loop
//!
//! The host owns the loop. Each frame it reads a [`util::clock::TimeSource`]
//! and calls [`scene::ViewerScene::frame`], which steps the animator, lets
//! the controls apply any user motion, and hands the camera to a
//! [`scene::SceneRenderer`]. Nothing blocks and nothing is shared between
//! animator instances.

pub mod animation;
pub mod camera;
pub mod error;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use error::ShowreelError;
