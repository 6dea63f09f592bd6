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

//! Touch, mouse and analog-stick locomotion for first-person scenes.
//!
//! Locomote turns raw pointer events and joystick samples into per-frame
//! velocity deltas, and keeps a camera's yaw in step with joystick turning
//! without fighting the scene's own look controls.
//!
//! # Key entry points
//!
//! - [`rig::LocomotionRig`] - owns every source and drives them per frame
//! - [`source`] - the drag, tap and joystick velocity sources
//! - [`rotation::RotationSynchronizer`] - joystick-driven camera yaw
//! - [`options::Options`] - per-source settings, loadable from TOML
//!
//! # Architecture
//!
//! Sources never integrate position. A host collects
//! [`input::PointerEvent`]s from its surface and routes them through the
//! rig, which tracks which source listens to which event kind via
//! [`surface::ListenerRegistry`]. Once per frame the rig rotates the camera
//! first, then sums the deltas of every active source; the host adds that
//! sum to its own velocity. All sources share one frame: -Z is forward.
//!
//! With the `viewer` feature, `Viewer` opens a winit window and drives a
//! rig from live input.

pub mod axis;
pub mod error;
pub mod input;
pub mod options;
pub mod rig;
pub mod rotation;
pub mod source;
pub mod surface;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use axis::{AxisRegistry, AxisSample, AxisSampleProvider, SharedAxis};
pub use error::LocomoteError;
pub use input::{DefaultAction, PointerEvent, TouchList};
pub use options::Options;
pub use rig::{FrameIntent, LocomotionRig};
pub use rotation::{CameraResolver, RotationOutcome, RotationSynchronizer};
pub use source::{DragSource, JoystickSource, TapSource, VelocitySource};
pub use surface::{EventSurface, ListenerRegistry};
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
