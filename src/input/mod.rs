//! Input handling: raw pointer event types and the shared thresholds the
//! sources classify them with.

/// Deadzone and drag-classification thresholds.
pub mod deadzone;
/// Platform-agnostic pointer events.
pub mod event;

pub use deadzone::{Deadzone, AXIS_EPSILON, DRAG_THRESHOLD_PX};
pub use event::{DefaultAction, EventKind, PointerEvent, PointerPhase, TouchList};
