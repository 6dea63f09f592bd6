//! Locomotion input sources.
//!
//! Each source turns one kind of raw input into a per-tick velocity delta.
//! Sources are peers: they never talk to each other, and the host polls
//! every active one once per frame and sums the deltas.
//!
//! Sign convention: -Z is forward for every source in this module. A one
//! finger tap-hold and an upward drag both produce negative Z; a two-finger
//! hold, a downward drag and a pulled-back stick produce positive Z.

/// Touch/mouse drag-to-walk source.
pub mod drag;
/// Analog joystick polling source.
pub mod joystick;
/// Host lifecycle state machine.
pub mod lifecycle;
/// Touch tap-and-hold source.
pub mod tap;

use glam::Vec3;

pub use drag::{DragSource, Direction};
pub use joystick::JoystickSource;
pub use lifecycle::{LifecycleOp, LifecycleState};
pub use tap::TapSource;

/// Contract between a source and the movement aggregator.
pub trait VelocitySource {
    /// Whether the source currently wants to contribute motion. Always
    /// `false` when the source is disabled.
    fn is_active(&self) -> bool;

    /// Velocity to add this tick.
    ///
    /// Returned by value: the caller owns the result and may mutate it
    /// freely without affecting the source.
    fn velocity_delta(&self) -> Vec3;

    /// Name for debugging/logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}

/// Sum the deltas of every active source.
#[must_use]
pub fn sum_active(sources: &[&dyn VelocitySource]) -> Vec3 {
    sources
        .iter()
        .filter(|source| source.is_active())
        .fold(Vec3::ZERO, |sum, source| sum + source.velocity_delta())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        active: bool,
        delta: Vec3,
    }

    impl VelocitySource for Fixed {
        fn is_active(&self) -> bool {
            self.active
        }

        fn velocity_delta(&self) -> Vec3 {
            self.delta
        }
    }

    #[test]
    fn inactive_sources_are_skipped() {
        let a = Fixed {
            active: true,
            delta: Vec3::new(0.0, 0.0, -1.0),
        };
        let b = Fixed {
            active: false,
            delta: Vec3::new(0.0, 0.0, 5.0),
        };
        let c = Fixed {
            active: true,
            delta: Vec3::new(0.0, 0.0, 0.25),
        };
        assert_eq!(sum_active(&[&a, &b, &c]), Vec3::new(0.0, 0.0, -0.75));
        assert_eq!(a.name(), "unnamed");
    }

    #[test]
    fn mutating_result_does_not_touch_source() {
        let a = Fixed {
            active: true,
            delta: Vec3::Z,
        };
        let mut delta = a.velocity_delta();
        delta.z = 42.0;
        assert_eq!(delta.z, 42.0);
        assert_eq!(a.velocity_delta(), Vec3::Z);
    }
}
