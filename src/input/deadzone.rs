//! Shared input thresholds.
//!
//! Analog values are compared against a fixed epsilon in raw device units.
//! Rotation uses twice the velocity epsilon, so turning needs a more
//! deliberate stick deflection than walking.

/// Raw-unit epsilon below which an analog axis counts as centered.
pub const AXIS_EPSILON: f32 = 10.0;

/// Minimum vertical travel (screen pixels) for a drag sample to count.
pub const DRAG_THRESHOLD_PX: f32 = 3.0;

/// `true` when `value` lies strictly outside `[-epsilon, epsilon]`.
#[must_use]
pub fn exceeds(value: f32, epsilon: f32) -> bool {
    value.abs() > epsilon
}

/// Velocity / rotation activation policy for an analog axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deadzone {
    epsilon: f32,
}

impl Deadzone {
    /// Deadzone with the given base epsilon.
    #[must_use]
    pub const fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }

    /// Base epsilon used for velocity activation.
    #[must_use]
    pub fn velocity_epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Epsilon used for rotation activation (double the base).
    #[must_use]
    pub fn rotation_epsilon(&self) -> f32 {
        self.epsilon * 2.0
    }

    /// Whether `value` is strong enough to drive movement.
    #[must_use]
    pub fn velocity_active(&self, value: f32) -> bool {
        exceeds(value, self.velocity_epsilon())
    }

    /// Whether `value` is strong enough to drive rotation.
    #[must_use]
    pub fn rotation_active(&self, value: f32) -> bool {
        exceeds(value, self.rotation_epsilon())
    }

    /// `value` if it clears the velocity epsilon, otherwise zero.
    #[must_use]
    pub fn filter(&self, value: f32) -> f32 {
        if self.velocity_active(value) {
            value
        } else {
            0.0
        }
    }
}

impl Default for Deadzone {
    fn default() -> Self {
        Self::new(AXIS_EPSILON)
    }
}

/// Classify a drag sample: vertical iff the vertical travel dominates and
/// clears [`DRAG_THRESHOLD_PX`].
#[must_use]
pub fn is_vertical_movement(dx: f32, dy: f32) -> bool {
    dy.abs() > dx.abs() && exceeds(dy, DRAG_THRESHOLD_PX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        assert!(!exceeds(10.0, 10.0));
        assert!(!exceeds(-10.0, 10.0));
        assert!(exceeds(10.01, 10.0));
        assert!(exceeds(-11.0, 10.0));
    }

    #[test]
    fn rotation_needs_double_epsilon() {
        let dz = Deadzone::default();
        assert_eq!(dz.rotation_epsilon(), 20.0);
        assert!(dz.velocity_active(15.0));
        assert!(!dz.rotation_active(15.0));
        assert!(!dz.rotation_active(20.0));
        assert!(dz.rotation_active(-30.0));
    }

    #[test]
    fn filter_zeroes_noise() {
        let dz = Deadzone::default();
        assert_eq!(dz.filter(5.0), 0.0);
        assert_eq!(dz.filter(-12.0), -12.0);
    }

    #[test]
    fn vertical_classification() {
        assert!(is_vertical_movement(0.0, 10.0));
        assert!(is_vertical_movement(1.0, -4.0));
        // Horizontal-dominant
        assert!(!is_vertical_movement(10.0, 2.0));
        // Dominant but under the pixel threshold
        assert!(!is_vertical_movement(0.0, 3.0));
        // Diagonal tie is not vertical
        assert!(!is_vertical_movement(8.0, 8.0));
    }
}
