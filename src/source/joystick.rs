//! Analog joystick: Y walks, X turns.
//!
//! The source owns no input state. Every query re-reads the injected
//! [`AxisSampleProvider`], so the host's polling loop can update the sample
//! at any time between ticks.

use glam::Vec3;

use super::VelocitySource;
use crate::{
    axis::{AxisSample, AxisSampleProvider},
    input::Deadzone,
    options::JoystickOptions,
};

/// Raw axis units per unit of velocity.
const VELOCITY_DIVISOR: f32 = 66.0;

/// Polling joystick source.
#[derive(Debug, Clone)]
pub struct JoystickSource<P> {
    options: JoystickOptions,
    provider: P,
    deadzone: Deadzone,
}

impl<P: AxisSampleProvider> JoystickSource<P> {
    /// Source reading from `provider` with the default deadzone.
    #[must_use]
    pub fn new(options: JoystickOptions, provider: P) -> Self {
        Self {
            options,
            provider,
            deadzone: Deadzone::default(),
        }
    }

    /// Replace the deadzone policy.
    #[must_use]
    pub fn with_deadzone(mut self, deadzone: Deadzone) -> Self {
        self.deadzone = deadzone;
        self
    }

    /// Current settings.
    #[must_use]
    pub fn options(&self) -> &JoystickOptions {
        &self.options
    }

    /// The injected provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Latest sample; centered when nothing has been published.
    #[must_use]
    pub fn sample(&self) -> AxisSample {
        self.provider.read().unwrap_or_default()
    }

    /// Whether the stick's Y deflection should move the player.
    #[must_use]
    pub fn is_velocity_active(&self) -> bool {
        self.options.enabled && self.deadzone.velocity_active(self.sample().y)
    }

    /// Whether the stick's X deflection should turn the camera.
    #[must_use]
    pub fn is_rotation_active(&self) -> bool {
        self.options.enabled && self.deadzone.rotation_active(self.sample().x)
    }

    /// X deflection to feed the rotation synchronizer, when rotation is
    /// active this tick.
    #[must_use]
    pub fn rotation_input(&self) -> Option<f32> {
        self.is_rotation_active().then(|| self.sample().x)
    }
}

impl<P: AxisSampleProvider> VelocitySource for JoystickSource<P> {
    fn is_active(&self) -> bool {
        self.is_velocity_active()
    }

    fn velocity_delta(&self) -> Vec3 {
        let y = self.deadzone.filter(self.sample().y);
        Vec3::new(0.0, 0.0, y / VELOCITY_DIVISOR)
    }

    fn name(&self) -> &'static str {
        "joystick"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::SharedAxis;

    fn source(sample: AxisSample) -> JoystickSource<AxisSample> {
        JoystickSource::new(JoystickOptions::default(), sample)
    }

    #[test]
    fn below_epsilon_is_inactive() {
        let js = source(AxisSample::new(0.0, 5.0));
        assert!(!js.is_velocity_active());
        assert!(!js.is_active());
        assert_eq!(js.velocity_delta(), Vec3::ZERO);
    }

    #[test]
    fn above_epsilon_scales_y() {
        let js = source(AxisSample::new(0.0, 15.0));
        assert!(js.is_velocity_active());
        assert!((js.velocity_delta().z - 15.0 / 66.0).abs() < 1e-6);

        let back = source(AxisSample::new(0.0, -33.0));
        assert!((back.velocity_delta().z + 0.5).abs() < 1e-6);
    }

    #[test]
    fn rotation_needs_double_epsilon() {
        assert!(!source(AxisSample::new(15.0, 0.0)).is_rotation_active());
        assert!(!source(AxisSample::new(-20.0, 0.0)).is_rotation_active());
        let js = source(AxisSample::new(30.0, 0.0));
        assert!(js.is_rotation_active());
        assert_eq!(js.rotation_input(), Some(30.0));
        assert_eq!(source(AxisSample::ZERO).rotation_input(), None);
    }

    #[test]
    fn disabled_gates_both_axes() {
        let options = JoystickOptions {
            enabled: false,
            ..JoystickOptions::default()
        };
        let js = JoystickSource::new(options, AxisSample::new(50.0, 50.0));
        assert!(!js.is_active());
        assert!(!js.is_rotation_active());
        assert_eq!(js.rotation_input(), None);
    }

    #[test]
    fn missing_sample_reads_as_centered() {
        let js = JoystickSource::new(JoystickOptions::default(), None::<AxisSample>);
        assert_eq!(js.sample(), AxisSample::ZERO);
        assert!(!js.is_active());
        assert_eq!(js.velocity_delta(), Vec3::ZERO);
    }

    #[test]
    fn every_query_rereads_the_provider() {
        let axis = SharedAxis::new();
        let js = JoystickSource::new(JoystickOptions::default(), axis.clone());
        assert!(!js.is_active());

        axis.publish(AxisSample::new(0.0, 40.0));
        assert!(js.is_active());

        axis.publish(AxisSample::new(0.0, 2.0));
        assert!(!js.is_active());
    }

    #[test]
    fn custom_deadzone() {
        let js = source(AxisSample::new(0.0, 5.0))
            .with_deadzone(Deadzone::new(1.0));
        assert!(js.is_active());
    }
}
