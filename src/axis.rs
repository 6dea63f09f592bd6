//! Externally produced analog axis samples.
//!
//! A hardware polling loop (gamepad, on-screen joystick widget) writes the
//! latest `{x, y}` deflection; the joystick source reads it every tick and
//! never owns it. Instead of looking the sample up by name in global state,
//! the source is handed an [`AxisSampleProvider`] at construction.

use std::{cell::Cell, rc::Rc};

use rustc_hash::FxHashMap;

/// Raw 2D analog input in arbitrary device units. No range is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisSample {
    /// Horizontal deflection; drives yaw.
    pub x: f32,
    /// Vertical deflection; drives forward/back velocity.
    pub y: f32,
}

impl AxisSample {
    /// Centered stick.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Sample with the given deflection.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Source of the current axis sample.
///
/// `None` means no sample has been published; readers treat it as centered.
pub trait AxisSampleProvider {
    /// Latest sample, if any.
    fn read(&self) -> Option<AxisSample>;
}

impl AxisSampleProvider for AxisSample {
    fn read(&self) -> Option<AxisSample> {
        Some(*self)
    }
}

impl AxisSampleProvider for Option<AxisSample> {
    fn read(&self) -> Option<AxisSample> {
        *self
    }
}

impl<P: AxisSampleProvider + ?Sized> AxisSampleProvider for Box<P> {
    fn read(&self) -> Option<AxisSample> {
        (**self).read()
    }
}

/// Shared single-threaded handle to a published sample.
///
/// Clones observe the same slot: the polling loop keeps one clone and
/// writes, the joystick source keeps another and reads.
#[derive(Debug, Clone, Default)]
pub struct SharedAxis {
    slot: Rc<Cell<Option<AxisSample>>>,
}

impl SharedAxis {
    /// An empty slot (nothing published yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a new sample, replacing the previous one.
    pub fn publish(&self, sample: AxisSample) {
        self.slot.set(Some(sample));
    }

    /// Withdraw the sample (e.g. the gamepad disconnected).
    pub fn clear(&self) {
        self.slot.set(None);
    }
}

impl AxisSampleProvider for SharedAxis {
    fn read(&self) -> Option<AxisSample> {
        self.slot.get()
    }
}

/// Name-keyed set of published axes.
///
/// Hosts that publish several sticks register each under a name; a source
/// configured with [`JoystickOptions::axis_name`] resolves its slot here
/// once, at construction.
///
/// [`JoystickOptions::axis_name`]: crate::options::JoystickOptions::axis_name
#[derive(Debug, Default)]
pub struct AxisRegistry {
    axes: FxHashMap<String, SharedAxis>,
}

impl AxisRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot registered under `name`, creating an empty one if needed.
    pub fn slot(&mut self, name: &str) -> SharedAxis {
        self.axes.entry(name.to_owned()).or_default().clone()
    }

    /// Slot registered under `name`, if one exists.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<SharedAxis> {
        self.axes.get(name).cloned()
    }

    /// Publish `sample` under `name`.
    pub fn publish(&mut self, name: &str, sample: AxisSample) {
        self.slot(name).publish(sample);
    }
}
