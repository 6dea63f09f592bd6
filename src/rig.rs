//! Reference host wiring every source to one surface and camera.
//!
//! The rig plays the part of the host scene: it forwards lifecycle hooks,
//! routes raw events to the sources listening for them, and once per frame
//! runs the rotation synchronizer and sums the active velocity deltas. It
//! does not integrate velocity into a position; that stays with the host's
//! movement controller.
//!
//! ```ignore
//! let mut rig = LocomotionRig::new(&options, Box::new(axis), Vec3::ZERO,
//!     ListenerRegistry::pending());
//! rig.setup()?;
//! rig.surface_ready();
//! let action = rig.handle_event(&event);
//! let intent = rig.tick(time_ms, dt_ms, &mut cameras);
//! player.velocity += intent.velocity;
//! ```

use glam::Vec3;

use crate::{
    axis::{AxisRegistry, AxisSampleProvider},
    error::LocomoteError,
    input::{DefaultAction, PointerEvent},
    options::Options,
    rotation::{CameraResolver, RotationOutcome, RotationSynchronizer},
    source::{
        lifecycle::{LifecycleOp, LifecycleState, Transition},
        sum_active, DragSource, JoystickSource, TapSource, VelocitySource,
    },
    surface::ListenerRegistry,
};

/// Boxed axis provider used by the rig's joystick.
pub type BoxedAxis = Box<dyn AxisSampleProvider>;

/// Everything the sources want the host to do this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameIntent {
    /// Sum of the active sources' velocity deltas.
    pub velocity: Vec3,
    /// What the rotation synchronizer did.
    pub rotation: RotationOutcome,
}

impl FrameIntent {
    /// No motion, no rotation.
    pub const IDLE: Self = Self {
        velocity: Vec3::ZERO,
        rotation: RotationOutcome::Idle,
    };
}

/// Host-side owner of the three sources and the rotation synchronizer.
pub struct LocomotionRig {
    state: LifecycleState,
    surface: ListenerRegistry,
    drag: DragSource,
    tap: TapSource,
    joystick: JoystickSource<BoxedAxis>,
    rotation: RotationSynchronizer,
    last_tick_ms: Option<f64>,
}

impl LocomotionRig {
    /// Rig reading the joystick from `axis`, starting at `entity_rotation`
    /// (degrees).
    #[must_use]
    pub fn new(
        options: &Options,
        axis: BoxedAxis,
        entity_rotation: Vec3,
        surface: ListenerRegistry,
    ) -> Self {
        Self {
            state: LifecycleState::Uninitialized,
            surface,
            drag: DragSource::new(options.drag.clone()),
            tap: TapSource::new(options.tap.clone()),
            joystick: JoystickSource::new(options.joystick.clone(), axis),
            rotation: RotationSynchronizer::new(
                &options.joystick,
                entity_rotation,
            ),
            last_tick_ms: None,
        }
    }

    /// Rig whose joystick reads the axis published under the configured
    /// `axis_name`.
    #[must_use]
    pub fn with_axis_registry(
        options: &Options,
        axes: &mut AxisRegistry,
        entity_rotation: Vec3,
        surface: ListenerRegistry,
    ) -> Self {
        let axis = axes.slot(&options.joystick.axis_name);
        Self::new(options, Box::new(axis), entity_rotation, surface)
    }

    /// Rig lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The drag source.
    #[must_use]
    pub fn drag(&self) -> &DragSource {
        &self.drag
    }

    /// The tap source.
    #[must_use]
    pub fn tap(&self) -> &TapSource {
        &self.tap
    }

    /// The joystick source.
    #[must_use]
    pub fn joystick(&self) -> &JoystickSource<BoxedAxis> {
        &self.joystick
    }

    /// The rotation synchronizer.
    #[must_use]
    pub fn rotation(&self) -> &RotationSynchronizer {
        &self.rotation
    }

    /// Host timestamp of the latest tick, in milliseconds.
    #[must_use]
    pub fn last_tick_ms(&self) -> Option<f64> {
        self.last_tick_ms
    }

    /// The listener registry.
    #[must_use]
    pub fn surface(&self) -> &ListenerRegistry {
        &self.surface
    }

    /// Set up every source.
    ///
    /// # Errors
    ///
    /// [`LocomoteError::Lifecycle`] if the rig was already set up.
    pub fn setup(&mut self) -> Result<(), LocomoteError> {
        self.transition(LifecycleOp::Setup)?;
        self.drag.setup(&mut self.surface)?;
        self.tap.setup(&mut self.surface)?;
        log::debug!("locomotion rig set up");
        Ok(())
    }

    /// Resume every source.
    ///
    /// # Errors
    ///
    /// [`LocomoteError::Lifecycle`] before setup or after teardown.
    pub fn activate(&mut self) -> Result<(), LocomoteError> {
        self.transition(LifecycleOp::Activate)?;
        self.drag.activate(&mut self.surface)?;
        self.tap.activate(&mut self.surface)?;
        Ok(())
    }

    /// Pause every source; the next tick yields no motion.
    ///
    /// # Errors
    ///
    /// [`LocomoteError::Lifecycle`] before setup or after teardown.
    pub fn deactivate(&mut self) -> Result<(), LocomoteError> {
        self.transition(LifecycleOp::Deactivate)?;
        self.drag.deactivate(&mut self.surface)?;
        self.tap.deactivate(&mut self.surface)?;
        Ok(())
    }

    /// Remove every source.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` matches the other hooks.
    pub fn teardown(&mut self) -> Result<(), LocomoteError> {
        self.transition(LifecycleOp::Teardown)?;
        self.drag.teardown(&mut self.surface)?;
        self.tap.teardown(&mut self.surface)?;
        log::debug!("locomotion rig torn down");
        Ok(())
    }

    fn transition(&mut self, op: LifecycleOp) -> Result<(), LocomoteError> {
        if let Transition::Changed(next) = self.state.apply(op)? {
            self.state = next;
        }
        Ok(())
    }

    /// The rendering surface now exists: attach every deferred listener.
    pub fn surface_ready(&mut self) {
        for id in self.surface.mark_ready() {
            if self.drag.lifecycle().binding().id() == Some(id) {
                self.drag.surface_ready(&mut self.surface);
            } else if self.tap.lifecycle().binding().id() == Some(id) {
                self.tap.surface_ready(&mut self.surface);
            }
        }
    }

    /// Route a raw event to every source listening for its kind.
    pub fn handle_event(&mut self, event: &PointerEvent) -> DefaultAction {
        let kind = event.kind();
        let mut action = DefaultAction::Allow;
        if let Some(id) = self.drag.lifecycle().binding().id() {
            if self.surface.routes(id, kind) {
                action = action.merge(self.drag.handle_event(event));
            }
        }
        if let Some(id) = self.tap.lifecycle().binding().id() {
            if self.surface.routes(id, kind) {
                action = action.merge(self.tap.handle_event(event));
            }
        }
        action
    }

    /// Advance one frame of `dt_ms` milliseconds ending at host time
    /// `time_ms`.
    ///
    /// Only `dt_ms` drives motion; the timestamp is recorded, paused or not.
    /// Rotation runs first so the camera faces its new heading before the
    /// host applies the summed velocity.
    pub fn tick(
        &mut self,
        time_ms: f64,
        dt_ms: f32,
        cameras: &mut dyn CameraResolver,
    ) -> FrameIntent {
        self.last_tick_ms = Some(time_ms);
        if !self.state.is_active() {
            return FrameIntent::IDLE;
        }
        let rotation =
            self.rotation
                .tick(dt_ms, self.joystick.rotation_input(), cameras);
        let sources: [&dyn VelocitySource; 3] =
            [&self.drag, &self.tap, &self.joystick];
        FrameIntent {
            velocity: sum_active(&sources),
            rotation,
        }
    }
}
