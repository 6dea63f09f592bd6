//! Tap-and-hold to walk: one finger walks forward, two fingers walk back.

use glam::Vec3;

use super::{
    lifecycle::{LifecycleOp, LifecycleState, SourceLifecycle},
    VelocitySource,
};
use crate::{
    error::LocomoteError,
    input::{DefaultAction, EventKind, PointerEvent},
    options::TapOptions,
    surface::EventSurface,
};

const TAP_EVENTS: &[EventKind] = &[EventKind::TouchStart, EventKind::TouchEnd];

/// Touch-only hold-to-walk source.
#[derive(Debug, Clone)]
pub struct TapSource {
    options: TapOptions,
    lifecycle: SourceLifecycle,
    is_moving: bool,
    /// Finger count of the last touch-start was two. Left stale on release.
    is_reverse: bool,
}

impl TapSource {
    /// New, uninitialized source.
    #[must_use]
    pub fn new(options: TapOptions) -> Self {
        Self {
            options,
            lifecycle: SourceLifecycle::new(TAP_EVENTS),
            is_moving: false,
            is_reverse: false,
        }
    }

    /// Current settings.
    #[must_use]
    pub fn options(&self) -> &TapOptions {
        &self.options
    }

    /// Whether a finger is held down.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    /// Whether the last press used two fingers.
    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.is_reverse
    }

    /// Lifecycle state and listener binding.
    #[must_use]
    pub fn lifecycle(&self) -> &SourceLifecycle {
        &self.lifecycle
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// One-time setup: starts listening (deferred if the surface is not
    /// ready).
    ///
    /// # Errors
    ///
    /// [`LocomoteError::Lifecycle`] if the source was already set up.
    pub fn setup(
        &mut self,
        surface: &mut dyn EventSurface,
    ) -> Result<(), LocomoteError> {
        let _ = self.lifecycle.apply(LifecycleOp::Setup, surface)?;
        Ok(())
    }

    /// Resume listening after a deactivation.
    ///
    /// # Errors
    ///
    /// [`LocomoteError::Lifecycle`] before setup or after teardown.
    pub fn activate(
        &mut self,
        surface: &mut dyn EventSurface,
    ) -> Result<(), LocomoteError> {
        let _ = self.lifecycle.apply(LifecycleOp::Activate, surface)?;
        Ok(())
    }

    /// Stop listening and stop walking.
    ///
    /// # Errors
    ///
    /// [`LocomoteError::Lifecycle`] before setup or after teardown.
    pub fn deactivate(
        &mut self,
        surface: &mut dyn EventSurface,
    ) -> Result<(), LocomoteError> {
        let _ = self.lifecycle.apply(LifecycleOp::Deactivate, surface)?;
        self.is_moving = false;
        Ok(())
    }

    /// Final removal.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` matches the other hooks.
    pub fn teardown(
        &mut self,
        surface: &mut dyn EventSurface,
    ) -> Result<(), LocomoteError> {
        let _ = self.lifecycle.apply(LifecycleOp::Teardown, surface)?;
        self.is_moving = false;
        Ok(())
    }

    /// The surface this source deferred on is now ready.
    pub fn surface_ready(&mut self, surface: &mut dyn EventSurface) {
        self.lifecycle.surface_ready(surface);
    }

    /// Handle a raw pointer event. Only touch-start and touch-end are
    /// observed; both always suppress the default.
    pub fn handle_event(&mut self, event: &PointerEvent) -> DefaultAction {
        if !self.lifecycle.listens_to(event.kind()) {
            return DefaultAction::Allow;
        }
        match event {
            PointerEvent::TouchStart { touches } => {
                self.is_moving = true;
                self.is_reverse = touches.count == 2;
            }
            PointerEvent::TouchEnd { .. } => self.is_moving = false,
            _ => {}
        }
        DefaultAction::Prevent
    }
}

impl VelocitySource for TapSource {
    fn is_active(&self) -> bool {
        self.options.enabled && self.is_moving
    }

    fn velocity_delta(&self) -> Vec3 {
        let z = match (self.is_moving, self.is_reverse) {
            (false, _) => 0.0,
            (true, false) => -1.0,
            (true, true) if self.options.reverse_enabled => 1.0,
            // Reverse gesture with reversing disabled: stand still.
            (true, true) => 0.0,
        };
        Vec3::new(0.0, 0.0, z)
    }

    fn name(&self) -> &'static str {
        "tap"
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::{input::TouchList, surface::ListenerRegistry};

    fn fingers(n: usize) -> TouchList {
        let points: Vec<Vec2> =
            (0..n).map(|i| Vec2::new(i as f32 * 40.0, 300.0)).collect();
        TouchList::from_points(&points)
    }

    fn active_source(options: TapOptions) -> (TapSource, ListenerRegistry) {
        let mut registry = ListenerRegistry::ready();
        let mut source = TapSource::new(options);
        source.setup(&mut registry).unwrap();
        (source, registry)
    }

    #[test]
    fn one_finger_walks_forward() {
        let (mut source, _registry) = active_source(TapOptions::default());
        let action = source.handle_event(&PointerEvent::TouchStart {
            touches: fingers(1),
        });
        assert_eq!(action, DefaultAction::Prevent);
        assert!(source.is_active());
        assert_eq!(source.velocity_delta(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn two_fingers_walk_backward() {
        let (mut source, _registry) = active_source(TapOptions::default());
        let _ = source.handle_event(&PointerEvent::TouchStart {
            touches: fingers(2),
        });
        assert!(source.is_reverse());
        assert_eq!(source.velocity_delta(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn reverse_disabled_stands_still() {
        let options = TapOptions {
            reverse_enabled: false,
            ..TapOptions::default()
        };
        let (mut source, _registry) = active_source(options);
        let _ = source.handle_event(&PointerEvent::TouchStart {
            touches: fingers(2),
        });
        assert!(source.is_moving());
        assert!(source.is_reverse());
        assert_eq!(source.velocity_delta().z, 0.0);
    }

    #[test]
    fn three_fingers_are_not_reverse() {
        let (mut source, _registry) = active_source(TapOptions::default());
        let _ = source.handle_event(&PointerEvent::TouchStart {
            touches: fingers(3),
        });
        assert!(!source.is_reverse());
        assert_eq!(source.velocity_delta().z, -1.0);
    }

    #[test]
    fn release_stops_and_leaves_reverse_stale() {
        let (mut source, _registry) = active_source(TapOptions::default());
        let _ = source.handle_event(&PointerEvent::TouchStart {
            touches: fingers(2),
        });
        let _ = source.handle_event(&PointerEvent::TouchEnd {
            touches: fingers(0),
        });
        assert!(!source.is_active());
        assert!(source.is_reverse());
        assert_eq!(source.velocity_delta(), Vec3::ZERO);
    }

    #[test]
    fn ignores_moves_and_mouse() {
        let (mut source, _registry) = active_source(TapOptions::default());
        let moved = source.handle_event(&PointerEvent::TouchMove {
            touches: fingers(1),
        });
        let clicked = source.handle_event(&PointerEvent::MouseDown {
            position: Vec2::ZERO,
        });
        assert_eq!(moved, DefaultAction::Allow);
        assert_eq!(clicked, DefaultAction::Allow);
        assert!(!source.is_moving());
    }

    #[test]
    fn disabled_source_is_never_active() {
        let options = TapOptions {
            enabled: false,
            ..TapOptions::default()
        };
        let (mut source, _registry) = active_source(options);
        let _ = source.handle_event(&PointerEvent::TouchStart {
            touches: fingers(1),
        });
        assert!(source.is_moving());
        assert!(!source.is_active());
    }

    #[test]
    fn deactivation_zeroes_and_reactivation_does_not_duplicate() {
        let (mut source, mut registry) = active_source(TapOptions::default());
        let _ = source.handle_event(&PointerEvent::TouchStart {
            touches: fingers(1),
        });

        source.deactivate(&mut registry).unwrap();
        source.deactivate(&mut registry).unwrap();
        assert_eq!(source.velocity_delta(), Vec3::ZERO);
        assert!(!source.is_active());

        source.activate(&mut registry).unwrap();
        source.activate(&mut registry).unwrap();
        let id = source.lifecycle().binding().id().unwrap();
        assert_eq!(registry.registration_count(id, EventKind::TouchStart), 1);
        assert_eq!(registry.registration_count(id, EventKind::TouchEnd), 1);
        assert_eq!(registry.listener_total(id), 2);
    }
}
