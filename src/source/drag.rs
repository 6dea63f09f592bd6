//! Drag-to-walk: press anywhere on the surface and drag vertically.
//!
//! Touch and mouse share one state machine. A touch event contributes its
//! first touch point, a mouse event its cursor position. Only samples whose
//! vertical travel dominates (and exceeds a few pixels) update the gesture,
//! so sideways jitter never flips the walking direction.

use glam::{Vec2, Vec3};

use super::{
    lifecycle::{LifecycleOp, LifecycleState, SourceLifecycle},
    VelocitySource,
};
use crate::{
    error::LocomoteError,
    input::{
        deadzone::is_vertical_movement, DefaultAction, EventKind,
        PointerEvent, PointerPhase,
    },
    options::DragOptions,
    surface::EventSurface,
};

const DRAG_EVENTS: &[EventKind] = &[
    EventKind::TouchStart,
    EventKind::TouchMove,
    EventKind::TouchEnd,
    EventKind::MouseDown,
    EventKind::MouseMove,
    EventKind::MouseUp,
];

/// Converts the discrete drag direction into a per-tick velocity.
const VELOCITY_SCALE: f32 = 3.0;

/// Screen-space direction of the current drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Dragging towards the top of the screen (walk forward, -Z).
    Up,
    /// No drag, or no qualifying movement yet.
    #[default]
    Idle,
    /// Dragging towards the bottom of the screen (walk backward, +Z).
    Down,
}

impl Direction {
    /// -1, 0 or +1, matching the sign of the screen-space Y delta.
    #[must_use]
    pub fn signum(self) -> f32 {
        match self {
            Self::Up => -1.0,
            Self::Idle => 0.0,
            Self::Down => 1.0,
        }
    }
}

/// Unified touch/mouse drag source.
#[derive(Debug, Clone)]
pub struct DragSource {
    options: DragOptions,
    lifecycle: SourceLifecycle,
    in_progress: bool,
    /// Last recorded pointer position; `None` when no drag is in progress.
    pointer: Option<Vec2>,
    direction: Direction,
}

impl DragSource {
    /// New, uninitialized source.
    #[must_use]
    pub fn new(options: DragOptions) -> Self {
        Self {
            options,
            lifecycle: SourceLifecycle::new(DRAG_EVENTS),
            in_progress: false,
            pointer: None,
            direction: Direction::Idle,
        }
    }

    /// Current settings.
    #[must_use]
    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    /// Current drag direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Last recorded pointer position of an in-progress drag.
    #[must_use]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Whether a press is being tracked.
    #[must_use]
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Lifecycle state and listener binding.
    #[must_use]
    pub fn lifecycle(&self) -> &SourceLifecycle {
        &self.lifecycle
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

    /// Stop listening and drop any in-progress gesture.
    ///
    /// # Errors
    ///
    /// [`LocomoteError::Lifecycle`] before setup or after teardown.
    pub fn deactivate(
        &mut self,
        surface: &mut dyn EventSurface,
    ) -> Result<(), LocomoteError> {
        let _ = self.lifecycle.apply(LifecycleOp::Deactivate, surface)?;
        self.reset();
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
        self.reset();
        Ok(())
    }

    /// The surface this source deferred on is now ready.
    pub fn surface_ready(&mut self, surface: &mut dyn EventSurface) {
        self.lifecycle.surface_ready(surface);
    }

    /// Handle a raw pointer event.
    ///
    /// Every event this source listens to has its default suppressed, even
    /// when the event is malformed and ignored.
    pub fn handle_event(&mut self, event: &PointerEvent) -> DefaultAction {
        if !self.lifecycle.listens_to(event.kind()) {
            return DefaultAction::Allow;
        }
        match event.phase() {
            PointerPhase::Down => self.on_down(event),
            PointerPhase::Move => self.on_move(event),
            PointerPhase::Up => self.reset(),
        }
        DefaultAction::Prevent
    }

    fn on_down(&mut self, event: &PointerEvent) {
        let Some(position) = event.position() else {
            return;
        };
        self.in_progress = true;
        self.pointer = Some(position);

        // Two fingers down walks backwards without needing to drag.
        if event.contact_count() == 2 && self.options.reverse_enabled {
            self.set_direction(Direction::Down);
        }
    }

    fn on_move(&mut self, event: &PointerEvent) {
        if !self.in_progress {
            return;
        }
        let (Some(position), Some(last)) = (event.position(), self.pointer)
        else {
            return;
        };

        let delta = position - last;
        if !is_vertical_movement(delta.x, delta.y) {
            return;
        }

        let direction = if delta.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        self.set_direction(direction);
        self.pointer = Some(position);
    }

    fn set_direction(&mut self, direction: Direction) {
        if self.direction != direction {
            log::trace!("drag direction {:?} -> {direction:?}", self.direction);
        }
        self.direction = direction;
    }

    fn reset(&mut self) {
        self.pointer = None;
        self.in_progress = false;
        self.direction = Direction::Idle;
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }
}

impl VelocitySource for DragSource {
    fn is_active(&self) -> bool {
        self.options.enabled && self.direction != Direction::Idle
    }

    fn velocity_delta(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.direction.signum() / VELOCITY_SCALE)
    }

    fn name(&self) -> &'static str {
        "drag"
    }
}
