//! Platform-agnostic pointer events.
//!
//! Touch and mouse input are both expressed here so that a single source can
//! consume either. Hosts translate their native events (browser
//! `TouchEvent`/`MouseEvent`, winit `Touch`/`MouseInput`) into these
//! variants and feed them to a [`LocomotionRig`](crate::rig::LocomotionRig)
//! or directly to a source's `handle_event`.
//!
//! # Example
//!
//! ```ignore
//! let action = rig.handle_event(&PointerEvent::MouseDown {
//!     position: Vec2::new(120.0, 300.0),
//! });
//! ```

use glam::Vec2;

/// Touch points active while a touch event fired.
///
/// Sources only ever track the first touch and the finger count, so the full
/// point list is not retained.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchList {
    /// Screen position of the first touch point, if any.
    pub primary: Option<Vec2>,
    /// Number of simultaneous touch points.
    pub count: usize,
}

impl TouchList {
    /// An empty list (no fingers on the surface).
    pub const EMPTY: Self = Self {
        primary: None,
        count: 0,
    };

    /// Build a list from every active touch point, first touch first.
    #[must_use]
    pub fn from_points(points: &[Vec2]) -> Self {
        Self {
            primary: points.first().copied(),
            count: points.len(),
        }
    }

    /// A single finger at `position`.
    #[must_use]
    pub fn single(position: Vec2) -> Self {
        Self {
            primary: Some(position),
            count: 1,
        }
    }

    /// Whether no finger is down.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// A raw pointer event from the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// One or more fingers touched the surface.
    TouchStart {
        /// Touches active after the change.
        touches: TouchList,
    },
    /// A finger moved.
    TouchMove {
        /// Touches active during the move.
        touches: TouchList,
    },
    /// A finger left the surface.
    TouchEnd {
        /// Touches still active after the change.
        touches: TouchList,
    },
    /// Mouse button pressed.
    MouseDown {
        /// Cursor position in screen pixels.
        position: Vec2,
    },
    /// Mouse cursor moved.
    MouseMove {
        /// Cursor position in screen pixels.
        position: Vec2,
    },
    /// Mouse button released.
    MouseUp {
        /// Cursor position in screen pixels.
        position: Vec2,
    },
}

impl PointerEvent {
    /// The listener kind this event is dispatched under.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::TouchStart { .. } => EventKind::TouchStart,
            Self::TouchMove { .. } => EventKind::TouchMove,
            Self::TouchEnd { .. } => EventKind::TouchEnd,
            Self::MouseDown { .. } => EventKind::MouseDown,
            Self::MouseMove { .. } => EventKind::MouseMove,
            Self::MouseUp { .. } => EventKind::MouseUp,
        }
    }

    /// Gesture phase, unifying touch and mouse.
    #[must_use]
    pub fn phase(&self) -> PointerPhase {
        match self {
            Self::TouchStart { .. } | Self::MouseDown { .. } => {
                PointerPhase::Down
            }
            Self::TouchMove { .. } | Self::MouseMove { .. } => {
                PointerPhase::Move
            }
            Self::TouchEnd { .. } | Self::MouseUp { .. } => PointerPhase::Up,
        }
    }

    /// The tracked pointer position: the first touch for touch events, the
    /// cursor for mouse events.
    #[must_use]
    pub fn position(&self) -> Option<Vec2> {
        match self {
            Self::TouchStart { touches }
            | Self::TouchMove { touches }
            | Self::TouchEnd { touches } => touches.primary,
            Self::MouseDown { position }
            | Self::MouseMove { position }
            | Self::MouseUp { position } => Some(*position),
        }
    }

    /// Number of simultaneous contacts. A mouse always counts as one.
    #[must_use]
    pub fn contact_count(&self) -> usize {
        match self {
            Self::TouchStart { touches }
            | Self::TouchMove { touches }
            | Self::TouchEnd { touches } => touches.count,
            Self::MouseDown { .. }
            | Self::MouseMove { .. }
            | Self::MouseUp { .. } => 1,
        }
    }
}

/// Pointer gesture phase shared by touch and mouse events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Press / touch start.
    Down,
    /// Movement while the surface is observed.
    Move,
    /// Release / touch end.
    Up,
}

/// Listener kinds a source can register on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `touchstart`.
    TouchStart,
    /// `touchmove`.
    TouchMove,
    /// `touchend`.
    TouchEnd,
    /// `mousedown`.
    MouseDown,
    /// `mousemove`.
    MouseMove,
    /// `mouseup`.
    MouseUp,
}

/// What the host should do with the platform's default handling (page
/// scroll, zoom, text selection) after a source saw the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    /// A listener handled the event; suppress the default.
    Prevent,
    /// No listener handled the event; let the default run.
    Allow,
}

impl DefaultAction {
    /// Combine results from several listeners: any `Prevent` wins.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        if self == Self::Prevent || other == Self::Prevent {
            Self::Prevent
        } else {
            Self::Allow
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::TouchPhase> for PointerPhase {
    fn from(phase: winit::event::TouchPhase) -> Self {
        match phase {
            winit::event::TouchPhase::Started => Self::Down,
            winit::event::TouchPhase::Moved => Self::Move,
            winit::event::TouchPhase::Ended
            | winit::event::TouchPhase::Cancelled => Self::Up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_position_is_first_touch() {
        let touches = TouchList::from_points(&[
            Vec2::new(1.0, 2.0),
            Vec2::new(30.0, 40.0),
        ]);
        let event = PointerEvent::TouchStart { touches };
        assert_eq!(event.position(), Some(Vec2::new(1.0, 2.0)));
        assert_eq!(event.contact_count(), 2);
        assert_eq!(event.phase(), PointerPhase::Down);
    }

    #[test]
    fn empty_touch_has_no_position() {
        let event = PointerEvent::TouchMove {
            touches: TouchList::EMPTY,
        };
        assert_eq!(event.position(), None);
        assert!(TouchList::EMPTY.is_empty());
    }

    #[test]
    fn mouse_counts_as_one_contact() {
        let event = PointerEvent::MouseUp {
            position: Vec2::new(5.0, 5.0),
        };
        assert_eq!(event.contact_count(), 1);
        assert_eq!(event.kind(), EventKind::MouseUp);
        assert_eq!(event.phase(), PointerPhase::Up);
    }

    #[test]
    fn prevent_wins_when_merging() {
        assert_eq!(
            DefaultAction::Allow.merge(DefaultAction::Prevent),
            DefaultAction::Prevent
        );
        assert_eq!(
            DefaultAction::Allow.merge(DefaultAction::Allow),
            DefaultAction::Allow
        );
    }
}
