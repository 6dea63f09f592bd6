//! Host lifecycle state machine shared by the event-driven sources.
//!
//! Legal transitions:
//!
//! ```text
//! Uninitialized --setup--> Active
//! Active --deactivate--> Inactive --activate--> Active
//! any --teardown--> Disposed
//! ```
//!
//! Activating an active source or deactivating an inactive one is a no-op,
//! so hosts may call the hooks redundantly. Everything else is rejected.

use std::fmt;

use crate::{
    error::LocomoteError,
    input::EventKind,
    surface::{EventSurface, ListenerBinding},
};

/// Where a source is in its host lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Constructed, `setup` not yet called.
    #[default]
    Uninitialized,
    /// Listening for input.
    Active,
    /// Paused; listeners removed, velocity zeroed.
    Inactive,
    /// Torn down; no further transitions.
    Disposed,
}

/// Lifecycle hooks a host can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOp {
    /// One-time initialization.
    Setup,
    /// Resume listening.
    Activate,
    /// Stop listening.
    Deactivate,
    /// Final removal.
    Teardown,
}

/// Outcome of an accepted lifecycle hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The state changed; the source must perform the hook's side effects.
    Changed(LifecycleState),
    /// Already in the target state; nothing to do.
    Unchanged,
}

impl LifecycleState {
    /// Validate `op` against the current state.
    ///
    /// # Errors
    ///
    /// [`LocomoteError::Lifecycle`] when `op` is not legal from this state.
    pub fn apply(self, op: LifecycleOp) -> Result<Transition, LocomoteError> {
        use LifecycleState::{Active, Disposed, Inactive, Uninitialized};

        let next = match (self, op) {
            (Uninitialized, LifecycleOp::Setup) => Active,
            (Active, LifecycleOp::Activate)
            | (Inactive, LifecycleOp::Deactivate)
            | (Disposed, LifecycleOp::Teardown) => {
                return Ok(Transition::Unchanged)
            }
            (Inactive, LifecycleOp::Activate) => Active,
            (Active, LifecycleOp::Deactivate) => Inactive,
            (_, LifecycleOp::Teardown) => Disposed,
            (from, operation) => {
                return Err(LocomoteError::Lifecycle { from, operation })
            }
        };
        Ok(Transition::Changed(next))
    }

    /// Whether the source should currently be listening for input.
    #[must_use]
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Disposed => "disposed",
        };
        f.write_str(name)
    }
}

impl fmt::Display for LifecycleOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Setup => "set up",
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::Teardown => "tear down",
        };
        f.write_str(name)
    }
}

/// Lifecycle state plus the listener binding it drives.
///
/// Event-driven sources embed one of these and layer their own state resets
/// on top of the hooks.
#[derive(Debug, Clone)]
pub struct SourceLifecycle {
    state: LifecycleState,
    binding: ListenerBinding,
}

impl SourceLifecycle {
    /// Uninitialized lifecycle for a source listening to `kinds`.
    #[must_use]
    pub fn new(kinds: &'static [EventKind]) -> Self {
        Self {
            state: LifecycleState::Uninitialized,
            binding: ListenerBinding::new(kinds),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The listener binding.
    #[must_use]
    pub fn binding(&self) -> &ListenerBinding {
        &self.binding
    }

    /// Whether events of `kind` should be handled right now.
    #[must_use]
    pub fn listens_to(&self, kind: EventKind) -> bool {
        self.state.is_active() && self.binding.listens_to(kind)
    }

    /// Apply `op`, attaching or detaching listeners when the state changes.
    ///
    /// # Errors
    ///
    /// [`LocomoteError::Lifecycle`] when `op` is not legal from this state.
    pub fn apply(
        &mut self,
        op: LifecycleOp,
        surface: &mut dyn EventSurface,
    ) -> Result<Transition, LocomoteError> {
        let transition = self.state.apply(op)?;
        if let Transition::Changed(next) = transition {
            if next.is_active() {
                self.binding.attach(surface);
            } else {
                self.binding.detach(surface);
            }
            self.state = next;
        }
        Ok(transition)
    }

    /// Forward the surface-ready notification. Ignored unless active.
    pub fn surface_ready(&mut self, surface: &mut dyn EventSurface) {
        if self.state.is_active() {
            self.binding.surface_ready(surface);
        }
    }
}
