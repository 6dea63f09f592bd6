//! The rendering surface sources attach their raw listeners to.
//!
//! A surface may not exist yet when a source activates (the host is still
//! creating its canvas). In that case the source asks to be notified once
//! and attaches when the host reports the surface ready.
//!
//! [`ListenerRegistry`] is the in-crate surface: it records registrations
//! per `(listener, kind)` and tells the host which listeners an event should
//! be routed to. Hosts with their own event system implement
//! [`EventSurface`] instead.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::input::EventKind;

/// Opaque handle identifying one source's listeners on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u32);

impl ListenerId {
    /// Raw numeric value, for logging.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

/// A surface that accepts raw event listeners.
pub trait EventSurface {
    /// Whether the surface exists and listeners can be attached.
    fn is_ready(&self) -> bool;

    /// Reserve a fresh listener handle.
    fn allocate_listener(&mut self) -> ListenerId;

    /// Register `listener` for `kind`.
    fn add_listener(&mut self, listener: ListenerId, kind: EventKind);

    /// Unregister `listener` for `kind`. Unknown registrations are ignored.
    fn remove_listener(&mut self, listener: ListenerId, kind: EventKind);

    /// Ask to be notified once when the surface becomes ready.
    fn notify_when_ready(&mut self, listener: ListenerId);
}

/// Counting listener registry with deferred readiness.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    ready: bool,
    next_id: u32,
    registrations: FxHashMap<(ListenerId, EventKind), u32>,
    awaiting_ready: FxHashSet<ListenerId>,
}

impl ListenerRegistry {
    /// A registry whose surface already exists.
    #[must_use]
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    /// A registry whose surface has not been created yet.
    #[must_use]
    pub fn pending() -> Self {
        Self::default()
    }

    /// Mark the surface ready and drain the listeners waiting for it.
    ///
    /// Each waiting listener is returned once, in id order; the host must
    /// forward the notification to the owning source.
    pub fn mark_ready(&mut self) -> Vec<ListenerId> {
        self.ready = true;
        let mut waiting: Vec<_> = self.awaiting_ready.drain().collect();
        waiting.sort_unstable();
        waiting
    }

    /// How many times `listener` is registered for `kind`.
    #[must_use]
    pub fn registration_count(
        &self,
        listener: ListenerId,
        kind: EventKind,
    ) -> u32 {
        self.registrations
            .get(&(listener, kind))
            .copied()
            .unwrap_or(0)
    }

    /// Total registrations held for `listener` across all kinds.
    #[must_use]
    pub fn listener_total(&self, listener: ListenerId) -> u32 {
        self.registrations
            .iter()
            .filter(|((id, _), _)| *id == listener)
            .map(|(_, count)| *count)
            .sum()
    }

    /// Whether `listener` is waiting for the ready notification.
    #[must_use]
    pub fn is_awaiting_ready(&self, listener: ListenerId) -> bool {
        self.awaiting_ready.contains(&listener)
    }

    /// Whether an event of `kind` should be routed to `listener`.
    #[must_use]
    pub fn routes(&self, listener: ListenerId, kind: EventKind) -> bool {
        self.registration_count(listener, kind) > 0
    }
}

impl EventSurface for ListenerRegistry {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn allocate_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn add_listener(&mut self, listener: ListenerId, kind: EventKind) {
        *self.registrations.entry((listener, kind)).or_insert(0) += 1;
    }

    fn remove_listener(&mut self, listener: ListenerId, kind: EventKind) {
        let key = (listener, kind);
        if let Some(count) = self.registrations.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                let _ = self.registrations.remove(&key);
            }
        }
    }

    fn notify_when_ready(&mut self, listener: ListenerId) {
        let _ = self.awaiting_ready.insert(listener);
    }
}

/// Attachment state of a source's listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingState {
    /// No listeners registered.
    #[default]
    Detached,
    /// Activation requested before the surface existed.
    AwaitingSurface,
    /// Every listener kind is registered exactly once.
    Attached,
}

/// Guards a source's listener registrations so each kind is added at most
/// once per activation and fully removed on deactivation.
#[derive(Debug, Clone)]
pub struct ListenerBinding {
    id: Option<ListenerId>,
    kinds: &'static [EventKind],
    state: BindingState,
}

impl ListenerBinding {
    /// Binding for the given listener kinds. The handle is allocated on the
    /// first attach.
    #[must_use]
    pub fn new(kinds: &'static [EventKind]) -> Self {
        Self {
            id: None,
            kinds,
            state: BindingState::Detached,
        }
    }

    /// Handle on the surface, once allocated.
    #[must_use]
    pub fn id(&self) -> Option<ListenerId> {
        self.id
    }

    /// Current attachment state.
    #[must_use]
    pub fn state(&self) -> BindingState {
        self.state
    }

    /// Whether events of `kind` should be handled right now.
    #[must_use]
    pub fn listens_to(&self, kind: EventKind) -> bool {
        self.state == BindingState::Attached && self.kinds.contains(&kind)
    }

    /// Attach every listener, or defer until the surface is ready.
    pub fn attach(&mut self, surface: &mut dyn EventSurface) {
        let id = *self.id.get_or_insert_with(|| surface.allocate_listener());
        match self.state {
            BindingState::Attached => {}
            BindingState::AwaitingSurface if !surface.is_ready() => {}
            BindingState::Detached | BindingState::AwaitingSurface => {
                if surface.is_ready() {
                    for &kind in self.kinds {
                        surface.add_listener(id, kind);
                    }
                    self.state = BindingState::Attached;
                } else {
                    log::debug!(
                        "surface not ready, deferring listener {}",
                        id.get()
                    );
                    surface.notify_when_ready(id);
                    self.state = BindingState::AwaitingSurface;
                }
            }
        }
    }

    /// Retry a deferred attach after the ready notification. A binding that
    /// was detached in the meantime stays detached.
    pub fn surface_ready(&mut self, surface: &mut dyn EventSurface) {
        if self.state == BindingState::AwaitingSurface {
            self.attach(surface);
        }
    }

    /// Remove every listener this binding added.
    pub fn detach(&mut self, surface: &mut dyn EventSurface) {
        if let (BindingState::Attached, Some(id)) = (self.state, self.id) {
            for &kind in self.kinds {
                surface.remove_listener(id, kind);
            }
        }
        self.state = BindingState::Detached;
    }
}
