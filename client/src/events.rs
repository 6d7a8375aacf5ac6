//! Event dispatch between the document and the page components.
//!
//! DESIGN
//! ======
//! The document (browser binding or the in-memory test document) turns raw
//! DOM activity into `UiEvent`s. Components register interest per
//! `EventKind` in a `Subscriptions` table when they attach and drop every
//! listener when they detach, so a torn-down component never sees another
//! event. Handlers answer with `Propagation`, which the binding maps onto
//! `preventDefault`.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use crate::state::forms::{FieldRef, FormPanel};

/// Opaque interval handle issued by a `dom::Scheduler`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub i32);

/// What a click landed on, as far as the components care.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// An element carrying a `for` attribute.
    Label { for_attr: String },
    /// An element identified by id (banner controls).
    Element { id: String },
    /// A password visibility toggle injected next to `field`.
    Toggle(FieldRef),
    Other,
}

/// Keyboard state at keydown time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyChord {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub key: String,
}

impl KeyChord {
    #[must_use]
    pub fn ctrl_shift(key: &str) -> Self {
        Self { ctrl: true, shift: true, alt: false, key: key.to_owned() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// A form input changed value.
    Input(FieldRef),
    /// A panel's form is being submitted.
    Submit(FormPanel),
    Click(ClickTarget),
    KeyDown(KeyChord),
    TimerFired(TimerId),
    /// A page freshness probe finished: `Ok(last_modified)` or a failure
    /// description.
    UpdateChecked(Result<Option<String>, String>),
}

impl UiEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Input(_) => EventKind::Input,
            Self::Submit(_) => EventKind::Submit,
            Self::Click(_) => EventKind::Click,
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::TimerFired(_) => EventKind::Timer,
            Self::UpdateChecked(_) => EventKind::UpdateChecked,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Input,
    Submit,
    Click,
    KeyDown,
    Timer,
    UpdateChecked,
}

/// Whether the default browser action should still happen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Propagation {
    #[default]
    Continue,
    PreventDefault,
}

impl Propagation {
    #[must_use]
    pub fn prevented(self) -> bool {
        self == Self::PreventDefault
    }

    /// Combine two handler answers; any prevention wins.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        if self.prevented() || other.prevented() { Self::PreventDefault } else { Self::Continue }
    }
}

// =============================================================================
// SUBSCRIPTIONS
// =============================================================================

/// Page components that can own listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentId {
    AuthForms,
    Banner,
    CacheBuster,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Clone, Copy, Debug)]
struct Listener {
    id: ListenerId,
    component: ComponentId,
    kind: EventKind,
}

/// Listener table. Dispatch order is registration order.
#[derive(Debug, Default)]
pub struct Subscriptions {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl Subscriptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` for `kind`. Subscribing the same pair twice
    /// returns the existing listener instead of adding a second one.
    pub fn subscribe(&mut self, component: ComponentId, kind: EventKind) -> ListenerId {
        if let Some(existing) = self.listeners.iter().find(|l| l.component == component && l.kind == kind) {
            return existing.id;
        }
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, component, kind });
        id
    }

    /// Returns `true` if the listener existed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Drop every listener owned by `component`. Returns how many were removed.
    pub fn unsubscribe_all(&mut self, component: ComponentId) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.component != component);
        before - self.listeners.len()
    }

    /// Components listening for `kind`, in registration order.
    #[must_use]
    pub fn listeners(&self, kind: EventKind) -> Vec<ComponentId> {
        self.listeners.iter().filter(|l| l.kind == kind).map(|l| l.component).collect()
    }

    #[must_use]
    pub fn is_subscribed(&self, component: ComponentId, kind: EventKind) -> bool {
        self.listeners.iter().any(|l| l.component == component && l.kind == kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

// =============================================================================
// COMPONENT LIFECYCLE
// =============================================================================

/// A page component bound to a document of type `D`.
pub trait Component<D: ?Sized> {
    fn id(&self) -> ComponentId;

    /// Prepare the document and register listeners. Must be safe to call
    /// more than once.
    fn attach(&mut self, doc: &mut D, subs: &mut Subscriptions);

    fn handle(&mut self, event: &UiEvent, doc: &mut D) -> Propagation;

    /// Release resources and listeners.
    fn detach(&mut self, doc: &mut D, subs: &mut Subscriptions) {
        let _ = doc;
        subs.unsubscribe_all(self.id());
    }
}
