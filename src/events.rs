//! Event listeners and synthetic dispatch.
//!
//! Listeners are reference-counted closures. Identity is pointer identity of the
//! `Rc`, so detaching requires the same `Listener` value that was attached.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::dom::NodeId;

/// An event listener.
pub type Listener = Rc<dyn Fn(&Event)>;

/// Wrap a closure as a [`Listener`].
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&Event) + 'static,
{
    Rc::new(f)
}

/// Delivery phase of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not being dispatched.
    None,
    /// Delivered to the element it was dispatched on.
    AtTarget,
    /// Delivered to an ancestor of the target.
    Bubbling,
}

/// A synthetic event passed to listeners.
pub struct Event {
    event_type: String,
    target: NodeId,
    current_target: Cell<NodeId>,
    phase: Cell<Phase>,
    propagation_stopped: Cell<bool>,
    immediate_propagation_stopped: Cell<bool>,
}

impl Event {
    pub(crate) fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: Cell::new(target),
            phase: Cell::new(Phase::None),
            propagation_stopped: Cell::new(false),
            immediate_propagation_stopped: Cell::new(false),
        }
    }

    /// Event name, e.g. `"click"`.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Element the event was dispatched on.
    #[must_use]
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Element whose listeners are currently running.
    #[must_use]
    pub fn current_target(&self) -> NodeId {
        self.current_target.get()
    }

    /// Current delivery phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    /// Stop delivery to ancestors after the current element's listeners.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Stop delivery to any further listener, including ones on this element.
    pub fn stop_immediate_propagation(&self) {
        self.propagation_stopped.set(true);
        self.immediate_propagation_stopped.set(true);
    }

    /// Whether `stop_propagation` was called.
    #[must_use]
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub(crate) fn enter(&self, node: NodeId, phase: Phase) {
        self.current_target.set(node);
        self.phase.set(phase);
    }

    pub(crate) fn finish(&self) {
        self.phase.set(Phase::None);
    }

    pub(crate) fn immediate_stopped(&self) -> bool {
        self.immediate_propagation_stopped.get()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("event_type", &self.event_type)
            .field("target", &self.target)
            .field("current_target", &self.current_target.get())
            .field("phase", &self.phase.get())
            .field("propagation_stopped", &self.propagation_stopped.get())
            .finish()
    }
}

/// Per-element listener lists, keyed by event name.
#[derive(Default)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    /// Register a listener. With `dedupe`, a listener already registered for the
    /// same element and event is not added again. Returns whether it was added.
    pub(crate) fn add(&mut self, node: NodeId, event: &str, listener: Listener, dedupe: bool) -> bool {
        let listeners = self
            .map
            .entry(node)
            .or_default()
            .entry(event.to_string())
            .or_default();
        if dedupe && listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    /// Remove the first registration of `listener`. Returns whether one was found.
    pub(crate) fn remove(&mut self, node: NodeId, event: &str, listener: &Listener) -> bool {
        let Some(events) = self.map.get_mut(&node) else {
            return false;
        };
        let Some(listeners) = events.get_mut(event) else {
            return false;
        };

        if let Some(pos) = listeners.iter().position(|l| Rc::ptr_eq(l, listener)) {
            listeners.remove(pos);
            if listeners.is_empty() {
                events.remove(event);
            }
            if events.is_empty() {
                self.map.remove(&node);
            }
            return true;
        }

        false
    }

    /// Snapshot of the listeners for an element and event.
    pub(crate) fn get(&self, node: NodeId, event: &str) -> Vec<Listener> {
        self.map
            .get(&node)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of listeners registered for an element and event.
    pub(crate) fn count(&self, node: NodeId, event: &str) -> usize {
        self.map
            .get(&node)
            .and_then(|events| events.get(event))
            .map_or(0, Vec::len)
    }
}

impl fmt::Debug for ListenerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerStore")
            .field("elements", &self.map.len())
            .finish()
    }
}
