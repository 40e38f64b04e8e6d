//! Machine events and the synchronous event hub.

use crate::core::{Input, State};

/// A notification emitted by a [`Machine`](crate::machine::Machine).
///
/// Events form a closed set, so subscribers get compile-time
/// exhaustiveness when matching on them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MachineEvent<S: State, I: Input> {
    /// The machine is moving to a different state. Emitted before the new
    /// state is committed during `process`; emitted unconditionally by
    /// `reset`, even when the state does not actually change.
    Change {
        /// The state being entered.
        state: S,
        /// The state being left.
        previous: S,
    },

    /// The machine processed an input symbol. Emitted after the new state
    /// is committed, whether or not the input caused a state change.
    Input {
        /// The state the machine landed in.
        state: S,
        /// The input symbol that was processed.
        value: I,
    },

    /// The machine was reset to its initial state. Carries no payload;
    /// it always follows the unconditional `Change` that `reset` emits.
    Reset,
}

impl<S: State, I: Input> MachineEvent<S, I> {
    /// The event's name, for display and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Change { .. } => "change",
            Self::Input { .. } => "input",
            Self::Reset => "reset",
        }
    }
}

/// Subscriber callback stored by an [`EventHub`].
pub type Subscriber<S, I> = Box<dyn FnMut(&MachineEvent<S, I>) + Send>;

/// Per-state input handler registered via
/// [`Machine::when`](crate::machine::Machine::when). Handlers receive only
/// the input symbol, not the state they were registered for.
pub type InputHandler<I> = Box<dyn FnMut(&I) + Send>;

/// A minimal synchronous publish/subscribe hub.
///
/// Subscribers are invoked synchronously, in subscription order, on the
/// calling thread; `publish` returns only after every subscriber has run.
/// There is no queuing and no per-event filtering: a subscriber receives
/// every event and matches on the variants it cares about.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use turnstile::machine::{EventHub, MachineEvent};
///
/// let mut hub: EventHub<&str, char> = EventHub::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let log = Arc::clone(&seen);
/// hub.subscribe(move |event| log.lock().unwrap().push(event.name()));
///
/// hub.publish(&MachineEvent::Reset);
/// assert_eq!(*seen.lock().unwrap(), vec!["reset"]);
/// ```
pub struct EventHub<S: State, I: Input> {
    subscribers: Vec<Subscriber<S, I>>,
}

impl<S: State, I: Input> EventHub<S, I> {
    /// Create a hub with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber. Subscribers cannot be removed and are
    /// invoked in the order they were added.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&MachineEvent<S, I>) + Send + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Deliver `event` to every subscriber, in subscription order.
    pub fn publish(&mut self, event: &MachineEvent<S, I>) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }
}

impl<S: State, I: Input> Default for EventHub<S, I> {
    fn default() -> Self {
        Self::new()
    }
}
