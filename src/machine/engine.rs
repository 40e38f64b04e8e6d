//! The machine execution engine.

use crate::core::{Input, State, TableError, TransitionTable};
use crate::machine::event::{EventHub, InputHandler, MachineEvent};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while running a machine.
#[derive(Debug, Error)]
pub enum MachineError {
    /// A table lookup failed; see [`TableError`]. Resolution errors from
    /// `process` pass through here unchanged.
    #[error(transparent)]
    Table(#[from] TableError),

    /// The configured initial state is not in the table's known-states
    /// set. Raised by `reset`, including the implicit reset performed at
    /// construction.
    #[error("initial state `{state}` is not defined in the transition table")]
    StateNotDefined { state: String },
}

/// A stateful executor bound to a shared [`TransitionTable`].
///
/// A machine owns its current state, its initial state, per-state input
/// handlers, and an [`EventHub`] through which it publishes
/// [`MachineEvent`]s. The table is shared (`Arc`), never mutated by the
/// machine; any number of machines can run against one table.
///
/// Construction performs an implicit [`reset`](Machine::reset), so a
/// freshly built machine already sits at its initial state, and fails to
/// build if that state is unknown to the table.
///
/// # Example
///
/// ```rust
/// use turnstile::builder::MachineBuilder;
///
/// let mut machine = MachineBuilder::new()
///     .initial("locked")
///     .transition("locked", "coin", "unlocked")
///     .transition("unlocked", "push", "locked")
///     .machine()
///     .unwrap();
///
/// assert!(machine.can(&"coin"));
/// machine.process("coin").unwrap();
/// assert_eq!(machine.state(), &"unlocked");
/// machine.reset().unwrap();
/// assert_eq!(machine.state(), &"locked");
/// ```
pub struct Machine<S: State, I: Input> {
    table: Arc<TransitionTable<S, I>>,
    initial: S,
    current: S,
    hub: EventHub<S, I>,
    handlers: HashMap<S, Vec<InputHandler<I>>>,
}

impl<S: State, I: Input> Machine<S, I> {
    /// Create a machine bound to `table`, starting at `initial`.
    ///
    /// Performs an implicit reset: fails with
    /// [`MachineError::StateNotDefined`] if `initial` is not a known
    /// state. The reset's `Change` and `Reset` notifications are emitted
    /// into a hub that has no subscribers yet; subscribers attach to the
    /// constructed machine via [`subscribe`](Machine::subscribe).
    pub fn new(table: Arc<TransitionTable<S, I>>, initial: S) -> Result<Self, MachineError> {
        let mut machine = Machine {
            current: initial.clone(),
            initial,
            table,
            hub: EventHub::new(),
            handlers: HashMap::new(),
        };
        machine.reset()?;
        Ok(machine)
    }

    /// The current state.
    pub fn state(&self) -> &S {
        &self.current
    }

    /// The initial state the machine resets to.
    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// The shared transition table this machine runs against.
    pub fn table(&self) -> &Arc<TransitionTable<S, I>> {
        &self.table
    }

    /// Process one input symbol and return the new state.
    ///
    /// The table resolves (current state, `input`) through its explicit
    /// entries, then its fallbacks. On failure the error propagates
    /// unchanged and the current state is untouched. On success:
    ///
    /// 1. if the resolved state differs from the current one, a `Change`
    ///    event is published *before* the new state is committed;
    /// 2. the new state is committed;
    /// 3. handlers registered via [`when`](Machine::when) for the new
    ///    state run, in registration order;
    /// 4. an `Input` event is published.
    ///
    /// Handlers and subscribers all run synchronously: their side effects
    /// are visible as soon as `process` returns.
    pub fn process(&mut self, input: I) -> Result<&S, MachineError> {
        let next = self.table.resolve(&input, &self.current)?.clone();

        if next != self.current {
            #[cfg(feature = "log-transitions")]
            tracing::debug!(
                "state transition: {:?} -> {:?} on {:?}",
                self.current,
                next,
                input
            );

            self.hub.publish(&MachineEvent::Change {
                state: next.clone(),
                previous: self.current.clone(),
            });
        }

        self.current = next;

        let state = self.current.clone();
        if let Some(handlers) = self.handlers.get_mut(&state) {
            for handler in handlers.iter_mut() {
                handler(&input);
            }
        }
        self.hub.publish(&MachineEvent::Input {
            state,
            value: input,
        });

        Ok(&self.current)
    }

    /// Process a sequence of input symbols, strictly in order.
    ///
    /// Stops at the first failure and propagates it; transitions already
    /// applied are not rolled back, so on error the machine rests at the
    /// last successfully resolved state. Returns the final state only if
    /// every symbol succeeded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::builder::MachineBuilder;
    ///
    /// let mut machine = MachineBuilder::new()
    ///     .initial("even")
    ///     .transition("even", 'x', "odd")
    ///     .transition("odd", 'x', "even")
    ///     .machine()
    ///     .unwrap();
    ///
    /// assert_eq!(machine.process_many("xxx".chars()).unwrap(), &"odd");
    /// ```
    pub fn process_many<T>(&mut self, inputs: T) -> Result<&S, MachineError>
    where
        T: IntoIterator<Item = I>,
    {
        for input in inputs {
            self.process(input)?;
        }
        Ok(&self.current)
    }

    /// Check whether an explicit transition exists for the current state
    /// and `input`.
    ///
    /// Delegates to [`TransitionTable::can`], which deliberately ignores
    /// fallbacks: `can` may report `false` for an input that
    /// [`process`](Machine::process) would resolve through a fallback.
    pub fn can(&self, input: &I) -> bool {
        self.table.can(input, &self.current)
    }

    /// Return the machine to its initial state.
    ///
    /// Fails with [`MachineError::StateNotDefined`] if the initial state
    /// is not in the table's known-states set; the check runs on every
    /// call, not only at construction. Otherwise the current state is set
    /// to the initial state and a `Change` event is published carrying the
    /// pre-reset state as `previous`, **even when the machine was already
    /// at its initial state**. Unlike `process`, `reset` never suppresses
    /// the no-op change notification; consumers rely on it to signal a
    /// fresh cycle. A `Reset` event follows.
    pub fn reset(&mut self) -> Result<&S, MachineError> {
        if !self.table.has_state(&self.initial) {
            return Err(MachineError::StateNotDefined {
                state: format!("{:?}", self.initial),
            });
        }

        #[cfg(feature = "log-transitions")]
        tracing::debug!("reset: {:?} -> {:?}", self.current, self.initial);

        let previous = std::mem::replace(&mut self.current, self.initial.clone());
        self.hub.publish(&MachineEvent::Change {
            state: self.current.clone(),
            previous,
        });
        self.hub.publish(&MachineEvent::Reset);

        Ok(&self.current)
    }

    /// Register a handler invoked every time an `Input` event lands the
    /// machine in `state`, whether or not that input changed the state.
    ///
    /// Handlers receive only the input symbol. They are appended (no
    /// de-duplication, no removal) and run in registration order, ahead of
    /// any hub subscriber seeing the `Input` event.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::{Arc, Mutex};
    /// use turnstile::builder::MachineBuilder;
    ///
    /// let mut machine = MachineBuilder::new()
    ///     .initial("start")
    ///     .transition_many("start", '0'..='9', "digit")
    ///     .transition_many("digit", '0'..='9', "digit")
    ///     .machine()
    ///     .unwrap();
    ///
    /// let seen = Arc::new(Mutex::new(String::new()));
    /// let sink = Arc::clone(&seen);
    /// machine.when("digit", move |value: &char| sink.lock().unwrap().push(*value));
    ///
    /// machine.process_many("42".chars()).unwrap();
    /// assert_eq!(*seen.lock().unwrap(), "42");
    /// ```
    pub fn when<F>(&mut self, state: S, handler: F)
    where
        F: FnMut(&I) + Send + 'static,
    {
        self.handlers.entry(state).or_default().push(Box::new(handler));
    }

    /// Attach a subscriber to this machine's event hub.
    ///
    /// The subscriber sees every [`MachineEvent`] published from now on,
    /// synchronously, in subscription order.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&MachineEvent<S, I>) + Send + 'static,
    {
        self.hub.subscribe(subscriber);
    }
}

impl<S: State, I: Input> fmt::Debug for Machine<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("current", &self.current)
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}
