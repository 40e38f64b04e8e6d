//! The transition table: explicit transitions, fallbacks, known states.

use super::state::{Input, State};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors raised while registering or resolving transitions.
#[derive(Debug, Error)]
pub enum TableError {
    /// A transition for this (state, input) pair already exists.
    #[error("transition for `{input}` is already registered for state `{state}`")]
    DuplicateTransition { state: String, input: String },

    /// A fallback for this state already exists.
    #[error("fallback for state `{state}` is already registered")]
    DuplicateFallback { state: String },

    /// Neither an explicit transition nor a fallback resolves the pair.
    /// Both values are carried (rendered) for diagnostics.
    #[error("no transition for `{input}` in state `{state}`")]
    UnknownTransition { state: String, input: String },
}

/// A table of state transitions.
///
/// The table owns three things: the explicit (state, input) → state map,
/// an optional fallback target per state, and the set of every state seen
/// on either side of a registration. It is built once, typically through
/// a [`MachineBuilder`](crate::builder::MachineBuilder), and then shared,
/// read-only, by every [`Machine`](crate::machine::Machine) bound to it.
///
/// # Example
///
/// ```rust
/// use turnstile::core::TransitionTable;
///
/// let mut table = TransitionTable::new();
/// table.register("locked", "coin", "unlocked").unwrap();
/// table.register("unlocked", "push", "locked").unwrap();
/// table.register_fallback("locked", "locked").unwrap();
///
/// assert!(table.has_state(&"unlocked"));
/// assert!(table.can(&"coin", &"locked"));
/// assert_eq!(table.resolve(&"coin", &"locked").unwrap(), &"unlocked");
///
/// // "push" in "locked" only resolves through the fallback:
/// assert!(!table.can(&"push", &"locked"));
/// assert_eq!(table.resolve(&"push", &"locked").unwrap(), &"locked");
/// ```
#[derive(Clone, Debug)]
pub struct TransitionTable<S: State, I: Input> {
    transitions: HashMap<S, HashMap<I, S>>,
    fallbacks: HashMap<S, S>,
    states: HashSet<S>,
}

impl<S: State, I: Input> TransitionTable<S, I> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            transitions: HashMap::new(),
            fallbacks: HashMap::new(),
            states: HashSet::new(),
        }
    }

    /// Register a single transition.
    ///
    /// Both `from` and `to` join the known-states set. Fails with
    /// [`TableError::DuplicateTransition`] if an entry already exists for
    /// (`from`, `input`); the existing entry is left untouched.
    pub fn register(&mut self, from: S, input: I, to: S) -> Result<(), TableError> {
        if self
            .transitions
            .get(&from)
            .is_some_and(|entries| entries.contains_key(&input))
        {
            return Err(TableError::DuplicateTransition {
                state: format!("{from:?}"),
                input: format!("{input:?}"),
            });
        }

        self.states.insert(from.clone());
        self.states.insert(to.clone());
        self.transitions.entry(from).or_default().insert(input, to);
        Ok(())
    }

    /// Register the same target state for every symbol in `inputs`.
    ///
    /// Applies [`register`](Self::register) once per symbol, in order, so
    /// a duplicate among them fails at the first conflict. Registration is
    /// not atomic: symbols before the conflict stay registered, and a
    /// table that errored mid-batch should be treated as unusable.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::core::TransitionTable;
    ///
    /// let mut table = TransitionTable::new();
    /// table.register_many("start", '0'..='9', "number").unwrap();
    ///
    /// assert!(table.can(&'7', &"start"));
    /// ```
    pub fn register_many<T>(&mut self, from: S, inputs: T, to: S) -> Result<(), TableError>
    where
        T: IntoIterator<Item = I>,
    {
        for input in inputs {
            self.register(from.clone(), input, to.clone())?;
        }
        Ok(())
    }

    /// Register a fallback transition for `from`.
    ///
    /// The fallback is used by [`resolve`](Self::resolve) when no explicit
    /// transition matches the input. Both states join the known-states
    /// set. Fails with [`TableError::DuplicateFallback`] if `from` already
    /// has one.
    pub fn register_fallback(&mut self, from: S, to: S) -> Result<(), TableError> {
        if self.fallbacks.contains_key(&from) {
            return Err(TableError::DuplicateFallback {
                state: format!("{from:?}"),
            });
        }

        self.states.insert(from.clone());
        self.states.insert(to.clone());
        self.fallbacks.insert(from, to);
        Ok(())
    }

    /// Check whether `state` appears anywhere in the table, as the source
    /// or target of a transition or fallback.
    pub fn has_state(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    /// Check whether an explicit transition exists for (`current`, `input`).
    ///
    /// Fallbacks are deliberately not consulted: an input that only a
    /// fallback would resolve reports `false` here even though
    /// [`resolve`](Self::resolve) succeeds for it. Callers probing whether
    /// `process` would succeed must keep this asymmetry in mind.
    pub fn can(&self, input: &I, current: &S) -> bool {
        self.transitions
            .get(current)
            .is_some_and(|entries| entries.contains_key(input))
    }

    /// Resolve (`current`, `input`) to the next state.
    ///
    /// Resolution order: the explicit transition for the pair, then the
    /// fallback for `current`. Fails with
    /// [`TableError::UnknownTransition`] when neither exists.
    pub fn resolve(&self, input: &I, current: &S) -> Result<&S, TableError> {
        if let Some(to) = self.transitions.get(current).and_then(|entries| entries.get(input)) {
            return Ok(to);
        }

        self.fallbacks
            .get(current)
            .ok_or_else(|| TableError::UnknownTransition {
                state: format!("{current:?}"),
                input: format!("{input:?}"),
            })
    }
}

impl<S: State, I: Input> Default for TransitionTable<S, I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggle_table() -> TransitionTable<&'static str, char> {
        let mut table = TransitionTable::new();
        table.register("off", 'x', "on").unwrap();
        table.register("on", 'x', "off").unwrap();
        table
    }

    #[test]
    fn register_then_can_and_resolve() {
        let table = toggle_table();

        assert!(table.can(&'x', &"off"));
        assert_eq!(table.resolve(&'x', &"off").unwrap(), &"on");
        assert_eq!(table.resolve(&'x', &"on").unwrap(), &"off");
    }

    #[test]
    fn duplicate_transition_is_rejected() {
        let mut table = toggle_table();

        let err = table.register("off", 'x', "elsewhere").unwrap_err();
        assert!(matches!(err, TableError::DuplicateTransition { .. }));

        // The original entry survives.
        assert_eq!(table.resolve(&'x', &"off").unwrap(), &"on");
    }

    #[test]
    fn duplicate_rejected_even_with_same_target() {
        let mut table = toggle_table();

        let err = table.register("off", 'x', "on").unwrap_err();
        assert!(matches!(err, TableError::DuplicateTransition { .. }));
    }

    #[test]
    fn register_many_registers_each_symbol() {
        let mut table = TransitionTable::new();
        table.register_many("start", ['a', 'b', 'c'], "end").unwrap();

        for input in ['a', 'b', 'c'] {
            assert_eq!(table.resolve(&input, &"start").unwrap(), &"end");
        }
    }

    #[test]
    fn register_many_stops_at_first_conflict() {
        let mut table = TransitionTable::new();
        table.register("start", 'b', "taken").unwrap();

        let err = table.register_many("start", ['a', 'b', 'c'], "end").unwrap_err();
        assert!(matches!(err, TableError::DuplicateTransition { .. }));

        // 'a' was registered before the conflict, 'c' never was.
        assert_eq!(table.resolve(&'a', &"start").unwrap(), &"end");
        assert_eq!(table.resolve(&'b', &"start").unwrap(), &"taken");
        assert!(table.resolve(&'c', &"start").is_err());
    }

    #[test]
    fn fallback_used_when_no_explicit_entry() {
        let mut table = toggle_table();
        table.register_fallback("off", "off").unwrap();

        assert_eq!(table.resolve(&'?', &"off").unwrap(), &"off");
    }

    #[test]
    fn explicit_entry_beats_fallback() {
        let mut table = toggle_table();
        table.register_fallback("off", "dump").unwrap();

        assert_eq!(table.resolve(&'x', &"off").unwrap(), &"on");
    }

    #[test]
    fn duplicate_fallback_is_rejected() {
        let mut table = toggle_table();
        table.register_fallback("off", "off").unwrap();

        let err = table.register_fallback("off", "on").unwrap_err();
        assert!(matches!(err, TableError::DuplicateFallback { .. }));

        assert_eq!(table.resolve(&'?', &"off").unwrap(), &"off");
    }

    #[test]
    fn can_ignores_fallbacks() {
        let mut table = toggle_table();
        table.register_fallback("off", "off").unwrap();

        // resolve succeeds through the fallback, can still says no.
        assert!(table.resolve(&'?', &"off").is_ok());
        assert!(!table.can(&'?', &"off"));
    }

    #[test]
    fn resolve_unknown_pair_is_an_error() {
        let table = toggle_table();

        let err = table.resolve(&'z', &"off").unwrap_err();
        match err {
            TableError::UnknownTransition { state, input } => {
                assert!(state.contains("off"));
                assert!(input.contains('z'));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn resolve_from_unknown_state_is_an_error() {
        let table = toggle_table();
        assert!(table.resolve(&'x', &"nowhere").is_err());
    }

    #[test]
    fn has_state_tracks_both_sides_of_registrations() {
        let mut table = TransitionTable::new();
        table.register("a", '1', "b").unwrap();
        table.register_fallback("c", "d").unwrap();

        for state in ["a", "b", "c", "d"] {
            assert!(table.has_state(&state));
        }
        assert!(!table.has_state(&"e"));
    }

    #[test]
    fn empty_table_knows_no_states() {
        let table: TransitionTable<&str, char> = TransitionTable::new();
        assert!(!table.has_state(&"anything"));
    }
}
