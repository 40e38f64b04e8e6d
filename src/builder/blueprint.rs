//! Machine definitions as plain values.

use crate::core::{Input, State, TransitionTable};
use crate::machine::{Machine, MachineError};
use std::sync::Arc;

/// A machine definition: a shared transition table plus an initial state.
///
/// A blueprint is what a machine *type* is in this library: a value, not
/// a type hierarchy. Cloning a blueprint is cheap (the table is behind an
/// `Arc`), and every machine it spawns runs against the same table.
///
/// # Example
///
/// ```rust
/// use turnstile::builder::MachineBuilder;
///
/// let blueprint = MachineBuilder::new()
///     .initial("off")
///     .transition("off", "flip", "on")
///     .transition("on", "flip", "off")
///     .build()
///     .unwrap();
///
/// let mut first = blueprint.machine().unwrap();
/// let second = blueprint.machine().unwrap();
///
/// first.process("flip").unwrap();
/// assert_eq!(first.state(), &"on");
/// assert_eq!(second.state(), &"off");
/// ```
#[derive(Clone)]
pub struct Blueprint<S: State, I: Input> {
    table: Arc<TransitionTable<S, I>>,
    initial: S,
}

impl<S: State, I: Input> Blueprint<S, I> {
    /// Create a blueprint from a finished table and an initial state.
    ///
    /// The initial state is validated when a machine is spawned, not
    /// here.
    pub fn new(table: Arc<TransitionTable<S, I>>, initial: S) -> Self {
        Self { table, initial }
    }

    /// The shared transition table.
    pub fn table(&self) -> &Arc<TransitionTable<S, I>> {
        &self.table
    }

    /// The initial state machines spawn in.
    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// Spawn a machine instance.
    ///
    /// Fails with [`MachineError::StateNotDefined`] if the initial state
    /// is unknown to the table.
    pub fn machine(&self) -> Result<Machine<S, I>, MachineError> {
        Machine::new(Arc::clone(&self.table), self.initial.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MachineBuilder;

    fn sample() -> Blueprint<&'static str, char> {
        MachineBuilder::new()
            .initial("a")
            .transition("a", 'x', "b")
            .transition("b", 'x', "a")
            .build()
            .unwrap()
    }

    #[test]
    fn spawned_machines_start_at_the_initial_state() {
        let blueprint = sample();
        let machine = blueprint.machine().unwrap();
        assert_eq!(machine.state(), blueprint.initial());
    }

    #[test]
    fn spawned_machines_share_the_table() {
        let blueprint = sample();
        let first = blueprint.machine().unwrap();
        let second = blueprint.machine().unwrap();

        assert!(Arc::ptr_eq(first.table(), second.table()));
    }

    #[test]
    fn clones_share_the_table_too() {
        let blueprint = sample();
        let copy = blueprint.clone();

        assert!(Arc::ptr_eq(blueprint.table(), copy.table()));
    }

    #[test]
    fn spawning_validates_the_initial_state() {
        let blueprint = Blueprint::new(sample().table().clone(), "nowhere");
        assert!(blueprint.machine().is_err());
    }
}
