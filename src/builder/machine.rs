//! Builder for machine configurations.

use crate::builder::blueprint::Blueprint;
use crate::builder::error::BuildError;
use crate::core::{Input, State, TransitionTable};
use crate::machine::Machine;
use std::sync::Arc;

/// Builder collecting a machine configuration with a fluent API.
///
/// The builder itself never fails: it records the initial state, the
/// transition rules and the fallback pairs in the order they are declared,
/// and [`build`](MachineBuilder::build) replays them into a table. A
/// conflict therefore surfaces at build time, attributed to the second of
/// the two clashing declarations.
///
/// # Example
///
/// ```rust
/// use turnstile::builder::MachineBuilder;
///
/// let blueprint = MachineBuilder::new()
///     .initial("letter")
///     .transition_many("letter", '0'..='9', "digit")
///     .transition_many("digit", '0'..='9', "digit")
///     .fallback("digit", "letter")
///     .fallback("letter", "letter")
///     .build()
///     .unwrap();
///
/// let mut machine = blueprint.machine().unwrap();
/// machine.process_many("ab12".chars()).unwrap();
/// assert_eq!(machine.state(), &"digit");
/// ```
pub struct MachineBuilder<S: State, I: Input> {
    initial: Option<S>,
    transitions: Vec<(S, Vec<I>, S)>,
    fallbacks: Vec<(S, S)>,
}

impl<S: State, I: Input> MachineBuilder<S, I> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
            fallbacks: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare a transition from `from` to `to` on `input`.
    pub fn transition(mut self, from: S, input: I, to: S) -> Self {
        self.transitions.push((from, vec![input], to));
        self
    }

    /// Declare the same target state for every symbol in `inputs`.
    pub fn transition_many<T>(mut self, from: S, inputs: T, to: S) -> Self
    where
        T: IntoIterator<Item = I>,
    {
        self.transitions.push((from, inputs.into_iter().collect(), to));
        self
    }

    /// Declare a fallback from `from` to `to`, used when no declared
    /// transition matches an input in `from`.
    pub fn fallback(mut self, from: S, to: S) -> Self {
        self.fallbacks.push((from, to));
        self
    }

    /// Build the blueprint.
    ///
    /// Transitions are registered first, in declaration order, then
    /// fallbacks. The first conflicting declaration aborts the build.
    pub fn build(self) -> Result<Blueprint<S, I>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut table = TransitionTable::new();
        for (from, inputs, to) in self.transitions {
            table.register_many(from, inputs, to)?;
        }
        for (from, to) in self.fallbacks {
            table.register_fallback(from, to)?;
        }

        Ok(Blueprint::new(Arc::new(table), initial))
    }

    /// Build and immediately spawn a machine. Shorthand for
    /// `build()?.machine()`.
    pub fn machine(self) -> Result<Machine<S, I>, BuildError> {
        Ok(self.build()?.machine()?)
    }
}

impl<S: State, I: Input> Default for MachineBuilder<S, I> {
    fn default() -> Self {
        Self::new()
    }
}
