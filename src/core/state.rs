//! Marker traits for states and input symbols.
//!
//! States and inputs are opaque values: the table imposes no structure on
//! them beyond identity. Both traits are blanket-implemented, so strings,
//! chars, integers and user enums all qualify with no code to write.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// A state is any cloneable, hashable, comparable value. There is nothing
/// to implement: a blanket impl covers every qualifying type.
///
/// # Example
///
/// ```rust
/// use turnstile::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum DoorState {
///     Open,
///     Closed,
/// }
///
/// fn takes_state<S: State>(_state: S) {}
///
/// takes_state(DoorState::Open);
/// takes_state("closed");
/// takes_state(42u8);
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync {}

impl<T: Clone + Eq + Hash + Debug + Send + Sync> State for T {}

/// Trait for input symbols fed to a machine.
///
/// Like [`State`], this is a blanket-implemented marker: any cloneable,
/// hashable, comparable value can drive a machine.
pub trait Input: Clone + Eq + Hash + Debug + Send + Sync {}

impl<T: Clone + Eq + Hash + Debug + Send + Sync> Input for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_state<S: State>() {}
    fn assert_input<I: Input>() {}

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum Phase {
        Idle,
        Busy,
    }

    #[test]
    fn common_types_qualify_as_states() {
        assert_state::<&'static str>();
        assert_state::<String>();
        assert_state::<char>();
        assert_state::<u32>();
        assert_state::<Phase>();
    }

    #[test]
    fn common_types_qualify_as_inputs() {
        assert_input::<&'static str>();
        assert_input::<String>();
        assert_input::<char>();
        assert_input::<u64>();
        assert_input::<Phase>();
    }

    #[test]
    fn enum_states_compare_by_identity() {
        assert_eq!(Phase::Idle, Phase::Idle);
        assert_ne!(Phase::Idle, Phase::Busy);
    }
}
