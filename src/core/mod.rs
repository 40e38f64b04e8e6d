//! Core transition table types.
//!
//! This module contains the heart of the library:
//! - The [`State`] and [`Input`] marker traits describing what can act as
//!   a state or an input symbol
//! - The [`TransitionTable`] mapping (state, input) pairs to next states,
//!   with per-state fallbacks and the derived known-states set
//!
//! Tables are mutable while transitions are being registered and are then
//! shared read-only (typically behind an `Arc`) by every machine built
//! from them.

mod state;
mod table;

pub use state::{Input, State};
pub use table::{TableError, TransitionTable};
