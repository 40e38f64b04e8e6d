//! Fluent construction of tables, blueprints and machines.
//!
//! [`MachineBuilder`] collects the full machine configuration (initial
//! state, ordered transition rules, ordered fallback pairs) and replays
//! it into a fresh [`TransitionTable`](crate::core::TransitionTable) on
//! `build()`. Replaying in the declared order keeps duplicate detection
//! deterministic: the second occurrence is always the one reported.
//!
//! The built [`Blueprint`] is the reusable machine definition, a
//! (table, initial state) value, whose
//! [`machine()`](Blueprint::machine) factory spawns any number of
//! instances sharing one table.

pub mod blueprint;
pub mod error;
pub mod machine;

pub use blueprint::Blueprint;
pub use error::BuildError;
pub use machine::MachineBuilder;
