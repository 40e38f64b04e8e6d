//! Turnstile: a table-driven finite state machine library
//!
//! Turnstile drives a single state value through a sequence of input symbols
//! using a table of declared transitions, optional per-state fallback
//! transitions, and per-state input hooks. Every operation is synchronous
//! and runs to completion on the calling thread.
//!
//! # Core Concepts
//!
//! - **Transition table**: an immutable-after-build mapping from
//!   (state, input symbol) to next state, shared by machine instances
//! - **Fallbacks**: per-state default transitions used when no explicit
//!   entry matches the input
//! - **Machine**: a stateful executor bound to a table, with `process`,
//!   `process_many`, `can` and `reset`
//! - **Events**: `change`, `input` and `reset` notifications published
//!   synchronously, in subscription order, plus per-state input handlers
//!   registered via [`Machine::when`](machine::Machine::when)
//!
//! # Example
//!
//! ```rust
//! use turnstile::builder::MachineBuilder;
//!
//! let mut gate = MachineBuilder::new()
//!     .initial("locked")
//!     .transition("locked", "coin", "unlocked")
//!     .transition("unlocked", "push", "locked")
//!     .machine()
//!     .unwrap();
//!
//! assert_eq!(gate.state(), &"locked");
//! gate.process("coin").unwrap();
//! assert_eq!(gate.state(), &"unlocked");
//! gate.process("push").unwrap();
//! assert_eq!(gate.state(), &"locked");
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{Blueprint, BuildError, MachineBuilder};
pub use crate::checkpoint::{CheckpointError, Snapshot, StateStore};
pub use crate::core::{Input, State, TableError, TransitionTable};
pub use crate::machine::{EventHub, Machine, MachineError, MachineEvent};
