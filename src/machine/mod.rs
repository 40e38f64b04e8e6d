//! Machine execution engine and event plumbing.
//!
//! - [`Machine`] drives a state value through input symbols against a
//!   shared [`TransitionTable`](crate::core::TransitionTable)
//! - [`MachineEvent`] is the closed set of notifications a machine emits
//! - [`EventHub`] is the minimal synchronous publish/subscribe facility
//!   those notifications travel through

mod engine;
mod event;

pub use engine::{Machine, MachineError};
pub use event::{EventHub, InputHandler, MachineEvent, Subscriber};
