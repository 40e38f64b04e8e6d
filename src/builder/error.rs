//! Build errors for machine construction.

use crate::core::TableError;
use crate::machine::MachineError;
use thiserror::Error;

/// Errors that can occur when building blueprints and machines.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    /// A registration conflict while replaying the declared rules.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Spawning the machine failed, e.g. the initial state is unknown.
    #[error(transparent)]
    Machine(#[from] MachineError),
}
