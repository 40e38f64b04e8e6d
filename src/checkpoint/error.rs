//! Checkpoint error types.

use crate::machine::MachineError;
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary form failed
    #[error("serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary form failed
    #[error("deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this build
    #[error("unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Rebuilding a machine from a stored state failed, e.g. the stored
    /// state is not a legal initial state for the table in use
    #[error(transparent)]
    Machine(#[from] MachineError),
}
