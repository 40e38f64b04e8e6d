//! Checkpoint and stored-state support for machines.
//!
//! Transition tables and handlers are never persisted; only the state
//! value is. Two shapes are provided:
//!
//! - [`StateStore`] round-trips the current state through its JSON string
//!   form, the shape storage columns want: `store` renders the state,
//!   `load` rebuilds a machine whose initial state is the stored value.
//! - [`Snapshot`] is a richer, versioned capture (id, timestamp, state)
//!   with JSON and binary forms, for callers that keep checkpoints as
//!   documents rather than a single column.

use crate::builder::Blueprint;
use crate::core::{Input, State, TransitionTable};
use crate::machine::Machine;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's current state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot<S> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// The machine state at capture time
    pub state: S,
}

impl<S> Snapshot<S>
where
    S: State + Serialize + DeserializeOwned,
{
    /// Capture the current state of `machine`.
    pub fn capture<I: Input>(machine: &Machine<S, I>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            state: machine.state().clone(),
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from a JSON string, rejecting unsupported versions.
    pub fn from_json(raw: &str) -> Result<Self, CheckpointError> {
        let snapshot: Self = serde_json::from_str(raw)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        snapshot.validate_version()?;
        Ok(snapshot)
    }

    /// Serialize to a compact binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from the binary form, rejecting unsupported versions.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, CheckpointError> {
        let snapshot: Self = bincode::deserialize(raw)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        snapshot.validate_version()?;
        Ok(snapshot)
    }

    /// Spawn a machine against `table` with the captured state as its
    /// initial state. Fails if the captured state is unknown to the table.
    pub fn resume<I: Input>(
        &self,
        table: Arc<TransitionTable<S, I>>,
    ) -> Result<Machine<S, I>, CheckpointError> {
        Ok(Machine::new(table, self.state.clone())?)
    }

    fn validate_version(&self) -> Result<(), CheckpointError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }
}

/// Round-trips a machine's current state through its JSON string form.
///
/// This is the glue for storage columns that persist the state as a plain
/// string: [`store`](StateStore::store) renders the current state,
/// [`load`](StateStore::load) rebuilds a machine whose initial state is
/// the stored value. A stored value must always be loadable as a legal
/// initial state for the table in use; `load` fails otherwise.
///
/// # Example
///
/// ```rust
/// use turnstile::builder::MachineBuilder;
/// use turnstile::checkpoint::StateStore;
///
/// let blueprint = MachineBuilder::new()
///     .initial("draft".to_string())
///     .transition("draft".to_string(), "submit".to_string(), "review".to_string())
///     .transition("review".to_string(), "approve".to_string(), "done".to_string())
///     .build()
///     .unwrap();
///
/// let store = StateStore::new(blueprint);
/// let mut machine = store.blueprint().machine().unwrap();
/// machine.process("submit".to_string()).unwrap();
///
/// let raw = store.store(&machine).unwrap();
/// let restored = store.load(&raw).unwrap();
/// assert_eq!(restored.state(), &"review".to_string());
/// ```
pub struct StateStore<S: State, I: Input> {
    blueprint: Blueprint<S, I>,
}

impl<S, I> StateStore<S, I>
where
    S: State + Serialize + DeserializeOwned,
    I: Input,
{
    /// Create a store bound to `blueprint`'s table.
    pub fn new(blueprint: Blueprint<S, I>) -> Self {
        Self { blueprint }
    }

    /// The blueprint this store rebuilds machines from.
    pub fn blueprint(&self) -> &Blueprint<S, I> {
        &self.blueprint
    }

    /// Rebuild a machine from a stored state string. The stored state
    /// becomes the machine's initial state.
    pub fn load(&self, raw: &str) -> Result<Machine<S, I>, CheckpointError> {
        let state: S = serde_json::from_str(raw)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        Ok(Machine::new(Arc::clone(self.blueprint.table()), state)?)
    }

    /// Render `machine`'s current state as its stored string form.
    pub fn store(&self, machine: &Machine<S, I>) -> Result<String, CheckpointError> {
        serde_json::to_string(machine.state())
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MachineBuilder;

    fn workflow() -> Blueprint<String, String> {
        MachineBuilder::new()
            .initial("draft".to_string())
            .transition("draft".to_string(), "submit".to_string(), "review".to_string())
            .transition("review".to_string(), "approve".to_string(), "done".to_string())
            .transition("review".to_string(), "reject".to_string(), "draft".to_string())
            .build()
            .unwrap()
    }

    #[test]
    fn snapshot_captures_the_current_state() {
        let mut machine = workflow().machine().unwrap();
        machine.process("submit".to_string()).unwrap();

        let snapshot = Snapshot::capture(&machine);
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.state, "review".to_string());
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let machine = workflow().machine().unwrap();
        let snapshot = Snapshot::capture(&machine);

        let json = snapshot.to_json().unwrap();
        let restored: Snapshot<String> = Snapshot::from_json(&json).unwrap();

        assert_eq!(restored.id, snapshot.id);
        assert_eq!(restored.state, snapshot.state);
    }

    #[test]
    fn snapshot_round_trips_through_bytes() {
        let machine = workflow().machine().unwrap();
        let snapshot = Snapshot::capture(&machine);

        let bytes = snapshot.to_bytes().unwrap();
        let restored: Snapshot<String> = Snapshot::from_bytes(&bytes).unwrap();

        assert_eq!(restored.id, snapshot.id);
        assert_eq!(restored.state, snapshot.state);
    }

    #[test]
    fn foreign_versions_are_rejected() {
        let machine = workflow().machine().unwrap();
        let mut snapshot = Snapshot::capture(&machine);
        snapshot.version = 99;

        let json = snapshot.to_json().unwrap();
        let err = Snapshot::<String>::from_json(&json).unwrap_err();

        assert!(matches!(
            err,
            CheckpointError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn garbage_json_is_a_deserialization_error() {
        let err = Snapshot::<String>::from_json("not json").unwrap_err();
        assert!(matches!(err, CheckpointError::DeserializationFailed(_)));
    }

    #[test]
    fn snapshot_resumes_at_the_captured_state() {
        let blueprint = workflow();
        let mut machine = blueprint.machine().unwrap();
        machine.process("submit".to_string()).unwrap();

        let snapshot = Snapshot::capture(&machine);
        let resumed = snapshot.resume(Arc::clone(blueprint.table())).unwrap();

        assert_eq!(resumed.state(), &"review".to_string());
        // The captured state is also the resumed machine's initial state.
        assert_eq!(resumed.initial(), &"review".to_string());
    }

    #[test]
    fn store_and_load_round_trip() {
        let store = StateStore::new(workflow());
        let mut machine = store.blueprint().machine().unwrap();
        machine.process("submit".to_string()).unwrap();

        let raw = store.store(&machine).unwrap();
        let restored = store.load(&raw).unwrap();

        assert_eq!(restored.state(), &"review".to_string());
        assert_eq!(restored.initial(), &"review".to_string());
    }

    #[test]
    fn loading_an_unknown_state_fails() {
        let store = StateStore::new(workflow());

        let err = store.load("\"limbo\"").unwrap_err();
        assert!(matches!(err, CheckpointError::Machine(_)));
    }

    #[test]
    fn loaded_machines_keep_working() {
        let store = StateStore::new(workflow());
        let mut machine = store.load("\"review\"").unwrap();

        machine.process("approve".to_string()).unwrap();
        assert_eq!(machine.state(), &"done".to_string());
    }
}
