//! Turnstile Gate
//!
//! The classic coin/push turnstile, with a subscriber printing every
//! event the machine emits and a snapshot round-trip at the end.
//!
//! Run with: cargo run --example turnstile_gate

use std::sync::Arc;
use turnstile::builder::MachineBuilder;
use turnstile::checkpoint::Snapshot;
use turnstile::machine::MachineEvent;

fn main() {
    println!("=== Turnstile Gate ===\n");

    let blueprint = MachineBuilder::new()
        .initial("locked".to_string())
        .transition("locked".to_string(), "coin".to_string(), "unlocked".to_string())
        .transition("unlocked".to_string(), "push".to_string(), "locked".to_string())
        .fallback("locked".to_string(), "locked".to_string())
        .fallback("unlocked".to_string(), "unlocked".to_string())
        .build()
        .expect("gate definition is valid");

    let mut gate = blueprint.machine().expect("initial state is defined");

    gate.subscribe(|event| match event {
        MachineEvent::Change { state, previous } => {
            println!("  change: {} -> {}", previous, state);
        }
        MachineEvent::Input { state, value } => {
            println!("  input:  '{}' (now {})", value, state);
        }
        MachineEvent::Reset => println!("  reset"),
    });

    for action in ["push", "coin", "coin", "push"] {
        println!("{}:", action);
        gate.process(action.to_string()).expect("fallbacks cover every input");
    }

    let snapshot = Snapshot::capture(&gate);
    let json = snapshot.to_json().expect("snapshot serializes");
    println!("\nsnapshot: {}", json);

    let restored = Snapshot::from_json(&json)
        .expect("snapshot deserializes")
        .resume(Arc::clone(gate.table()))
        .expect("captured state is defined");
    println!("resumed at: {}", restored.state());
}
