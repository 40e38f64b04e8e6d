//! Digit Detector
//!
//! Extracts digit runs from mixed text using fallback transitions:
//! digits move the machine into "digit", anything else falls back to
//! "letter".
//!
//! Run with: cargo run --example digit_detector

use std::sync::{Arc, Mutex};
use turnstile::builder::MachineBuilder;

fn main() {
    println!("=== Digit Detector ===\n");

    let mut machine = MachineBuilder::new()
        .initial("letter")
        .transition_many("letter", '0'..='9', "digit")
        .transition_many("digit", '0'..='9', "digit")
        .fallback("digit", "letter")
        .fallback("letter", "letter")
        .machine()
        .expect("detector definition is valid");

    let output = Arc::new(Mutex::new(String::new()));
    let sink = Arc::clone(&output);
    machine.when("digit", move |value: &char| {
        sink.lock().unwrap().push(*value);
    });

    let text = "test1234test4321";
    let final_state = *machine.process_many(text.chars()).expect("fallbacks cover every input");

    println!("input:       {}", text);
    println!("final state: {}", final_state);
    println!("digits seen: {}", output.lock().unwrap());
}
