//! Digit Summator
//!
//! A machine that accumulates digits and sums them when it sees '='.
//!
//! Key concepts:
//! - Registering the same target for a whole range of symbols
//! - Per-state handlers collecting side effects
//! - Reusing one machine across cycles via reset
//!
//! Run with: cargo run --example summator

use std::sync::{Arc, Mutex};
use turnstile::builder::MachineBuilder;
use turnstile::machine::Machine;

struct Summator {
    machine: Machine<&'static str, char>,
    digits: Arc<Mutex<Vec<u32>>>,
    result: Arc<Mutex<Option<u32>>>,
}

impl Summator {
    fn new() -> Self {
        let mut machine = MachineBuilder::new()
            .initial("init")
            .transition_many("init", '0'..='9', "digit_enter")
            .transition_many("digit_enter", '0'..='9', "digit_enter")
            .transition("digit_enter", '=', "summarize")
            .machine()
            .expect("summator definition is valid");

        let digits = Arc::new(Mutex::new(Vec::new()));
        let result = Arc::new(Mutex::new(None));

        let store = Arc::clone(&digits);
        machine.when("digit_enter", move |value: &char| {
            if let Some(digit) = value.to_digit(10) {
                store.lock().unwrap().push(digit);
            }
        });

        let read = Arc::clone(&digits);
        let total = Arc::clone(&result);
        machine.when("summarize", move |_: &char| {
            *total.lock().unwrap() = Some(read.lock().unwrap().iter().sum::<u32>());
        });

        Self {
            machine,
            digits,
            result,
        }
    }

    fn summarize(&mut self, input: &str) -> Option<u32> {
        self.digits.lock().unwrap().clear();
        *self.result.lock().unwrap() = None;
        self.machine.reset().expect("initial state is defined");
        self.machine
            .process_many(input.chars().chain(['=']))
            .expect("input is all digits");
        *self.result.lock().unwrap()
    }
}

fn main() {
    println!("=== Digit Summator ===\n");

    let mut summator = Summator::new();

    for input in ["666", "1234", "9"] {
        let total = summator.summarize(input);
        println!("sum of '{}' digits: {:?}", input, total);
    }
}
