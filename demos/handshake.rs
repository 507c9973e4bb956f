//! Handshake Automaton
//!
//! This demo builds a small handshake protocol and drives it step by step.
//!
//! Key concepts:
//! - States addressed by name and by integer id
//! - Edge chains with a guard on the first edge only
//! - A nondeterministic branch resolved by the seeded PRNG
//! - Dead ends reported by `advance` returning false
//!
//! Run with: RUST_LOG=debug cargo run --example handshake

use automata_engine::builder::{AutomatonBuilder, Branch};
use automata_engine::engine::AutomatonConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Handshake Automaton ===\n");

    let link_up = Arc::new(AtomicBool::new(false));
    let link = Arc::clone(&link_up);

    let mut builder = AutomatonBuilder::with_config(AutomatonConfig::default().with_seed(2024));
    for (id, name) in [
        "Idle", "Ready", "InitWait", "T1 Wait", "T2 Wait", "Success", "Failure",
    ]
    .iter()
    .enumerate()
    {
        builder.add_state_with_id(*name, id as i32)?;
    }

    builder
        .path("Idle")?
        .when(move || link.load(Ordering::SeqCst))
        .to("Ready")?
        .to("InitWait")?
        .to(3)?
        .to(4)?
        .branch(Branch::new().to("Success").to("Failure"))?;
    builder.connect("Success", "Idle")?;
    builder.connect("Failure", "Idle")?;

    let mut automaton = builder.build()?;

    println!("Link down, starting in {:?}", automaton.current_state_name());
    if !automaton.advance() {
        println!("  no active transition, still in {:?}\n", automaton.current_state_name());
    }

    link_up.store(true, Ordering::SeqCst);
    println!("Link up, running 15 steps:");
    for step in 1..=15 {
        let moved = automaton.advance();
        println!(
            "  step {:>2}: {:<8} (id {:?}){}",
            step,
            automaton.current_state_name().unwrap_or("-"),
            automaton.current_state_id(),
            if moved { "" } else { " [dead end]" }
        );
    }

    let outcomes = automaton
        .history()
        .records()
        .iter()
        .filter(|record| {
            automaton
                .state(record.to)
                .is_some_and(|state| matches!(state.name(), "Success" | "Failure"))
        })
        .count();
    println!("\nBranch resolved {} times", outcomes);

    println!("\n=== Demo Complete ===");
    Ok(())
}
