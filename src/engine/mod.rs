//! The automaton execution engine.
//!
//! The engine is a reactive step function: each call to
//! [`Automaton::advance`] evaluates the guards leaving the current state,
//! resolves any ambiguity between several true guards, and commits at most
//! one transition. Nothing runs in the background.
//!
//! # Nondeterminism
//!
//! When more than one guard is true the default [`Automaton::advance`] picks
//! uniformly at random using a PRNG owned by the automaton. Seed it with
//! [`Automaton::seed`] (or [`AutomatonConfig::with_seed`]) for reproducible
//! runs, or pass a selector to [`Automaton::advance_with`] to decide
//! explicitly.

mod automaton;
mod config;

pub use automaton::Automaton;
pub use config::{AutomatonConfig, DuplicateKeyPolicy};
