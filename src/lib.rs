//! Automata Engine: guarded, nondeterministic finite-state automata
//!
//! An automaton is a fixed set of states connected by transitions, each
//! guarded by a [`Trigger`]: a zero-argument predicate usually reading some
//! external state. The engine is a reactive step function. Every call to
//! [`Automaton::advance`] evaluates the guards leaving the current state and
//! commits at most one transition; there is no scheduler or timer.
//!
//! # Core Concepts
//!
//! - **State**: a name and an optional integer id, addressed by [`StateId`]
//! - **Trigger**: the guard condition that makes a transition eligible
//! - **Transition**: a guarded edge towards a target state
//! - **Active transitions**: edges out of the current state whose guard is true
//! - **Selector**: tie-breaker used when several transitions are active
//!
//! # Example
//!
//! ```rust
//! use automata_engine::builder::AutomatonBuilder;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let armed = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&armed);
//!
//! let mut builder = AutomatonBuilder::new();
//! builder.add_state("A").unwrap();
//! builder.add_state("B").unwrap();
//! builder.add_state("C").unwrap();
//! builder.connect_when("A", "B", move || flag.load(Ordering::SeqCst)).unwrap();
//! builder.connect_when("A", "C", || false).unwrap();
//!
//! let mut automaton = builder.build().unwrap();
//! assert!(!automaton.advance());
//!
//! armed.store(true, Ordering::SeqCst);
//! assert!(automaton.advance());
//! assert_eq!(automaton.current_state_name(), Some("B"));
//! ```

pub mod builder;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::builder::{AutomatonBuilder, BuildError, Branch, StateRef};
pub use crate::core::{
    AutomatonError, State, StateId, Transition, TransitionId, TransitionSet, Trigger,
};
pub use crate::engine::{Automaton, AutomatonConfig, DuplicateKeyPolicy};
