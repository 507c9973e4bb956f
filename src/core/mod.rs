//! Core automaton data model.
//!
//! This module contains the leaf types the engine is built from:
//! - States and their stable handles
//! - Triggers (guard predicates) for transition control
//! - Transitions and active-transition sets
//! - Bounded step history
//! - Engine error types

mod error;
mod history;
mod state;
mod transition;
mod trigger;

pub use error::AutomatonError;
pub use history::{StateHistory, StepRecord, DEFAULT_CAPACITY};
pub use state::{State, StateId};
pub use transition::{ActiveTransition, Transition, TransitionId, TransitionSet};
pub use trigger::Trigger;
