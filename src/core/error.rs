//! Engine error types.

use crate::core::state::StateId;
use crate::core::transition::TransitionId;
use thiserror::Error;

/// Errors reported by the automaton engine.
///
/// A dead end (no active transition) is not an error; `advance` reports it by
/// returning `false`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("no state named '{name}' in automaton")]
    UnknownStateName { name: String },

    #[error("no state with id {id} in automaton")]
    UnknownStateId { id: i32 },

    #[error("state handle {index} is out of range")]
    UnknownState { index: StateId },

    #[error("a state named '{name}' is already registered")]
    DuplicateStateName { name: String },

    #[error("a state with id {id} is already registered")]
    DuplicateStateId { id: i32 },

    #[error("selector returned transition {transition} which is not an active candidate")]
    SelectionOutOfSet { transition: TransitionId },
}
