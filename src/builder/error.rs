//! Build errors for the automaton builder.

use crate::core::AutomatonError;
use thiserror::Error;

/// Errors that can occur when building an automaton.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No states defined. Add at least one state before .build()")]
    NoStates,

    #[error("Branch has no arms. Call .to(state) on the branch at least once")]
    EmptyBranch,

    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}
