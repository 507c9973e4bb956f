//! States of an automaton.
//!
//! A state is plain data: a display name and an optional integer id. The
//! automaton refers to states by their position in its state list, exposed as
//! a [`StateId`] handle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a state inside an automaton.
///
/// The handle is the state's index in the automaton's append-only state list,
/// so it stays valid for the lifetime of the automaton that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(usize);

impl StateId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the state in the automaton's state list.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable record describing one node of the automaton.
///
/// # Example
///
/// ```rust
/// use automata_engine::core::State;
///
/// let idle = State::with_id(0, "Idle");
/// assert_eq!(idle.name(), "Idle");
/// assert_eq!(idle.id(), Some(0));
///
/// let anonymous = State::new("Waiting");
/// assert_eq!(anonymous.id(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    id: Option<i32>,
    name: String,
}

impl State {
    /// Create a state identified by name only.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Create a state identified by both an integer id and a name.
    pub fn with_id(id: i32, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}#{}", self.name, id),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_exposes_name_and_id() {
        let state = State::with_id(3, "T1 Wait");

        assert_eq!(state.name(), "T1 Wait");
        assert_eq!(state.id(), Some(3));
    }

    #[test]
    fn state_without_id_has_none() {
        let state = State::new("Idle");

        assert_eq!(state.name(), "Idle");
        assert_eq!(state.id(), None);
    }

    #[test]
    fn display_includes_id_when_present() {
        assert_eq!(State::new("Idle").to_string(), "Idle");
        assert_eq!(State::with_id(1, "Ready").to_string(), "Ready#1");
    }

    #[test]
    fn state_serializes_correctly() {
        let state = State::with_id(2, "Done");
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: State = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn state_id_serializes_as_bare_index() {
        let json = serde_json::to_string(&StateId::new(4)).unwrap();

        assert_eq!(json, "4");
        assert_eq!(StateId::new(4).index(), 4);
    }

    #[test]
    fn state_ids_order_by_index() {
        assert!(StateId::new(1) < StateId::new(2));
        assert_eq!(StateId::new(7), StateId::new(7));
    }
}
