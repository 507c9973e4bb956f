//! Builder API for explicit automaton construction.
//!
//! States are added first and then connected by name, integer id or handle.
//! Edges can be added one at a time, chained with [`Path`], or fanned out
//! with [`Branch`].
//!
//! # Example
//!
//! ```rust
//! use automata_engine::builder::{AutomatonBuilder, Branch};
//!
//! let mut builder = AutomatonBuilder::new();
//! builder.add_state_with_id("Idle", 0).unwrap();
//! builder.add_state_with_id("Wait", 1).unwrap();
//! builder.add_state_with_id("Success", 2).unwrap();
//! builder.add_state_with_id("Failure", 3).unwrap();
//!
//! builder.connect("Idle", "Wait").unwrap();
//! builder
//!     .branch("Wait", Branch::new().to("Success").to("Failure"))
//!     .unwrap();
//! builder.connect(2, 0).unwrap();
//! builder.connect(3, 0).unwrap();
//!
//! let mut automaton = builder.build().unwrap();
//! automaton.seed(7);
//! assert!(automaton.advance());
//! assert!(automaton.advance());
//! assert!(matches!(automaton.current_state_id(), Some(2) | Some(3)));
//! ```

pub mod error;
pub mod machine;
pub mod path;

pub use error::BuildError;
pub use machine::AutomatonBuilder;
pub use path::{Branch, Path};

use crate::core::StateId;

/// Reference to a state by name, integer id or handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateRef {
    Name(String),
    Id(i32),
    Handle(StateId),
}

impl From<&str> for StateRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for StateRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<i32> for StateRef {
    fn from(id: i32) -> Self {
        Self::Id(id)
    }
}

impl From<StateId> for StateRef {
    fn from(handle: StateId) -> Self {
        Self::Handle(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_matching_variant() {
        assert_eq!(StateRef::from("Idle"), StateRef::Name("Idle".to_string()));
        assert_eq!(
            StateRef::from(String::from("Ready")),
            StateRef::Name("Ready".to_string())
        );
        assert_eq!(StateRef::from(3), StateRef::Id(3));
        assert_eq!(
            StateRef::from(StateId::new(1)),
            StateRef::Handle(StateId::new(1))
        );
    }
}
