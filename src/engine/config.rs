//! Configuration for a new automaton.

use crate::core::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};

/// What to do when a state is inserted with a name or id that is already
/// registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// Refuse the insertion with an error; the state list is left unchanged.
    #[default]
    Reject,

    /// Append the state anyway and point the colliding key at it. The earlier
    /// state stays in the list but can no longer be looked up by that key.
    Shadow,
}

/// Settings applied when an [`Automaton`](super::Automaton) is created.
///
/// # Example
///
/// ```rust
/// use automata_engine::engine::{Automaton, AutomatonConfig, DuplicateKeyPolicy};
///
/// let config = AutomatonConfig::default()
///     .with_seed(42)
///     .with_duplicate_keys(DuplicateKeyPolicy::Shadow)
///     .with_history_capacity(16);
///
/// let automaton = Automaton::with_config(config);
/// assert_eq!(automaton.history().capacity(), 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    /// Seed for the selection PRNG; `None` seeds from the wall clock.
    pub seed: Option<u64>,

    pub duplicate_keys: DuplicateKeyPolicy,

    /// Maximum number of step records kept; zero disables the history.
    pub history_capacity: usize,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            seed: None,
            duplicate_keys: DuplicateKeyPolicy::default(),
            history_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl AutomatonConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}
