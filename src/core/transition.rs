//! Transitions and active-transition sets.

use crate::core::error::AutomatonError;
use crate::core::state::StateId;
use crate::core::trigger::Trigger;
use crate::engine::Automaton;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Stable handle to a transition stored in an automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionId(usize);

impl TransitionId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A one-way guarded edge towards a target state.
///
/// The source state is not stored here: the automaton keys its edge table by
/// source. Transitions are never mutated once inserted.
#[derive(Clone, Debug)]
pub struct Transition {
    target: StateId,
    trigger: Trigger,
}

impl Transition {
    pub(crate) fn new(target: StateId, trigger: Trigger) -> Self {
        Self { target, trigger }
    }

    /// Test the guard condition.
    pub fn test(&self) -> bool {
        self.trigger.test()
    }

    /// Move `automaton` to this transition's target.
    ///
    /// The guard is not re-checked; callers decide eligibility beforehand.
    /// Fails without moving when the target is not a state of `automaton`,
    /// e.g. for a transition cloned from a larger automaton.
    pub fn perform(&self, automaton: &mut Automaton) -> Result<(), AutomatonError> {
        automaton.set_state(self.target)
    }

    pub fn target(&self) -> StateId {
        self.target
    }

    /// Name of the target state as registered in `automaton`.
    pub fn target_name<'a>(&self, automaton: &'a Automaton) -> &'a str {
        automaton
            .state(self.target)
            .map(|state| state.name())
            .unwrap_or_default()
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }
}

/// One entry of a [`TransitionSet`]: a transition whose guard tested true.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActiveTransition {
    pub transition: TransitionId,
    pub target: StateId,
}

/// Transitions that are active and selectable at one point in time.
///
/// Entries are unique by [`TransitionId`] and iterate in the order the edges
/// were registered on the automaton, which keeps seeded random selection
/// reproducible. A set is a snapshot; it does not follow later changes to the
/// guards' external state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionSet {
    entries: Vec<ActiveTransition>,
}

impl TransitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; returns `false` if the transition was already present.
    pub fn insert(&mut self, entry: ActiveTransition) -> bool {
        if self.contains(entry.transition) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Append an entry already known to be absent.
    pub(crate) fn push(&mut self, entry: ActiveTransition) {
        self.entries.push(entry);
    }

    pub fn contains(&self, transition: TransitionId) -> bool {
        self.entries.iter().any(|e| e.transition == transition)
    }

    /// An element of the set, meaningful when the set holds exactly one.
    pub fn first(&self) -> Option<&ActiveTransition> {
        self.entries.first()
    }

    /// The candidate leading to `target`, if any.
    pub fn by_target(&self, target: StateId) -> Option<TransitionId> {
        self.entries
            .iter()
            .find(|e| e.target == target)
            .map(|e| e.transition)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActiveTransition> {
        self.entries.iter()
    }

    /// Target indices of all entries.
    pub fn targets(&self) -> Vec<StateId> {
        self.entries.iter().map(|e| e.target).collect()
    }
}

impl Index<usize> for TransitionSet {
    type Output = ActiveTransition;

    fn index(&self, position: usize) -> &Self::Output {
        &self.entries[position]
    }
}

impl<'a> IntoIterator for &'a TransitionSet {
    type Item = &'a ActiveTransition;
    type IntoIter = std::slice::Iter<'a, ActiveTransition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
