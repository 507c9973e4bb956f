//! Fluent edge chains and fan-out branches.

use crate::builder::error::BuildError;
use crate::builder::machine::AutomatonBuilder;
use crate::builder::StateRef;
use crate::core::{StateId, TransitionId, Trigger};

/// A cursor walking through the automaton while inserting edges.
///
/// Created by [`AutomatonBuilder::path`]. Each [`to`](Self::to) inserts an
/// edge from the cursor to the given state and moves the cursor there. A guard
/// set with [`when`](Self::when) applies to the next edge only.
///
/// # Example
///
/// ```rust
/// use automata_engine::builder::AutomatonBuilder;
///
/// let mut builder = AutomatonBuilder::new();
/// builder.add_state_with_id("Idle", 0).unwrap();
/// builder.add_state_with_id("Ready", 1).unwrap();
/// builder.add_state_with_id("Wait", 2).unwrap();
///
/// builder
///     .path("Idle")
///     .unwrap()
///     .when(|| true)
///     .to("Ready")
///     .unwrap()
///     .to(2)
///     .unwrap();
///
/// let mut automaton = builder.build().unwrap();
/// assert!(automaton.advance());
/// assert!(automaton.advance());
/// assert_eq!(automaton.current_state_name(), Some("Wait"));
/// ```
pub struct Path<'a> {
    builder: &'a mut AutomatonBuilder,
    cursor: StateId,
    pending: Option<Trigger>,
}

impl<'a> Path<'a> {
    pub(crate) fn new(builder: &'a mut AutomatonBuilder, cursor: StateId) -> Self {
        Self {
            builder,
            cursor,
            pending: None,
        }
    }

    /// Guard the next edge with `condition`.
    pub fn when<F>(self, condition: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.guard(Trigger::new(condition))
    }

    /// Guard the next edge with an existing trigger.
    pub fn guard(mut self, trigger: Trigger) -> Self {
        self.pending = Some(trigger);
        self
    }

    /// Insert an edge from the cursor to `state` and move the cursor there.
    pub fn to(mut self, state: impl Into<StateRef>) -> Result<Self, BuildError> {
        let target = self.builder.resolve(state)?;
        let trigger = self.pending.take().unwrap_or_default();
        self.builder.add_transition(self.cursor, target, trigger)?;
        self.cursor = target;
        Ok(self)
    }

    /// Fan out from the cursor to every arm of `branch`.
    ///
    /// A pending guard is combined with each arm's own trigger, so an arm is
    /// active only when both hold.
    pub fn branch(self, branch: Branch) -> Result<Vec<TransitionId>, BuildError> {
        if branch.arms.is_empty() {
            return Err(BuildError::EmptyBranch);
        }

        let mut inserted = Vec::with_capacity(branch.arms.len());
        for (state, trigger) in branch.arms {
            let target = self.builder.resolve(state)?;
            let trigger = match &self.pending {
                Some(shared) => trigger.and(shared.clone()),
                None => trigger,
            };
            inserted.push(self.builder.add_transition(self.cursor, target, trigger)?);
        }
        Ok(inserted)
    }

    /// The state the next edge will start from.
    pub fn cursor(&self) -> StateId {
        self.cursor
    }
}

/// A set of alternative targets, each with its own trigger.
///
/// # Example
///
/// ```rust
/// use automata_engine::builder::Branch;
///
/// let branch = Branch::new()
///     .to("Success")
///     .to_when("Failure", || false);
/// assert_eq!(branch.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Branch {
    arms: Vec<(StateRef, Trigger)>,
}

impl Branch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unconditional arm.
    pub fn to(self, state: impl Into<StateRef>) -> Self {
        self.arm(state, Trigger::always())
    }

    /// Add an arm guarded by `condition`.
    pub fn to_when<F>(self, state: impl Into<StateRef>, condition: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.arm(state, Trigger::new(condition))
    }

    /// Add an arm guarded by an existing trigger.
    pub fn arm(mut self, state: impl Into<StateRef>, trigger: Trigger) -> Self {
        self.arms.push((state.into(), trigger));
        self
    }

    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AutomatonError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn builder_with(names: &[&str]) -> AutomatonBuilder {
        let mut builder = AutomatonBuilder::new();
        for name in names {
            builder.add_state(*name).unwrap();
        }
        builder
    }

    #[test]
    fn path_chains_unconditional_edges() {
        let mut builder = builder_with(&["A", "B", "C"]);
        let end = builder.path("A").unwrap().to("B").unwrap().to("C").unwrap();
        assert_eq!(end.cursor().index(), 2);

        let mut automaton = builder.build().unwrap();
        assert!(automaton.advance());
        assert!(automaton.advance());
        assert!(!automaton.advance());
        assert_eq!(automaton.current_state_name(), Some("C"));
    }

    #[test]
    fn when_guards_only_the_next_edge() {
        let mut builder = builder_with(&["A", "B", "C"]);
        builder
            .path("A")
            .unwrap()
            .when(|| false)
            .to("B")
            .unwrap()
            .to("C")
            .unwrap();

        let mut automaton = builder.build().unwrap();
        let a = automaton.state_by_name("A").unwrap();
        let b = automaton.state_by_name("B").unwrap();
        let c = automaton.state_by_name("C").unwrap();

        let guards: Vec<bool> = automaton
            .outgoing(a)
            .chain(automaton.outgoing(b))
            .map(|(_, t)| t.test())
            .collect();
        assert_eq!(guards, vec![false, true]);
        assert_eq!(automaton.edge_count(b, c), 1);
        assert!(!automaton.advance());
    }

    #[test]
    fn branch_fans_out_to_every_arm() {
        let mut builder = builder_with(&["Wait", "Success", "Failure"]);
        let ids = builder
            .path("Wait")
            .unwrap()
            .branch(Branch::new().to("Success").to("Failure"))
            .unwrap();
        assert_eq!(ids.len(), 2);

        let automaton = builder.build().unwrap();
        assert_eq!(automaton.active_transitions().len(), 2);
    }

    #[test]
    fn pending_guard_is_combined_with_each_arm() {
        let gate = Arc::new(AtomicBool::new(false));
        let seen = Arc::clone(&gate);

        let mut builder = builder_with(&["Wait", "Success", "Failure"]);
        builder
            .path("Wait")
            .unwrap()
            .when(move || seen.load(Ordering::SeqCst))
            .branch(Branch::new().to("Success").to_when("Failure", || false))
            .unwrap();

        let mut automaton = builder.build().unwrap();
        assert!(automaton.active_transitions().is_empty());

        gate.store(true, Ordering::SeqCst);
        assert!(automaton.advance());
        assert_eq!(automaton.current_state_name(), Some("Success"));
    }

    #[test]
    fn empty_branch_is_rejected() {
        let mut builder = builder_with(&["A"]);
        let result = builder.path("A").unwrap().branch(Branch::new());

        assert_eq!(result, Err(BuildError::EmptyBranch));
    }

    #[test]
    fn unknown_target_reports_lookup_failure() {
        let mut builder = builder_with(&["A"]);
        let result = builder.path("A").unwrap().to("Nowhere");

        assert!(matches!(
            result,
            Err(BuildError::Automaton(AutomatonError::UnknownStateName { .. }))
        ));
    }

    #[test]
    fn branch_reports_its_size() {
        let branch = Branch::new().to(1).to_when("Two", || true);

        assert_eq!(branch.len(), 2);
        assert!(!branch.is_empty());
        assert!(Branch::new().is_empty());
    }
}
