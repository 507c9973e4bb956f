//! Builder for constructing automata.

use crate::builder::error::BuildError;
use crate::builder::path::{Branch, Path};
use crate::builder::StateRef;
use crate::core::{AutomatonError, State, StateId, TransitionId, Trigger};
use crate::engine::{Automaton, AutomatonConfig};

/// Builder for populating an automaton with states and transitions.
///
/// States are registered first and can then be referred to by name, integer
/// id or [`StateId`] handle when adding edges. Name and id lookups fail
/// immediately with an error if the state does not exist.
pub struct AutomatonBuilder {
    automaton: Automaton,
    initial: Option<StateRef>,
}

impl AutomatonBuilder {
    /// Create a new builder using the default configuration.
    pub fn new() -> Self {
        Self::with_config(AutomatonConfig::default())
    }

    /// Create a new builder for an automaton configured by `config`.
    pub fn with_config(config: AutomatonConfig) -> Self {
        Self {
            automaton: Automaton::with_config(config),
            initial: None,
        }
    }

    /// Add a state identified by name only.
    pub fn add_state(&mut self, name: impl Into<String>) -> Result<StateId, BuildError> {
        Ok(self.automaton.insert_state(State::new(name))?)
    }

    /// Add a state identified by name and integer id.
    pub fn add_state_with_id(
        &mut self,
        name: impl Into<String>,
        id: i32,
    ) -> Result<StateId, BuildError> {
        Ok(self.automaton.insert_state(State::with_id(id, name))?)
    }

    /// Resolve a name, id or handle to a state handle.
    pub fn resolve(&self, state: impl Into<StateRef>) -> Result<StateId, BuildError> {
        let id = match state.into() {
            StateRef::Name(name) => self.automaton.state_by_name(&name)?,
            StateRef::Id(id) => self.automaton.state_by_id(id)?,
            StateRef::Handle(handle) => {
                self.automaton
                    .state(handle)
                    .ok_or(AutomatonError::UnknownState { index: handle })?;
                handle
            }
        };
        Ok(id)
    }

    /// Add a guarded transition between two resolved states.
    pub fn add_transition(
        &mut self,
        from: StateId,
        to: StateId,
        trigger: Trigger,
    ) -> Result<TransitionId, BuildError> {
        Ok(self.automaton.insert_transition(from, to, trigger)?)
    }

    /// Add an unconditional transition.
    pub fn connect(
        &mut self,
        from: impl Into<StateRef>,
        to: impl Into<StateRef>,
    ) -> Result<TransitionId, BuildError> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        self.add_transition(from, to, Trigger::always())
    }

    /// Add a transition guarded by `condition`.
    pub fn connect_when<F>(
        &mut self,
        from: impl Into<StateRef>,
        to: impl Into<StateRef>,
        condition: F,
    ) -> Result<TransitionId, BuildError>
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        self.add_transition(from, to, Trigger::new(condition))
    }

    /// Start a chain of edges at `from`.
    pub fn path(&mut self, from: impl Into<StateRef>) -> Result<Path<'_>, BuildError> {
        let from = self.resolve(from)?;
        Ok(Path::new(self, from))
    }

    /// Fan out from `from` to every arm of `branch`.
    pub fn branch(
        &mut self,
        from: impl Into<StateRef>,
        branch: Branch,
    ) -> Result<Vec<TransitionId>, BuildError> {
        self.path(from)?.branch(branch)
    }

    /// Set the starting state (defaults to the first state added).
    pub fn initial(&mut self, state: impl Into<StateRef>) -> &mut Self {
        self.initial = Some(state.into());
        self
    }

    /// Build the automaton.
    /// Returns an error if no state was added or the initial state is unknown.
    pub fn build(self) -> Result<Automaton, BuildError> {
        if self.automaton.state_count() == 0 {
            return Err(BuildError::NoStates);
        }

        let initial = match self.initial.clone() {
            Some(state) => Some(self.resolve(state)?),
            None => None,
        };

        let mut automaton = self.automaton;
        if let Some(initial) = initial {
            automaton.set_initial(initial)?;
            automaton.reset();
        }

        tracing::debug!(
            "built automaton with {} states and {} transitions",
            automaton.state_count(),
            automaton.transition_count()
        );
        Ok(automaton)
    }
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DuplicateKeyPolicy;

    #[test]
    fn builder_requires_states() {
        let result = AutomatonBuilder::new().build();

        assert!(matches!(result, Err(BuildError::NoStates)));
    }

    #[test]
    fn states_resolve_by_name_id_and_handle() {
        let mut builder = AutomatonBuilder::new();
        builder.add_state("Idle").unwrap();
        let ready = builder.add_state_with_id("Ready", 1).unwrap();

        assert_eq!(builder.resolve("Ready"), Ok(ready));
        assert_eq!(builder.resolve(1), Ok(ready));
        assert_eq!(builder.resolve(ready), Ok(ready));
    }

    #[test]
    fn unknown_references_fail_immediately() {
        let mut builder = AutomatonBuilder::new();
        builder.add_state("Idle").unwrap();

        assert_eq!(
            builder.connect("Idle", "Ready"),
            Err(BuildError::Automaton(AutomatonError::UnknownStateName {
                name: "Ready".to_string()
            }))
        );
        assert_eq!(
            builder.connect(9, "Idle"),
            Err(BuildError::Automaton(AutomatonError::UnknownStateId {
                id: 9
            }))
        );
        assert_eq!(
            builder.resolve(StateId::new(4)),
            Err(BuildError::Automaton(AutomatonError::UnknownState {
                index: StateId::new(4)
            }))
        );
    }

    #[test]
    fn duplicate_names_are_rejected_by_default() {
        let mut builder = AutomatonBuilder::new();
        builder.add_state("Idle").unwrap();

        assert!(matches!(
            builder.add_state("Idle"),
            Err(BuildError::Automaton(
                AutomatonError::DuplicateStateName { .. }
            ))
        ));
    }

    #[test]
    fn shadow_policy_is_forwarded_to_automaton() {
        let config = AutomatonConfig::default().with_duplicate_keys(DuplicateKeyPolicy::Shadow);
        let mut builder = AutomatonBuilder::with_config(config);
        builder.add_state("Idle").unwrap();
        let second = builder.add_state("Idle").unwrap();

        assert_eq!(builder.resolve("Idle"), Ok(second));
    }

    #[test]
    fn connect_when_guards_edge() {
        let mut builder = AutomatonBuilder::new();
        builder.add_state("A").unwrap();
        builder.add_state("B").unwrap();
        builder.add_state("C").unwrap();
        builder.connect_when("A", "B", || false).unwrap();
        builder.connect("A", "C").unwrap();

        let mut automaton = builder.build().unwrap();
        assert!(automaton.advance());
        assert_eq!(automaton.current_state_name(), Some("C"));
    }

    #[test]
    fn initial_state_is_applied_on_build() {
        let mut builder = AutomatonBuilder::new();
        builder.add_state("A").unwrap();
        builder.add_state_with_id("B", 5).unwrap();
        builder.initial(5);

        let automaton = builder.build().unwrap();
        assert_eq!(automaton.current_state_name(), Some("B"));
        assert_eq!(automaton.initial(), automaton.current());
        assert!(automaton.history().is_empty());
    }

    #[test]
    fn unknown_initial_state_fails_build() {
        let mut builder = AutomatonBuilder::new();
        builder.add_state("A").unwrap();
        builder.initial("Z");

        assert!(matches!(
            builder.build(),
            Err(BuildError::Automaton(AutomatonError::UnknownStateName { .. }))
        ));
    }

    #[test]
    fn branch_shortcut_inserts_all_arms() {
        let mut builder = AutomatonBuilder::new();
        builder.add_state("Hub").unwrap();
        builder.add_state("Left").unwrap();
        builder.add_state("Right").unwrap();

        let ids = builder
            .branch("Hub", Branch::new().to("Left").to("Right"))
            .unwrap();

        assert_eq!(ids.len(), 2);
        assert_eq!(builder.build().unwrap().transition_count(), 2);
    }
}
