//! The automaton execution engine.

use crate::core::{
    ActiveTransition, AutomatonError, State, StateHistory, StateId, StepRecord, Transition,
    TransitionId, TransitionSet, Trigger,
};
use crate::engine::config::{AutomatonConfig, DuplicateKeyPolicy};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// A finite-state, possibly nondeterministic, automaton with guarded edges.
///
/// The automaton owns its states, transitions, lookup tables and the PRNG
/// used to break ties between simultaneously active transitions. It has no
/// scheduler: callers drive it by calling [`advance`](Self::advance) whenever
/// the external state read by the guards may have changed.
///
/// # Example
///
/// ```rust
/// use automata_engine::core::{State, Trigger};
/// use automata_engine::engine::Automaton;
///
/// let mut automaton = Automaton::new();
/// let idle = automaton.insert_state(State::with_id(0, "Idle")).unwrap();
/// let ready = automaton.insert_state(State::with_id(1, "Ready")).unwrap();
/// let done = automaton.insert_state(State::with_id(2, "Done")).unwrap();
/// automaton.insert_transition(idle, ready, Trigger::always()).unwrap();
/// automaton.insert_transition(ready, done, Trigger::always()).unwrap();
///
/// assert!(automaton.advance());
/// assert!(automaton.advance());
/// assert!(!automaton.advance());
/// assert_eq!(automaton.current_state_name(), Some("Done"));
/// assert_eq!(automaton.current_state_id(), Some(2));
/// ```
#[derive(Debug)]
pub struct Automaton {
    // Append-only: indices handed out as StateId stay valid.
    states: Vec<State>,
    names: HashMap<String, StateId>,
    ids: HashMap<i32, StateId>,

    transitions: Vec<Transition>,
    edges: HashMap<StateId, Vec<TransitionId>>,

    current: Option<StateId>,
    initial: Option<StateId>,

    rng: StdRng,
    duplicate_keys: DuplicateKeyPolicy,
    history: StateHistory,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    /// Create an empty automaton with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AutomatonConfig::default())
    }

    /// Create an empty automaton from `config`.
    pub fn with_config(config: AutomatonConfig) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        Self {
            states: Vec::new(),
            names: HashMap::new(),
            ids: HashMap::new(),
            transitions: Vec::new(),
            edges: HashMap::new(),
            current: None,
            initial: None,
            rng: StdRng::seed_from_u64(seed),
            duplicate_keys: config.duplicate_keys,
            history: StateHistory::with_capacity(config.history_capacity),
        }
    }

    /// Seed the selection PRNG.
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Seed the selection PRNG from the wall clock.
    pub fn reseed(&mut self) {
        self.seed(clock_seed());
    }

    /// Append a state and register its name and id.
    ///
    /// The first state inserted becomes both the current and the initial
    /// state. Key collisions are handled according to the configured
    /// [`DuplicateKeyPolicy`].
    pub fn insert_state(&mut self, state: State) -> Result<StateId, AutomatonError> {
        if self.duplicate_keys == DuplicateKeyPolicy::Reject {
            if self.names.contains_key(state.name()) {
                return Err(AutomatonError::DuplicateStateName {
                    name: state.name().to_string(),
                });
            }
            if let Some(id) = state.id().filter(|id| self.ids.contains_key(id)) {
                return Err(AutomatonError::DuplicateStateId { id });
            }
        }

        let index = StateId::new(self.states.len());

        if let Some(previous) = self.names.insert(state.name().to_string(), index) {
            tracing::warn!(
                "state name '{}' now refers to {} (was {})",
                state.name(),
                index,
                previous
            );
        }
        if let Some(id) = state.id() {
            if let Some(previous) = self.ids.insert(id, index) {
                tracing::warn!("state id {} now refers to {} (was {})", id, index, previous);
            }
        }

        tracing::debug!("inserted state {} at {}", state, index);
        self.states.push(state);

        if self.current.is_none() {
            self.current = Some(index);
            self.initial = Some(index);
        }

        Ok(index)
    }

    /// Register a guarded edge from `from` to `to`.
    ///
    /// Only one edge may exist per (from, to) pair. Inserting the same pair
    /// again keeps the first trigger and returns the existing handle.
    pub fn insert_transition(
        &mut self,
        from: StateId,
        to: StateId,
        trigger: Trigger,
    ) -> Result<TransitionId, AutomatonError> {
        self.check(from)?;
        self.check(to)?;

        if let Some(existing) = self.find_edge(from, to) {
            tracing::debug!(
                "edge {} -> {} already registered as {}, keeping first trigger",
                from,
                to,
                existing
            );
            return Ok(existing);
        }

        let id = TransitionId::new(self.transitions.len());
        self.transitions.push(Transition::new(to, trigger));
        self.edges.entry(from).or_default().push(id);

        tracing::debug!("inserted transition {}: {} -> {}", id, from, to);
        Ok(id)
    }

    /// Evaluate every guard leaving the current state and collect the ones
    /// that are true.
    ///
    /// Each guard is evaluated exactly once per call, in registration order.
    pub fn active_transitions(&self) -> TransitionSet {
        let mut active = TransitionSet::new();
        let Some(current) = self.current else {
            return active;
        };

        let candidates = self.edges.get(&current).map(Vec::as_slice).unwrap_or(&[]);
        for &id in candidates {
            let transition = &self.transitions[id.index()];
            // Edge lists hold unique ids, so no membership scan is needed.
            if transition.test() {
                active.push(ActiveTransition {
                    transition: id,
                    target: transition.target(),
                });
            }
        }

        tracing::trace!(
            "{} of {} guards active in {}",
            active.len(),
            candidates.len(),
            current
        );
        active
    }

    /// Take one step, choosing uniformly at random between several active
    /// transitions.
    ///
    /// Returns `true` if a transition was performed and `false` on a dead end.
    pub fn advance(&mut self) -> bool {
        // A uniform pick stays inside the set and owned transitions target
        // registered states, so the step only reports dead ends.
        self.step(|automaton, active| {
            let position = automaton.rng.random_range(0..active.len());
            active[position].transition
        })
        .unwrap_or(false)
    }

    /// Take one step, asking `selector` to choose when several transitions
    /// are active.
    ///
    /// The selector is not called when zero or one transition is active. A
    /// selection that is not part of the offered set is rejected and the
    /// automaton does not move.
    pub fn advance_with<F>(&mut self, selector: F) -> Result<bool, AutomatonError>
    where
        F: FnOnce(&TransitionSet) -> TransitionId,
    {
        self.step(|_, active| selector(active))
    }

    /// True when no transition out of the current state is active right now.
    pub fn is_dead_end(&self) -> bool {
        self.active_transitions().is_empty()
    }

    /// Return to the initial state and clear the history.
    pub fn reset(&mut self) {
        if let Some(initial) = self.initial {
            self.enter(initial);
        }
        self.history.clear();
    }

    /// Choose the state [`reset`](Self::reset) returns to.
    pub fn set_initial(&mut self, state: StateId) -> Result<(), AutomatonError> {
        self.check(state)?;
        self.initial = Some(state);
        Ok(())
    }

    pub fn initial(&self) -> Option<StateId> {
        self.initial
    }

    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    pub fn current_state(&self) -> Option<&State> {
        self.current.and_then(|id| self.state(id))
    }

    /// Name of the current state, `None` while the automaton has no states.
    pub fn current_state_name(&self) -> Option<&str> {
        self.current_state().map(State::name)
    }

    /// Id of the current state, `None` if it has no id or there are no states.
    pub fn current_state_id(&self) -> Option<i32> {
        self.current_state().and_then(State::id)
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    /// All states, paired with their handles, in insertion order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(index, state)| (StateId::new(index), state))
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Resolve a state by name.
    pub fn state_by_name(&self, name: &str) -> Result<StateId, AutomatonError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| AutomatonError::UnknownStateName {
                name: name.to_string(),
            })
    }

    /// Resolve a state by integer id.
    pub fn state_by_id(&self, id: i32) -> Result<StateId, AutomatonError> {
        self.ids
            .get(&id)
            .copied()
            .ok_or(AutomatonError::UnknownStateId { id })
    }

    pub fn transition(&self, id: TransitionId) -> Option<&Transition> {
        self.transitions.get(id.index())
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Transitions leaving `from`, in registration order.
    pub fn outgoing(&self, from: StateId) -> impl Iterator<Item = (TransitionId, &Transition)> {
        self.edges
            .get(&from)
            .into_iter()
            .flatten()
            .map(move |&id| (id, &self.transitions[id.index()]))
    }

    /// Number of edges registered from `from` to `to` (zero or one).
    pub fn edge_count(&self, from: StateId, to: StateId) -> usize {
        self.outgoing(from)
            .filter(|(_, transition)| transition.target() == to)
            .count()
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Move to `target`, refusing handles that are not states of this
    /// automaton.
    pub(crate) fn set_state(&mut self, target: StateId) -> Result<(), AutomatonError> {
        self.check(target)?;
        self.enter(target);
        Ok(())
    }

    /// Evaluate the guards once and commit at most one transition.
    ///
    /// `choose` is consulted only when several transitions are active; its
    /// pick must belong to the offered set.
    fn step<F>(&mut self, choose: F) -> Result<bool, AutomatonError>
    where
        F: FnOnce(&mut Self, &TransitionSet) -> TransitionId,
    {
        let active = self.active_transitions();
        let chosen = match active.len() {
            0 => {
                self.log_dead_end();
                return Ok(false);
            }
            1 => active[0].transition,
            _ => choose(self, &active),
        };

        if !active.contains(chosen) {
            return Err(AutomatonError::SelectionOutOfSet { transition: chosen });
        }
        self.commit(chosen)?;
        Ok(true)
    }

    fn commit(&mut self, id: TransitionId) -> Result<(), AutomatonError> {
        let transition = self.transitions[id.index()].clone();
        let from = self.current;
        transition.perform(self)?;

        if let Some(from) = from {
            tracing::debug!(
                "advanced {} -> {} via {}",
                self.describe(from),
                self.describe(transition.target()),
                id
            );
        }
        Ok(())
    }

    // Sole writer of `current`; callers have validated `target`.
    fn enter(&mut self, target: StateId) {
        if let Some(from) = self.current {
            self.history.record(StepRecord {
                from,
                to: target,
                timestamp: Utc::now(),
            });
        }
        self.current = Some(target);
    }

    fn find_edge(&self, from: StateId, to: StateId) -> Option<TransitionId> {
        self.outgoing(from)
            .find(|(_, transition)| transition.target() == to)
            .map(|(id, _)| id)
    }

    fn check(&self, state: StateId) -> Result<(), AutomatonError> {
        if state.index() < self.states.len() {
            Ok(())
        } else {
            Err(AutomatonError::UnknownState { index: state })
        }
    }

    fn describe(&self, id: StateId) -> String {
        self.state(id)
            .map(ToString::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    fn log_dead_end(&self) {
        if let Some(current) = self.current {
            tracing::trace!("no active transition from {}", self.describe(current));
        }
    }
}

fn clock_seed() -> u64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
}
