//! Step history tracking.
//!
//! Every committed transition is recorded as a [`StepRecord`]. The history is
//! bounded: once it holds `capacity` records the oldest one is dropped.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed step.
///
/// # Example
///
/// ```rust
/// use automata_engine::core::{StateHistory, StepRecord};
/// use automata_engine::engine::Automaton;
/// use automata_engine::core::{State, Trigger};
///
/// let mut automaton = Automaton::new();
/// let idle = automaton.insert_state(State::new("Idle")).unwrap();
/// let ready = automaton.insert_state(State::new("Ready")).unwrap();
/// automaton.insert_transition(idle, ready, Trigger::always()).unwrap();
///
/// automaton.advance();
///
/// let record: &StepRecord = &automaton.history().records()[0];
/// assert_eq!(record.from, idle);
/// assert_eq!(record.to, ready);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// The state being left
    pub from: StateId,
    /// The state being entered
    pub to: StateId,
    /// When the step was committed
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered history of committed steps.
///
/// Deserializing keeps only the newest `capacity` records, the same ones
/// [`record`](Self::record) would have retained.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "StoredHistory")]
pub struct StateHistory {
    records: VecDeque<StepRecord>,
    capacity: usize,
}

#[derive(Deserialize)]
struct StoredHistory {
    records: VecDeque<StepRecord>,
    capacity: usize,
}

impl From<StoredHistory> for StateHistory {
    fn from(stored: StoredHistory) -> Self {
        let mut records = stored.records;
        let excess = records.len().saturating_sub(stored.capacity);
        records.drain(..excess);
        Self {
            records,
            capacity: stored.capacity,
        }
    }
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

/// Number of records kept when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 128;

impl StateHistory {
    /// Create an empty history holding at most `capacity` records.
    ///
    /// A capacity of zero disables recording.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: StepRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained record followed by the
    /// `to` state of every record.
    ///
    /// # Example
    ///
    /// ```rust
    /// use automata_engine::core::{State, Trigger};
    /// use automata_engine::engine::Automaton;
    ///
    /// let mut automaton = Automaton::new();
    /// let a = automaton.insert_state(State::new("A")).unwrap();
    /// let b = automaton.insert_state(State::new("B")).unwrap();
    /// let c = automaton.insert_state(State::new("C")).unwrap();
    /// automaton.insert_transition(a, b, Trigger::always()).unwrap();
    /// automaton.insert_transition(b, c, Trigger::always()).unwrap();
    ///
    /// automaton.advance();
    /// automaton.advance();
    ///
    /// assert_eq!(automaton.history().get_path(), vec![a, b, c]);
    /// ```
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|r| r.to));
        path
    }

    /// Time between the oldest and newest retained record.
    ///
    /// Returns `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn records(&self) -> &VecDeque<StepRecord> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: usize, to: usize) -> StepRecord {
        StepRecord {
            from: StateId::new(from),
            to: StateId::new(to),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::default();

        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn record_adds_step() {
        let mut history = StateHistory::default();
        history.record(step(0, 1));

        assert_eq!(history.len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::default();
        history.record(step(0, 1));
        history.record(step(1, 2));

        assert_eq!(
            history.get_path(),
            vec![StateId::new(0), StateId::new(1), StateId::new(2)]
        );
    }

    #[test]
    fn full_history_evicts_oldest() {
        let mut history = StateHistory::with_capacity(2);
        history.record(step(0, 1));
        history.record(step(1, 2));
        history.record(step(2, 3));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![StateId::new(1), StateId::new(2), StateId::new(3)]
        );
    }

    #[test]
    fn zero_capacity_disables_recording() {
        let mut history = StateHistory::with_capacity(0);
        history.record(step(0, 1));

        assert!(history.is_empty());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::default();
        let start = Utc::now();
        history.record(StepRecord {
            from: StateId::new(0),
            to: StateId::new(1),
            timestamp: start,
        });
        history.record(StepRecord {
            from: StateId::new(1),
            to: StateId::new(2),
            timestamp: start + chrono::Duration::milliseconds(10),
        });

        assert_eq!(history.duration(), Some(Duration::from_millis(10)));
    }

    #[test]
    fn single_step_has_duration_zero() {
        let mut history = StateHistory::default();
        history.record(step(0, 1));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn clear_empties_history() {
        let mut history = StateHistory::default();
        history.record(step(0, 1));
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::with_capacity(4);
        history.record(step(0, 1));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.records(), history.records());
        assert_eq!(deserialized.capacity(), 4);
    }

    #[test]
    fn deserializing_trims_records_beyond_capacity() {
        let mut full = StateHistory::with_capacity(8);
        for i in 0..5 {
            full.record(step(i, i + 1));
        }
        let mut json = serde_json::to_value(&full).unwrap();
        json["capacity"] = serde_json::json!(2);

        let trimmed: StateHistory = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(trimmed.len(), 2);
        assert_eq!(
            trimmed.get_path(),
            vec![StateId::new(3), StateId::new(4), StateId::new(5)]
        );

        json["capacity"] = serde_json::json!(0);
        let disabled: StateHistory = serde_json::from_value(json).unwrap();
        assert!(disabled.is_empty());
    }
}
