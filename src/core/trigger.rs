//! Guard conditions for transitions.
//!
//! A trigger is the activation condition of a transition. Despite the name it
//! never fires anything on its own: the automaton evaluates it on demand when
//! looking for active transitions.

use std::fmt;
use std::sync::Arc;

type Condition = Arc<dyn Fn() -> bool + Send + Sync>;

/// Deferred boolean predicate guarding a transition.
///
/// The wrapped condition takes no arguments; it usually closes over some
/// external state (a flag, a counter, a sensor reading). Triggers are never
/// cached, so every evaluation calls the condition again.
///
/// # Example
///
/// ```rust
/// use automata_engine::core::Trigger;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let ready = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&ready);
/// let trigger = Trigger::new(move || flag.load(Ordering::SeqCst));
///
/// assert!(!trigger.test());
/// ready.store(true, Ordering::SeqCst);
/// assert!(trigger.test());
///
/// // Unconditional transitions use the default trigger.
/// assert!(Trigger::default().test());
/// ```
#[derive(Clone)]
pub struct Trigger {
    condition: Condition,
}

impl Trigger {
    /// Create a trigger from a zero-argument predicate.
    pub fn new<F>(condition: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            condition: Arc::new(condition),
        }
    }

    /// A trigger that always evaluates to `true`.
    pub fn always() -> Self {
        Self::new(|| true)
    }

    /// Replace the wrapped condition.
    pub fn set_condition<F>(&mut self, condition: F)
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.condition = Arc::new(condition);
    }

    /// Evaluate the condition.
    ///
    /// A panic inside the predicate is not caught here.
    pub fn test(&self) -> bool {
        (self.condition)()
    }

    /// Combine two triggers; the result is true only when both are.
    ///
    /// `self` is evaluated first and `other` is skipped when it is false.
    pub fn and(self, other: Trigger) -> Self {
        Self::new(move || self.test() && other.test())
    }
}

impl Default for Trigger {
    fn default() -> Self {
        Self::always()
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger").finish_non_exhaustive()
    }
}
