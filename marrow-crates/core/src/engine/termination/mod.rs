//! A [`TerminationCondition`] is polled by the solver at every node boundary. It indicates that
//! the solver should stop, even though the search space was not exhausted. The most common
//! example is [`TimeBudget`], which gives the solver a fixed amount of time.
mod combinator;
mod fail_budget;
mod indefinite;
mod node_budget;
mod time_budget;

pub use combinator::Combinator;
pub use fail_budget::FailBudget;
pub use indefinite::Indefinite;
pub use node_budget::NodeBudget;
pub use time_budget::TimeBudget;

/// Decides when the solver gives up searching. Propagation is never interrupted; the condition
/// is only consulted before a decision is taken.
pub trait TerminationCondition {
    /// Returns `true` when the solver should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Called whenever the solver opens a node by taking a decision.
    fn decision_has_been_made(&mut self) {}

    /// Called whenever propagation fails.
    fn contradiction_has_occurred(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn decision_has_been_made(&mut self) {
        if let Some(t) = self {
            t.decision_has_been_made()
        }
    }

    fn contradiction_has_occurred(&mut self) {
        if let Some(t) = self {
            t.contradiction_has_occurred()
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for &mut T {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }

    fn decision_has_been_made(&mut self) {
        (**self).decision_has_been_made()
    }

    fn contradiction_has_occurred(&mut self) {
        (**self).contradiction_has_occurred()
    }
}
