use std::fmt::Debug;

use crate::basic_types::Contradiction;
use crate::basic_types::Solution;

/// Receives the events of the search loop. Monitors observe the search; they cannot influence
/// it.
pub trait SearchMonitor: Debug {
    /// Called for every solution, after the brancher was notified.
    fn on_solution(&mut self, _solution: &Solution) {}

    /// Called after the solver restarted from the root.
    fn on_restart(&mut self) {}

    /// Called whenever propagation, or the application of a decision, fails.
    fn on_contradiction(&mut self, _contradiction: &Contradiction) {}
}
