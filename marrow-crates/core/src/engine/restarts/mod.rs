//! Restart policies decide when the search abandons the current tree and starts again from the
//! root world.
//!
//! The [`Restarter`] compares a counter of the search (see [`RestartCriterion`]) against a
//! cumulative cutoff produced by a [`CutoffSequence`](crate::basic_types::sequence_generators::CutoffSequence).
//! [`ForceRestartBeforeCut`] wraps another policy and restarts as soon as a new incumbent was
//! recorded.
mod force_restart_before_cut;
mod no_restarts;
mod restart_options;
mod restarter;

use std::fmt::Debug;

pub use force_restart_before_cut::ForceRestartBeforeCut;
pub use no_restarts::NoRestarts;
pub use restart_options::RestartCriterion;
pub use restart_options::RestartOptions;
pub use restarter::Restarter;

/// The counters of the search which restart policies are based on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchProgress {
    pub fails: u64,
    pub nodes: u64,
    pub backtracks: u64,
}

impl SearchProgress {
    pub(crate) fn count(&self, criterion: RestartCriterion) -> u64 {
        match criterion {
            RestartCriterion::Fails => self.fails,
            RestartCriterion::Nodes => self.nodes,
            RestartCriterion::Backtracks => self.backtracks,
        }
    }
}

/// Decides when the search restarts.
pub trait RestartPolicy: Debug {
    /// Polled before every decision.
    fn should_restart(&mut self, progress: &SearchProgress) -> bool;

    /// Called after the solver restarted.
    fn on_restart(&mut self, progress: &SearchProgress);

    /// Called after a solution was found.
    fn on_solution(&mut self, _progress: &SearchProgress) {}

    /// Called when the objective manager records a new incumbent bound.
    fn on_new_bound(&mut self) {}

    fn num_restarts(&self) -> u64;
}

impl RestartPolicy for Box<dyn RestartPolicy> {
    fn should_restart(&mut self, progress: &SearchProgress) -> bool {
        (**self).should_restart(progress)
    }

    fn on_restart(&mut self, progress: &SearchProgress) {
        (**self).on_restart(progress)
    }

    fn on_solution(&mut self, progress: &SearchProgress) {
        (**self).on_solution(progress)
    }

    fn on_new_bound(&mut self) {
        (**self).on_new_bound()
    }

    fn num_restarts(&self) -> u64 {
        (**self).num_restarts()
    }
}
