//! Contains structures related to optimisation.
//!
//! Optimisation is branch-and-bound over the search loop: once a solution is found the
//! [`ObjectiveManager`] records its objective value as the incumbent and, from then on, imposes
//! the cut `objective < best` (or `objective > best`) at every node. An [`ObjectiveStrategy`]
//! additionally makes the search branch on the objective before anything else, see
//! [`ObjectiveBrancher`].
mod objective_brancher;
mod objective_manager;
pub mod solution_callback;

pub use objective_brancher::ObjectiveBrancher;
pub(crate) use objective_manager::ObjectiveManager;

/// The direction of the optimisation, either maximising or minimising.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimisationDirection {
    Maximise,
    Minimise,
}

/// How the objective variable itself is branched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ObjectiveStrategy {
    /// Tries the best value of the objective domain first; every refutation moves the objective
    /// one value towards the worst bound. The first solution found after a restart is optimal.
    BottomUp,
    /// Tries the worst value of the objective domain first, improving on it one solution at a
    /// time.
    TopDown,
    /// Bisects the objective domain, trying the better half first.
    Dichotomic,
}

impl ObjectiveStrategy {
    /// Whether the strategy relies on restarting after every new incumbent.
    pub(crate) fn restarts_on_new_bound(self) -> bool {
        matches!(self, ObjectiveStrategy::BottomUp | ObjectiveStrategy::Dichotomic)
    }
}
