pub mod solution_iterator;

use crate::basic_types::Solution;
#[cfg(doc)]
use crate::termination::TerminationCondition;
#[cfg(doc)]
use crate::Solver;

/// The result of a call to [`Solver::satisfy`].
#[derive(Debug, Clone)]
pub enum SatisfactionResult {
    /// Indicates that a solution was found.
    Satisfiable(Solution),
    /// Indicates that there is no solution to the satisfaction problem.
    Unsatisfiable,
    /// Indicates that it is not known whether a solution exists. This is likely due to a
    /// [`TerminationCondition`] triggering.
    Unknown,
}

/// The result of a call to [`Solver::optimise`], [`Solver::minimise`] or [`Solver::maximise`].
#[derive(Debug, Clone)]
pub enum OptimisationResult {
    /// Indicates that an optimal solution has been found and proven to be optimal.
    Optimal(Solution),
    /// Indicates that a solution was found, but the search stopped before it was proven optimal.
    /// It contains the best solution known to the solver.
    Satisfiable(Solution),
    /// Indicates that there is no solution to the problem.
    Unsatisfiable,
    /// Indicates that it is not known whether a solution exists. This is likely due to a
    /// [`TerminationCondition`] triggering.
    Unknown,
}
