//! Contains the structures corresponding to solution iterations.
use crate::basic_types::CSPSolverExecutionFlag;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::engine::ConstraintSatisfactionSolver;
use crate::termination::TerminationCondition;
#[cfg(doc)]
use crate::Solver;

/// A struct which allows the retrieval of multiple solutions to a satisfaction problem.
///
/// Solutions are enumerated by continuing the depth-first search after every solution, so every
/// solution is reported exactly once. Restarts are suppressed while the iterator exists. Once it
/// is dropped, the [`Solver`] is reset to the root.
#[derive(Debug)]
pub struct SolutionIterator<'solver, 'brancher, 'termination, B: Brancher, T> {
    solver: &'solver mut ConstraintSatisfactionSolver,
    brancher: &'brancher mut B,
    termination: &'termination mut T,
    has_solution: bool,
    finished: bool,
}

impl<'solver, 'brancher, 'termination, B: Brancher, T: TerminationCondition>
    SolutionIterator<'solver, 'brancher, 'termination, B, T>
{
    pub(crate) fn new(
        solver: &'solver mut ConstraintSatisfactionSolver,
        brancher: &'brancher mut B,
        termination: &'termination mut T,
    ) -> Self {
        solver.restore_state_at_root(brancher);
        solver.set_restarts_allowed(false);
        SolutionIterator {
            solver,
            brancher,
            termination,
            has_solution: false,
            finished: false,
        }
    }

    /// Finds the next solution. Also calls [`Brancher::on_solution`] on the brancher of the
    /// iterator.
    pub fn next_solution(&mut self) -> IteratedSolution {
        if self.finished {
            return IteratedSolution::Finished;
        }

        match self.solver.solve(self.termination, self.brancher) {
            CSPSolverExecutionFlag::Feasible => {
                self.has_solution = true;
                IteratedSolution::Solution(self.solver.solution())
            }
            CSPSolverExecutionFlag::Infeasible if !self.has_solution => {
                self.finished = true;
                IteratedSolution::Unsatisfiable
            }
            CSPSolverExecutionFlag::Infeasible => {
                self.finished = true;
                IteratedSolution::Finished
            }
            CSPSolverExecutionFlag::Timeout => IteratedSolution::Unknown,
        }
    }
}

impl<B: Brancher, T> Drop for SolutionIterator<'_, '_, '_, B, T> {
    fn drop(&mut self) {
        self.solver.set_restarts_allowed(true);
        self.solver.restore_state_at_root(self.brancher);
    }
}

/// Enum which specifies the status of the call to [`SolutionIterator::next_solution`].
#[derive(Debug)]
pub enum IteratedSolution {
    /// A new solution was identified.
    Solution(Solution),
    /// No more solutions exist.
    Finished,
    /// The solver was terminated during search.
    Unknown,
    /// There exists no solution
    Unsatisfiable,
}
