use std::fmt::Debug;

use crate::basic_types::Solution;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;

/// A branching strategy, oftentimes composed of a [`VariableSelector`] and a [`ValueSelector`].
///
/// The decision returned by [`Brancher::next_decision`] must shrink the domain of the variable it
/// concerns, and so must its negation. If that is not the case the behaviour of the solver is
/// undefined.
pub trait Brancher: Debug {
    /// Returns the next decision, or [`None`] if every variable under consideration is fixed.
    ///
    /// The brancher does not apply the decision itself; the [`SelectionContext`] is only mutable
    /// to give access to the random generator.
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision>;

    /// Called whenever propagation failed.
    fn on_conflict(&mut self) {}

    /// Called after the solver backtracked.
    fn on_backtrack(&mut self) {}

    /// Called when a solution is found.
    fn on_solution(&mut self, _solution: &Solution) {}

    /// Called whenever a restart is performed.
    fn on_restart(&mut self) {}
}

impl Brancher for Box<dyn Brancher> {
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision> {
        (**self).next_decision(context)
    }

    fn on_conflict(&mut self) {
        (**self).on_conflict()
    }

    fn on_backtrack(&mut self) {
        (**self).on_backtrack()
    }

    fn on_solution(&mut self, solution: &Solution) {
        (**self).on_solution(solution)
    }

    fn on_restart(&mut self) {
        (**self).on_restart()
    }
}

impl<B: Brancher + ?Sized> Brancher for &mut B {
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision> {
        (**self).next_decision(context)
    }

    fn on_conflict(&mut self) {
        (**self).on_conflict()
    }

    fn on_backtrack(&mut self) {
        (**self).on_backtrack()
    }

    fn on_solution(&mut self, solution: &Solution) {
        (**self).on_solution(solution)
    }

    fn on_restart(&mut self) {
        (**self).on_restart()
    }
}
