//! Callbacks which are invoked for every improving solution during optimisation.
use std::ops::ControlFlow;

use crate::basic_types::Solution;

/// Called with every solution which improves on the incumbent. Returning
/// [`ControlFlow::Break`] stops the optimisation with the solution found so far.
pub trait SolutionCallback {
    fn on_solution_callback(&mut self, solution: &Solution) -> ControlFlow<()>;
}

impl<T: FnMut(&Solution) -> ControlFlow<()>> SolutionCallback for T {
    fn on_solution_callback(&mut self, solution: &Solution) -> ControlFlow<()> {
        (self)(solution)
    }
}

impl<T: SolutionCallback> SolutionCallback for Option<T> {
    fn on_solution_callback(&mut self, solution: &Solution) -> ControlFlow<()> {
        if let Some(callback) = self {
            return callback.on_solution_callback(solution);
        }

        ControlFlow::Continue(())
    }
}
