/// How a call to the search loop ended.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub enum CSPSolverExecutionFlag {
    Feasible,
    /// The search space was exhausted without a (further) solution.
    Infeasible,
    Timeout,
}
