use std::ops::ControlFlow;

use super::outputs::solution_iterator::SolutionIterator;
use super::outputs::OptimisationResult;
use super::outputs::SatisfactionResult;
use crate::basic_types::CSPSolverExecutionFlag;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Solution;
use crate::branching::branchers::GraphBrancher;
use crate::branching::branchers::IndependentVariableValueBrancher;
use crate::branching::branchers::SequencedBrancher;
use crate::branching::value_selection::InDomainMin;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::FirstFail;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::engine::ConstraintSatisfactionSolver;
use crate::engine::SearchMonitor;
use crate::engine::SearchStatus;
use crate::engine::SolverStatistics;
use crate::optimisation::solution_callback::SolutionCallback;
use crate::optimisation::ObjectiveBrancher;
use crate::optimisation::ObjectiveStrategy;
use crate::optimisation::OptimisationDirection;
use crate::options::SolverOptions;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorHandle;
use crate::statistics::log_statistic_postfix;
use crate::termination::TerminationCondition;
use crate::variables::DomainId;
use crate::variables::GraphId;
use crate::variables::SetType;

/// The main interaction point which allows the creation of variables, the addition of
/// propagators, and solving problems.
///
/// # Creating Variables
/// ```rust
/// # use marrow_core::Solver;
/// # use marrow_core::variables::SetType;
/// let mut solver = Solver::default();
///
/// // We can create an integer variable with a domain in the range [0, 10]
/// let integer_between_bounds = solver.new_bounded_integer(0, 10);
///
/// // We can also create an integer variable with a non-continuous domain
/// let sparse_integer = solver.new_sparse_integer(vec![0, 3, 5]);
///
/// // A directed graph variable over 3 nodes whose envelope contains the given edges
/// let graph = solver.new_graph_variable(3, true, SetType::BitSet, [(0, 1), (1, 2)]);
///
/// assert_eq!(solver.upper_bound(integer_between_bounds), 10);
/// assert_eq!(solver.lower_bound(sparse_integer), 0);
/// ```
///
/// # Using the Solver
/// ```rust
/// # use marrow_core::Solver;
/// # use marrow_core::results::SatisfactionResult;
/// # use marrow_core::termination::Indefinite;
/// let mut solver = Solver::default();
/// let x = solver.new_bounded_integer(0, 10);
/// let y = solver.new_sparse_integer(vec![2, 3, 5]);
///
/// let mut brancher = solver.default_brancher();
/// match solver.satisfy(&mut brancher, &mut Indefinite) {
///     SatisfactionResult::Satisfiable(solution) => {
///         assert_eq!(solution.integer_value(x), 0);
///         assert_eq!(solution.integer_value(y), 2);
///     }
///     _ => unreachable!("there is no constraint"),
/// }
/// ```
#[derive(Debug, Default)]
pub struct Solver {
    /// The internal [`ConstraintSatisfactionSolver`] which is used to solve the problems.
    satisfaction_solver: ConstraintSatisfactionSolver,
}

impl Solver {
    /// Creates a solver with the provided [`SolverOptions`].
    pub fn with_options(solver_options: SolverOptions) -> Self {
        Solver {
            satisfaction_solver: ConstraintSatisfactionSolver::new(solver_options),
        }
    }

    /// Logs the statistics currently present in the solver, see
    /// [`configure_statistic_logging`](crate::statistics::configure_statistic_logging).
    pub fn log_statistics(&self) {
        self.satisfaction_solver.log_statistics();
        log_statistic_postfix();
    }

    pub fn statistics(&self) -> &SolverStatistics {
        self.satisfaction_solver.statistics()
    }

    /// Whether the last search exhausted its search space or was interrupted by a
    /// [`TerminationCondition`].
    pub fn search_status(&self) -> SearchStatus {
        self.satisfaction_solver.search_status()
    }

    /// Adds a [`SearchMonitor`] which is notified of solutions, restarts and contradictions.
    pub fn add_search_monitor(&mut self, monitor: impl SearchMonitor + 'static) {
        self.satisfaction_solver
            .add_search_monitor(Box::new(monitor));
    }

    /// Get the lower bound of the provided variable in the root.
    pub fn lower_bound(&self, variable: DomainId) -> i32 {
        self.satisfaction_solver.get_lower_bound(variable)
    }

    /// Get the upper bound of the provided variable in the root.
    pub fn upper_bound(&self, variable: DomainId) -> i32 {
        self.satisfaction_solver.get_upper_bound(variable)
    }

    pub fn contains(&self, variable: DomainId, value: i32) -> bool {
        self.satisfaction_solver
            .integer_variable_contains(variable, value)
    }
}

/// Functions to create and retrieve variables.
impl Solver {
    /// Create a new integer variable with the given bounds.
    ///
    /// # Panics
    /// If `lower_bound > upper_bound`.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.satisfaction_solver
            .create_new_integer_variable(lower_bound, upper_bound)
    }

    /// Create a new integer variable which has a domain of predefined values. Duplicate values
    /// are ignored.
    ///
    /// # Panics
    /// If no value is given.
    pub fn new_sparse_integer(&mut self, values: impl Into<Vec<i32>>) -> DomainId {
        self.satisfaction_solver
            .create_new_integer_variable_sparse(values.into())
    }

    /// Create a graph variable over the nodes `0..num_nodes`. Every node and every given edge is
    /// in the envelope; the kernel starts empty.
    pub fn new_graph_variable(
        &mut self,
        num_nodes: usize,
        directed: bool,
        set_type: SetType,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> GraphId {
        self.satisfaction_solver
            .create_new_graph_variable(num_nodes, directed, set_type, edges)
    }
}

/// Functions for solving with the constraints that have been added to the [`Solver`].
impl Solver {
    /// Solves the current model in the [`Solver`] until it finds a solution (or is indicated to
    /// terminate by the provided [`TerminationCondition`]) and returns a [`SatisfactionResult`]
    /// which can be used to obtain the found solution or find other solutions.
    ///
    /// The solver is reset to the root afterwards, so calling this again finds the same
    /// solution.
    pub fn satisfy<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
    ) -> SatisfactionResult {
        self.satisfaction_solver.restore_state_at_root(brancher);
        let result = match self.satisfaction_solver.solve(termination, brancher) {
            CSPSolverExecutionFlag::Feasible => {
                SatisfactionResult::Satisfiable(self.satisfaction_solver.solution())
            }
            CSPSolverExecutionFlag::Infeasible => SatisfactionResult::Unsatisfiable,
            CSPSolverExecutionFlag::Timeout => SatisfactionResult::Unknown,
        };
        // Reset the state whenever we return a result
        self.satisfaction_solver.restore_state_at_root(brancher);
        result
    }

    /// Returns a [`SolutionIterator`] which enumerates every solution exactly once.
    ///
    /// Once no solution is left, the solver is in an infeasible state and no more variables or
    /// propagators can be added.
    pub fn get_solution_iterator<
        'this,
        'brancher,
        'termination,
        B: Brancher,
        T: TerminationCondition,
    >(
        &'this mut self,
        brancher: &'brancher mut B,
        termination: &'termination mut T,
    ) -> SolutionIterator<'this, 'brancher, 'termination, B, T> {
        SolutionIterator::new(&mut self.satisfaction_solver, brancher, termination)
    }

    /// Finds a solution which minimises the `objective`, using plain branch-and-bound.
    pub fn minimise(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        objective: DomainId,
    ) -> OptimisationResult {
        self.optimise(
            brancher,
            termination,
            OptimisationDirection::Minimise,
            objective,
            None,
            |_: &Solution| ControlFlow::Continue(()),
        )
    }

    /// Finds a solution which maximises the `objective`, using plain branch-and-bound.
    pub fn maximise(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        objective: DomainId,
    ) -> OptimisationResult {
        self.optimise(
            brancher,
            termination,
            OptimisationDirection::Maximise,
            objective,
            None,
            |_: &Solution| ControlFlow::Continue(()),
        )
    }

    /// Optimises the `objective` in the given direction.
    ///
    /// Every solution improves on the previous one; the `solution_callback` is called for each of
    /// them and may stop the optimisation early. When an [`ObjectiveStrategy`] is given, the
    /// search branches on the objective first (see [`ObjectiveBrancher`]); bottom-up and
    /// dichotomic search restart after every improving solution.
    ///
    /// The bound imposed by the best solution remains part of the root afterwards: a solver which
    /// proved optimality is infeasible.
    pub fn optimise<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
        direction: OptimisationDirection,
        objective: DomainId,
        strategy: Option<ObjectiveStrategy>,
        mut solution_callback: impl SolutionCallback,
    ) -> OptimisationResult {
        self.satisfaction_solver.restore_state_at_root(brancher);
        self.satisfaction_solver.set_objective(objective, direction);

        let result = match strategy {
            Some(strategy) => {
                if strategy.restarts_on_new_bound() {
                    self.satisfaction_solver.force_restarts_on_new_bound();
                }
                let mut objective_brancher =
                    ObjectiveBrancher::new(objective, direction, strategy, &mut *brancher);
                self.run_optimisation(&mut objective_brancher, termination, &mut solution_callback)
            }
            None => self.run_optimisation(brancher, termination, &mut solution_callback),
        };

        self.satisfaction_solver.clear_objective();
        self.satisfaction_solver.restore_state_at_root(brancher);
        result
    }

    fn run_optimisation(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        solution_callback: &mut impl SolutionCallback,
    ) -> OptimisationResult {
        let mut best_solution = None;
        loop {
            match self.satisfaction_solver.solve(termination, brancher) {
                CSPSolverExecutionFlag::Feasible => {
                    let solution = self.satisfaction_solver.solution();
                    let flow = solution_callback.on_solution_callback(&solution);
                    if flow.is_break() {
                        return OptimisationResult::Satisfiable(solution);
                    }
                    best_solution = Some(solution);
                }
                CSPSolverExecutionFlag::Infeasible => {
                    return match best_solution {
                        Some(solution) => OptimisationResult::Optimal(solution),
                        None => OptimisationResult::Unsatisfiable,
                    };
                }
                CSPSolverExecutionFlag::Timeout => {
                    return match best_solution {
                        Some(solution) => OptimisationResult::Satisfiable(solution),
                        None => OptimisationResult::Unknown,
                    };
                }
            }
        }
    }
}

/// Functions for adding new constraints to the solver.
impl Solver {
    /// Adds a propagator to the solver and propagates it at the root.
    ///
    /// Returns [`ConstraintOperationError::InfeasiblePropagator`] if the root becomes infeasible,
    /// after which the solver reports every problem as unsatisfiable.
    pub fn add_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, ConstraintOperationError>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        self.satisfaction_solver.add_propagator(constructor)
    }

    /// Gives access to a propagator which was added earlier, for example to read its state after
    /// solving.
    pub fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self.satisfaction_solver.get_propagator(handle)
    }
}

/// Default brancher implementation
impl Solver {
    /// Creates a brancher which branches on the integer variables in [`FirstFail`] order with
    /// [`InDomainMin`] values, followed by the graph variables in input order.
    pub fn default_brancher(&self) -> DefaultBrancher {
        let assignments = &self.satisfaction_solver.state.assignments;
        let integers = assignments.domain_ids().collect::<Vec<_>>();
        let graphs = assignments.graph_ids().collect::<Vec<_>>();

        let mut brancher = SequencedBrancher::new(vec![]);
        if !integers.is_empty() {
            brancher.add_brancher(Box::new(IndependentVariableValueBrancher::new(
                FirstFail::new(&integers),
                InDomainMin,
            )));
        }
        if !graphs.is_empty() {
            brancher.add_brancher(Box::new(GraphBrancher::new(&graphs)));
        }
        brancher
    }
}

/// The type of [`Brancher`] which is created by [`Solver::default_brancher`].
///
/// It consists of a [`FirstFail`] [`VariableSelector`] and an [`InDomainMin`] [`ValueSelector`]
/// over the integer variables, then a [`GraphBrancher`] over the graph variables.
pub type DefaultBrancher = SequencedBrancher;
