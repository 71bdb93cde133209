//! Houses the solver which searches for solutions of a Constraint Satisfaction Problem (CSP) by
//! interleaving propagation with a depth-first search over binary decisions.
use std::cmp::max;
use std::time::Instant;

#[allow(
    clippy::disallowed_types,
    reason = "any rand generator is a valid implementation of Random"
)]
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::decision_path::DecisionPath;
use super::explanations::explain_contradiction;
use super::restarts::ForceRestartBeforeCut;
use super::restarts::NoRestarts;
use super::restarts::RestartOptions;
use super::restarts::RestartPolicy;
use super::restarts::Restarter;
use super::search_monitor::SearchMonitor;
use super::solver_statistics::SolverStatistics;
use super::termination::TerminationCondition;
use super::trailed::SetType;
use super::variables::DomainId;
use super::variables::GraphId;
use super::State;
use crate::basic_types::CSPSolverExecutionFlag;
use crate::basic_types::Cause;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Contradiction;
use crate::basic_types::Solution;
use crate::branching::branchers::GraphBrancher;
use crate::branching::Brancher;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::marrow_assert_moderate;
use crate::marrow_assert_simple;
use crate::optimisation::ObjectiveManager;
use crate::optimisation::OptimisationDirection;
use crate::propagation::HasAssignments;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorHandle;
use crate::propagation::ReadDomains;
use crate::propagators::DecisionNogoodConstructor;
use crate::statistics::should_log_statistics;
use crate::statistics::StatisticLogger;
#[cfg(doc)]
use crate::Solver;

/// A solver which searches for solutions of a Constraint Satisfaction Problem (CSP).
///
/// After every decision the propagators are run to a fixpoint. A failed fixpoint is resolved by
/// backtracking: the deepest decision which was not refuted yet is replaced by its negation.
/// When backjumping is enabled (see [`LearningOptions`]) the failure is explained in terms of
/// decisions instead, and the deepest decision of the explanation is refuted, skipping the
/// decisions in between.
///
/// # Practical
/// The behaviour of the solver is influenced by the [`SatisfactionSolverOptions`]. Decisions are
/// taken by a [`Brancher`], which is passed to [`ConstraintSatisfactionSolver::solve`]. Calling
/// [`ConstraintSatisfactionSolver::solve`] again after a solution was found continues the search
/// after that solution.
#[derive(Debug)]
pub struct ConstraintSatisfactionSolver {
    /// The solver continuously changes states during the search.
    pub(crate) solver_state: CSPSolverState,
    pub(crate) state: State,
    /// The decisions from the root to the current node.
    decision_path: DecisionPath,
    restart_policy: Box<dyn RestartPolicy>,
    /// Whether the restart policy is wrapped in a [`ForceRestartBeforeCut`].
    restarts_forced_on_new_bound: bool,
    /// Restarts are suppressed while enumerating solutions, since a restart would revisit them.
    restarts_allowed: bool,
    objective: Option<ObjectiveManager>,
    /// Explanations recorded since the last restart, posted as nogoods at the next restart.
    pending_nogoods: Vec<Vec<Decision>>,
    search_monitors: Vec<Box<dyn SearchMonitor>>,
    /// A set of counters updated during the search.
    solver_statistics: SolverStatistics,
    random_generator: SmallRng,
    /// Miscellaneous constant parameters used by the solver.
    internal_parameters: SatisfactionSolverOptions,
    search_status: SearchStatus,
}

impl Default for ConstraintSatisfactionSolver {
    fn default() -> Self {
        ConstraintSatisfactionSolver::new(SatisfactionSolverOptions::default())
    }
}

/// Options for the [`Solver`] which determine how it behaves.
#[derive(Debug, Clone, Copy)]
pub struct SatisfactionSolverOptions {
    /// The options used by the restart strategy.
    pub restart_options: RestartOptions,
    /// The options which influence the learning of the solver.
    pub learning_options: LearningOptions,
    /// The seed of the random generator which is handed to the branchers.
    pub random_seed: u64,
    /// Whether [`ConstraintSatisfactionSolver::log_statistics`] logs every counter, including
    /// those of the propagators.
    pub verbose_statistics: bool,
}

impl Default for SatisfactionSolverOptions {
    fn default() -> Self {
        SatisfactionSolverOptions {
            restart_options: RestartOptions::default(),
            learning_options: LearningOptions::default(),
            random_seed: 42,
            verbose_statistics: false,
        }
    }
}

/// Options which determine what the solver learns from failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct LearningOptions {
    /// Explain every failure in terms of decisions and jump back to the deepest decision of the
    /// explanation.
    pub backjumping: bool,
    /// Post the explanations found between two restarts as nogoods at the restart. Only has an
    /// effect together with `backjumping`.
    pub keep_nogoods_across_restarts: bool,
}

/// Whether the last search ended because the search space was exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Complete,
    /// A termination condition stopped the search.
    Interrupted,
}

impl ConstraintSatisfactionSolver {
    pub fn new(solver_options: SatisfactionSolverOptions) -> Self {
        let mut state = State::default();
        if solver_options.learning_options.backjumping {
            state.assignments.enable_change_log();
        }

        let restart_policy: Box<dyn RestartPolicy> = if solver_options.restart_options.enabled {
            Box::new(Restarter::from_options(solver_options.restart_options))
        } else {
            Box::new(NoRestarts)
        };

        ConstraintSatisfactionSolver {
            solver_state: CSPSolverState::default(),
            state,
            decision_path: DecisionPath::default(),
            restart_policy,
            restarts_forced_on_new_bound: false,
            restarts_allowed: true,
            objective: None,
            pending_nogoods: Vec::new(),
            search_monitors: Vec::new(),
            solver_statistics: SolverStatistics::default(),
            random_generator: SmallRng::seed_from_u64(solver_options.random_seed),
            internal_parameters: solver_options,
            search_status: SearchStatus::default(),
        }
    }

    /// Searches for the next solution.
    ///
    /// From the root this finds a first solution; after a solution it continues the search past
    /// that solution. [`CSPSolverExecutionFlag::Infeasible`] means no (further) solution exists.
    pub fn solve(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        if self.solver_state.is_infeasible() {
            self.search_status = SearchStatus::Complete;
            return CSPSolverExecutionFlag::Infeasible;
        }

        let start_time = Instant::now();
        let result = self.solve_internal(termination, brancher);
        self.solver_statistics.time_spent_in_solver += start_time.elapsed();

        result
    }

    pub fn get_state(&self) -> &CSPSolverState {
        &self.solver_state
    }

    pub fn search_status(&self) -> SearchStatus {
        self.search_status
    }

    pub fn statistics(&self) -> &SolverStatistics {
        &self.solver_statistics
    }

    pub fn log_statistics(&self) {
        // Going through all propagators is only worth it when the statistics are printed.
        if !should_log_statistics() {
            return;
        }

        let verbose = self.internal_parameters.verbose_statistics;
        self.solver_statistics
            .log(StatisticLogger::default(), verbose);
        if verbose {
            self.state
                .log_statistics(StatisticLogger::default().attach_to_prefix("propagator"));
        }
    }

    pub fn add_search_monitor(&mut self, monitor: Box<dyn SearchMonitor>) {
        self.search_monitors.push(monitor);
    }

    /// The current values of all variables; only a solution if the solver is in the
    /// solution-found state.
    pub fn solution(&self) -> Solution {
        marrow_assert_simple!(self.solver_state.has_solution());
        self.state.assignments.solution()
    }

    /// Whether [`ConstraintSatisfactionSolver::solve`] may restart. Restarting while enumerating
    /// solutions would report solutions twice.
    pub fn set_restarts_allowed(&mut self, restarts_allowed: bool) {
        self.restarts_allowed = restarts_allowed;
    }

    /// From now on, every solution must improve on the objective value of the previous one.
    pub fn set_objective(&mut self, objective: DomainId, direction: OptimisationDirection) {
        self.objective = Some(ObjectiveManager::new(objective, direction));
    }

    pub fn clear_objective(&mut self) {
        self.objective = None;
    }

    /// Makes the restart policy restart immediately after every new incumbent, on top of its own
    /// cutoffs.
    pub(crate) fn force_restarts_on_new_bound(&mut self) {
        if self.restarts_forced_on_new_bound {
            return;
        }
        self.restarts_forced_on_new_bound = true;

        let policy = std::mem::replace(&mut self.restart_policy, Box::new(NoRestarts));
        self.restart_policy = Box::new(ForceRestartBeforeCut::new(policy));
    }

    /// Undoes every decision; the next call to [`ConstraintSatisfactionSolver::solve`] starts a
    /// new search from the root.
    pub fn restore_state_at_root(&mut self, brancher: &mut impl Brancher) {
        if self.state.get_checkpoint() != 0 {
            self.state.restore_to(0);
            brancher.on_backtrack();
        }
        self.decision_path.clear();

        if !self.solver_state.is_infeasible() {
            self.solver_state.declare_ready();
        }
    }

    pub fn get_lower_bound(&self, variable: DomainId) -> i32 {
        self.state.lower_bound(variable)
    }

    pub fn get_upper_bound(&self, variable: DomainId) -> i32 {
        self.state.upper_bound(variable)
    }

    pub fn integer_variable_contains(&self, variable: DomainId, value: i32) -> bool {
        self.state.contains(variable, value)
    }

    pub fn get_assigned_integer_value(&self, variable: DomainId) -> Option<i32> {
        self.state.domains().fixed_value(variable)
    }
}

/// Variables.
impl ConstraintSatisfactionSolver {
    pub fn create_new_integer_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.assert_at_root("variables are created at the root");
        self.state.new_interval_variable(lower_bound, upper_bound)
    }

    pub fn create_new_integer_variable_sparse(&mut self, values: Vec<i32>) -> DomainId {
        self.assert_at_root("variables are created at the root");
        self.state.new_sparse_variable(values)
    }

    pub fn create_new_graph_variable(
        &mut self,
        num_nodes: usize,
        directed: bool,
        set_type: SetType,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> GraphId {
        self.assert_at_root("variables are created at the root");
        self.state
            .new_graph_variable(num_nodes, directed, set_type, edges)
    }

    fn assert_at_root(&self, message: &str) {
        marrow_assert_simple!(
            self.state.get_checkpoint() == 0,
            "{message}, not at checkpoint {}",
            self.state.get_checkpoint()
        );
    }
}

// methods that serve as the main building blocks
impl ConstraintSatisfactionSolver {
    fn solve_internal(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        if self.solver_state.has_solution() {
            if !self.continue_after_solution(brancher) {
                return self.declare_exhausted();
            }
        } else if !self.solver_state.is_conflicting() {
            self.solver_state.declare_solving();
        }

        loop {
            if self.solver_state.no_conflict() {
                self.propagate();
            }

            if let Some(contradiction) = self.solver_state.conflict() {
                self.solver_statistics.engine_statistics.num_fails += 1;
                termination.contradiction_has_occurred();
                brancher.on_conflict();
                for monitor in &mut self.search_monitors {
                    monitor.on_contradiction(&contradiction);
                }

                if !self.resolve_conflict(contradiction, brancher) {
                    return self.declare_exhausted();
                }
                continue;
            }

            if termination.should_stop() {
                self.solver_state.declare_timeout();
                self.search_status = SearchStatus::Interrupted;
                return CSPSolverExecutionFlag::Timeout;
            }

            if self.restarts_allowed
                && self
                    .restart_policy
                    .should_restart(&self.solver_statistics.search_progress())
            {
                self.restart_during_search(brancher);
                continue;
            }

            if let Some(flag) = self.make_next_decision(termination, brancher) {
                return flag;
            }
        }
    }

    fn declare_exhausted(&mut self) -> CSPSolverExecutionFlag {
        self.solver_state.declare_infeasible();
        self.search_status = SearchStatus::Complete;
        CSPSolverExecutionFlag::Infeasible
    }

    /// Moves the search past the solution it currently holds. Returns `false` if the search space
    /// is exhausted.
    fn continue_after_solution(&mut self, brancher: &mut impl Brancher) -> bool {
        self.solver_state.declare_solving();

        if self.restarts_allowed
            && self
                .restart_policy
                .should_restart(&self.solver_statistics.search_progress())
        {
            self.restart_during_search(brancher);
            return true;
        }

        // With an incumbent, the cut excludes the current leaf at the next propagation.
        if self
            .objective
            .is_some_and(|objective| objective.best().is_some())
        {
            return true;
        }

        let Some(depth) = self.decision_path.deepest_open_decision() else {
            return false;
        };
        let explanation = self.decision_path.prefix_explanation(depth);
        self.refute(depth, explanation, brancher);
        true
    }

    /// Applies the objective cut, if any, and runs the propagators to a fixpoint.
    pub(crate) fn propagate(&mut self) {
        if let Some(objective) = &self.objective {
            if let Err(contradiction) = objective.apply_cut(&mut self.state.assignments) {
                self.solver_state.declare_conflict(contradiction);
                return;
            }
        }

        if let Err(contradiction) = self.state.propagate_to_fixed_point() {
            self.solver_state.declare_conflict(contradiction);
        }
    }

    /// Asks the brancher for a decision and applies it in a new world. Returns a flag if there is
    /// nothing left to decide, i.e. a solution was found.
    fn make_next_decision(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> Option<CSPSolverExecutionFlag> {
        let mut context =
            SelectionContext::new(&self.state.assignments, &mut self.random_generator);
        let decision = match brancher.next_decision(&mut context) {
            Some(decision) => Some(decision),
            None => fallback_decision(&mut context),
        };

        let Some(decision) = decision else {
            return Some(self.on_solution_found(brancher));
        };

        termination.decision_has_been_made();
        self.state.new_checkpoint();
        let depth = self.decision_path.push(decision);

        let engine_statistics = &mut self.solver_statistics.engine_statistics;
        engine_statistics.num_nodes += 1;
        engine_statistics.peak_depth = max(engine_statistics.peak_depth, depth as u64);

        log::trace!("decide {decision} at depth {depth}");
        match decision.apply(&mut self.state.assignments, Cause::Decision { depth }) {
            Ok(changed) => marrow_assert_simple!(
                changed,
                "the decision {decision} does not change its variable; double check the brancher"
            ),
            Err(contradiction) => self.solver_state.declare_conflict(contradiction),
        }

        None
    }

    fn on_solution_found(&mut self, brancher: &mut impl Brancher) -> CSPSolverExecutionFlag {
        marrow_assert_simple!(self.state.assignments.all_instantiated());
        marrow_assert_moderate!(
            self.state.all_propagators_satisfied(),
            "a propagator is violated by a solution"
        );

        self.solver_state.declare_solution_found();
        self.solver_statistics.engine_statistics.num_solutions += 1;
        let solution = self.state.assignments.solution();

        if let Some(objective) = self.objective.as_mut() {
            let value = solution.integer_value(objective.objective());
            if objective.record(value) {
                log::debug!("new incumbent objective value {value}");
                self.solver_statistics.best_objective = Some(value);
                self.restart_policy.on_new_bound();
            }
        }

        brancher.on_solution(&solution);
        for monitor in &mut self.search_monitors {
            monitor.on_solution(&solution);
        }
        self.restart_policy
            .on_solution(&self.solver_statistics.search_progress());

        log::debug!(
            "solution {} at depth {}",
            self.solver_statistics.engine_statistics.num_solutions,
            self.decision_path.depth()
        );
        CSPSolverExecutionFlag::Feasible
    }

    /// Refutes a decision implied by the conflict; returns `false` if the conflict holds at the
    /// root, which means the search space is exhausted.
    ///
    /// # Note
    /// This method performs no propagation, this is left up to the solver afterwards.
    fn resolve_conflict(
        &mut self,
        contradiction: Contradiction,
        brancher: &mut impl Brancher,
    ) -> bool {
        if self.decision_path.depth() == 0 {
            return false;
        }

        let (depth, explanation) = if self.internal_parameters.learning_options.backjumping {
            let mut explanation =
                explain_contradiction(&self.state, &self.decision_path, contradiction);
            let Some(&depth) = explanation.last() else {
                return false;
            };

            if self
                .internal_parameters
                .learning_options
                .keep_nogoods_across_restarts
                && self.restarts_allowed
            {
                self.pending_nogoods
                    .push(self.decision_path.decisions_at(&explanation));
            }

            let deepest_open = self.decision_path.deepest_open_decision().unwrap_or(depth);
            if depth < deepest_open {
                let engine_statistics = &mut self.solver_statistics.engine_statistics;
                engine_statistics.num_backjumps += 1;
                engine_statistics.sum_of_backjumps += (deepest_open - depth) as u64;
                log::debug!("backjump from depth {deepest_open} to depth {depth}");
            }

            let _ = explanation.pop();
            (depth, explanation)
        } else {
            let Some(depth) = self.decision_path.deepest_open_decision() else {
                return false;
            };
            (depth, self.decision_path.prefix_explanation(depth))
        };

        self.refute(depth, explanation, brancher);
        true
    }

    /// Replaces the decision at `depth` by its negation, which is applied in a fresh world
    /// below the world in which the decision was taken.
    fn refute(&mut self, depth: u32, explanation: Vec<u32>, brancher: &mut impl Brancher) {
        self.state.restore_to(depth as usize - 1);
        brancher.on_backtrack();
        self.solver_statistics.engine_statistics.num_backtracks += 1;

        let negation = self.decision_path.refute(depth, explanation);
        self.state.new_checkpoint();
        self.solver_state.declare_solving();

        log::trace!("refute with {negation} at depth {depth}");
        if let Err(contradiction) =
            negation.apply(&mut self.state.assignments, Cause::Refutation { depth })
        {
            self.solver_state.declare_conflict(contradiction);
        }
    }

    /// Abandons the current search tree and continues from the root. The nogoods collected since
    /// the previous restart are posted before the search resumes.
    fn restart_during_search(&mut self, brancher: &mut impl Brancher) {
        self.state.restore_to(0);
        self.decision_path.clear();

        self.solver_statistics.engine_statistics.num_restarts += 1;
        self.restart_policy
            .on_restart(&self.solver_statistics.search_progress());
        brancher.on_restart();
        for monitor in &mut self.search_monitors {
            monitor.on_restart();
        }
        log::debug!(
            "restart {} after {} failures",
            self.solver_statistics.engine_statistics.num_restarts,
            self.solver_statistics.engine_statistics.num_fails
        );

        if !self.pending_nogoods.is_empty() {
            let nogoods = std::mem::take(&mut self.pending_nogoods);
            self.solver_statistics.engine_statistics.num_nogoods += nogoods.len() as u64;
            let _ = self
                .state
                .add_propagator(DecisionNogoodConstructor { nogoods });
        }

        self.solver_state.declare_solving();
    }
}

/// Methods for adding constraints.
impl ConstraintSatisfactionSolver {
    /// See [`Solver::add_propagator`] for documentation.
    pub(crate) fn add_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, ConstraintOperationError>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        self.assert_at_root("propagators are added at the root");
        if self.solver_state.is_infeasible() {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let handle = self.state.add_propagator(constructor);
        if let Err(contradiction) = self.state.propagate_to_fixed_point() {
            log::debug!("root propagation failed: {contradiction}");
            self.solver_state.declare_infeasible();
            return Err(ConstraintOperationError::InfeasiblePropagator);
        }

        Ok(handle)
    }

    pub(crate) fn get_propagator<P: Propagator>(
        &self,
        handle: PropagatorHandle<P>,
    ) -> Option<&P> {
        self.state.get_propagator(handle)
    }
}

/// Decides on a variable the brancher did not consider: the lower bound of the first unfixed
/// integer variable, then the graph variables.
fn fallback_decision(context: &mut SelectionContext) -> Option<Decision> {
    let assignments = context.assignments();
    if let Some(variable) = assignments
        .domain_ids()
        .find(|&variable| !context.is_fixed(variable))
    {
        log::debug!("the brancher did not fix {variable}");
        return Some(Decision::assign(variable, context.lower_bound(variable)));
    }

    let unfixed_graphs = assignments
        .graph_ids()
        .filter(|&graph| !context.is_graph_fixed(graph))
        .collect::<Vec<_>>();
    if unfixed_graphs.is_empty() {
        return None;
    }

    GraphBrancher::new(&unfixed_graphs).next_decision(context)
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
enum CSPSolverStateInternal {
    #[default]
    Ready,
    Solving,
    ContainsSolution,
    Conflict {
        contradiction: Contradiction,
    },
    Infeasible,
    Timeout,
}

#[derive(Default, Debug, Clone, Copy)]
pub struct CSPSolverState {
    internal_state: CSPSolverStateInternal,
}

impl CSPSolverState {
    pub fn is_ready(&self) -> bool {
        matches!(self.internal_state, CSPSolverStateInternal::Ready)
    }

    pub fn no_conflict(&self) -> bool {
        !self.is_conflicting()
    }

    pub fn is_conflicting(&self) -> bool {
        matches!(
            self.internal_state,
            CSPSolverStateInternal::Conflict { contradiction: _ }
        )
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self.internal_state, CSPSolverStateInternal::Infeasible)
    }

    pub(crate) fn conflict(&self) -> Option<Contradiction> {
        match self.internal_state {
            CSPSolverStateInternal::Conflict { contradiction } => Some(contradiction),
            _ => None,
        }
    }

    pub fn timeout(&self) -> bool {
        matches!(self.internal_state, CSPSolverStateInternal::Timeout)
    }

    pub fn has_solution(&self) -> bool {
        matches!(
            self.internal_state,
            CSPSolverStateInternal::ContainsSolution
        )
    }

    pub(crate) fn declare_ready(&mut self) {
        self.internal_state = CSPSolverStateInternal::Ready;
    }

    pub(crate) fn declare_solving(&mut self) {
        marrow_assert_simple!(!self.is_infeasible());
        self.internal_state = CSPSolverStateInternal::Solving;
    }

    pub(crate) fn declare_infeasible(&mut self) {
        self.internal_state = CSPSolverStateInternal::Infeasible;
    }

    pub(crate) fn declare_conflict(&mut self, contradiction: Contradiction) {
        self.internal_state = CSPSolverStateInternal::Conflict { contradiction };
    }

    pub(crate) fn declare_solution_found(&mut self) {
        marrow_assert_simple!(!self.is_infeasible());
        self.internal_state = CSPSolverStateInternal::ContainsSolution;
    }

    pub(crate) fn declare_timeout(&mut self) {
        marrow_assert_simple!(!self.is_infeasible());
        self.internal_state = CSPSolverStateInternal::Timeout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::branchers::IndependentVariableValueBrancher;
    use crate::branching::value_selection::InDomainMax;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::InputOrder;
    use crate::termination::FailBudget;
    use crate::termination::Indefinite;

    fn input_order_brancher(
        variables: &[DomainId],
    ) -> IndependentVariableValueBrancher<DomainId, InputOrder, InDomainMin> {
        IndependentVariableValueBrancher::new(InputOrder::new(variables), InDomainMin)
    }

    fn count_solutions(
        solver: &mut ConstraintSatisfactionSolver,
        brancher: &mut impl Brancher,
    ) -> u64 {
        solver.set_restarts_allowed(false);
        let mut count = 0;
        while solver.solve(&mut Indefinite, brancher) == CSPSolverExecutionFlag::Feasible {
            count += 1;
        }
        count
    }

    #[test]
    fn enumerates_the_cartesian_product() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.create_new_integer_variable(0, 2);
        let y = solver.create_new_integer_variable_sparse(vec![5, 7]);

        let mut brancher = input_order_brancher(&[x, y]);
        assert_eq!(count_solutions(&mut solver, &mut brancher), 6);
        assert_eq!(solver.statistics().num_solutions(), 6);
        assert_eq!(solver.search_status(), SearchStatus::Complete);
        assert!(solver.get_state().is_infeasible());
    }

    #[test]
    fn solutions_are_reported_in_branching_order() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.create_new_integer_variable(1, 3);
        let mut brancher = input_order_brancher(&[x]);

        let mut values = vec![];
        while solver.solve(&mut Indefinite, &mut brancher) == CSPSolverExecutionFlag::Feasible {
            values.push(solver.solution().integer_value(x));
        }
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn unfixed_variables_are_decided_by_the_fallback() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.create_new_integer_variable(0, 1);
        let y = solver.create_new_integer_variable(4, 5);
        let mut brancher = input_order_brancher(&[x]);

        assert_eq!(
            solver.solve(&mut Indefinite, &mut brancher),
            CSPSolverExecutionFlag::Feasible
        );
        assert_eq!(solver.solution().integer_value(y), 4);
        assert_eq!(count_solutions(&mut solver, &mut brancher), 3);
    }

    #[test]
    fn graph_variables_are_enumerated() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let _ = solver.create_new_graph_variable(2, true, SetType::BitSet, [(0, 1)]);

        let mut brancher = input_order_brancher(&[]);
        // Both nodes in or out independently; the edge only if both nodes are in.
        assert_eq!(count_solutions(&mut solver, &mut brancher), 5);
    }

    #[test]
    fn minimisation_finds_the_optimum() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.create_new_integer_variable(3, 8);
        let mut brancher = IndependentVariableValueBrancher::new(InputOrder::new(&[x]), InDomainMax);

        solver.set_objective(x, OptimisationDirection::Minimise);
        let mut last = None;
        while solver.solve(&mut Indefinite, &mut brancher) == CSPSolverExecutionFlag::Feasible {
            last = Some(solver.solution().integer_value(x));
        }
        assert_eq!(last, Some(3));
        assert_eq!(solver.statistics().num_solutions(), 6);
        assert_eq!(solver.statistics().best_objective(), Some(3));
    }

    #[test]
    fn a_budget_interrupts_the_search() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.create_new_integer_variable(0, 5);
        solver.set_objective(x, OptimisationDirection::Maximise);
        let mut brancher = input_order_brancher(&[x]);

        // Every improvement fails once at the cut before the next solution.
        let mut budget = FailBudget::new(2);
        let mut flags = vec![];
        loop {
            let flag = solver.solve(&mut budget, &mut brancher);
            flags.push(flag);
            if flag != CSPSolverExecutionFlag::Feasible {
                break;
            }
        }

        assert_eq!(flags.last(), Some(&CSPSolverExecutionFlag::Timeout));
        assert_eq!(solver.search_status(), SearchStatus::Interrupted);
        assert!(solver.get_state().timeout());
    }

    #[test]
    fn restoring_at_root_starts_a_new_search() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.create_new_integer_variable(0, 3);
        let mut brancher = input_order_brancher(&[x]);

        assert_eq!(
            solver.solve(&mut Indefinite, &mut brancher),
            CSPSolverExecutionFlag::Feasible
        );
        assert_eq!(solver.solution().integer_value(x), 0);

        solver.restore_state_at_root(&mut brancher);
        assert!(solver.get_state().is_ready());
        assert_eq!(solver.get_lower_bound(x), 0);
        assert_eq!(solver.get_upper_bound(x), 3);

        assert_eq!(
            solver.solve(&mut Indefinite, &mut brancher),
            CSPSolverExecutionFlag::Feasible
        );
        assert_eq!(solver.solution().integer_value(x), 0);
    }
}
