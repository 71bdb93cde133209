//! Helpers for testing propagators in isolation. The [`TestSolver`] creates variables, posts
//! propagators and changes domains by hand, without any search.
use super::graph::GraphView;
use super::trailed::SetType;
use super::variables::DomainId;
use super::variables::GraphId;
use super::State;
use crate::basic_types::Cause;
use crate::basic_types::Contradiction;
use crate::basic_types::PropagationStatus;
use crate::propagation::Domains;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorHandle;

/// A container of variables and propagators, used to set up scenarios for propagators.
///
/// Every change made through the test solver has [`Cause::Root`], so delta monitors of the
/// propagators report it.
#[derive(Debug, Default)]
pub struct TestSolver {
    pub(crate) state: State,
}

impl TestSolver {
    pub fn new_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.state.new_interval_variable(lower_bound, upper_bound)
    }

    /// An enumerated variable over `[lower_bound, upper_bound]`, which can have holes.
    pub fn new_enumerated_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.state
            .new_sparse_variable((lower_bound..=upper_bound).collect())
    }

    pub fn new_sparse_variable(&mut self, values: Vec<i32>) -> DomainId {
        self.state.new_sparse_variable(values)
    }

    pub fn new_graph_variable(
        &mut self,
        num_nodes: usize,
        directed: bool,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> GraphId {
        self.state
            .new_graph_variable(num_nodes, directed, SetType::BitSet, edges)
    }

    /// Adds the propagator and propagates to a fixpoint.
    pub fn new_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, Contradiction> {
        let handle = self.state.add_propagator(constructor);
        self.state.propagate_to_fixed_point()?;
        Ok(handle)
    }

    pub fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self.state.get_propagator(handle)
    }

    pub fn propagate_until_fixed_point(&mut self) -> PropagationStatus {
        self.state.propagate_to_fixed_point()
    }

    pub fn domains(&self) -> Domains<'_> {
        self.state.domains()
    }

    pub fn contains(&self, variable: DomainId, value: i32) -> bool {
        self.state.contains(variable, value)
    }

    pub fn lower_bound(&self, variable: DomainId) -> i32 {
        self.state.lower_bound(variable)
    }

    pub fn upper_bound(&self, variable: DomainId) -> i32 {
        self.state.upper_bound(variable)
    }

    pub fn values(&self, variable: DomainId) -> Vec<i32> {
        self.state.assignments.values(variable).collect()
    }

    pub fn assert_bounds(&self, variable: DomainId, lower_bound: i32, upper_bound: i32) {
        let actual_lower_bound = self.lower_bound(variable);
        let actual_upper_bound = self.upper_bound(variable);
        assert_eq!(
            (lower_bound, upper_bound),
            (actual_lower_bound, actual_upper_bound),
            "the expected bounds [{lower_bound}..{upper_bound}] did not match the actual bounds [{actual_lower_bound}..{actual_upper_bound}]"
        );
    }

    pub fn envelope(&self, graph: GraphId) -> GraphView<'_> {
        self.state.assignments.envelope(graph)
    }

    pub fn kernel(&self, graph: GraphId) -> GraphView<'_> {
        self.state.assignments.kernel(graph)
    }

    pub fn remove(&mut self, variable: DomainId, value: i32) -> Result<bool, Contradiction> {
        self.state
            .assignments
            .remove_value(variable, value, Cause::Root)
    }

    pub fn set_lower_bound(
        &mut self,
        variable: DomainId,
        bound: i32,
    ) -> Result<bool, Contradiction> {
        self.state
            .assignments
            .update_lower_bound(variable, bound, Cause::Root)
    }

    pub fn set_upper_bound(
        &mut self,
        variable: DomainId,
        bound: i32,
    ) -> Result<bool, Contradiction> {
        self.state
            .assignments
            .update_upper_bound(variable, bound, Cause::Root)
    }

    pub fn assign(&mut self, variable: DomainId, value: i32) -> Result<bool, Contradiction> {
        self.state
            .assignments
            .instantiate(variable, value, Cause::Root)
    }

    pub fn remove_node(&mut self, graph: GraphId, node: usize) -> Result<bool, Contradiction> {
        self.state.assignments.remove_node(graph, node, Cause::Root)
    }

    pub fn remove_edge(
        &mut self,
        graph: GraphId,
        from: usize,
        to: usize,
    ) -> Result<bool, Contradiction> {
        self.state
            .assignments
            .remove_edge(graph, from, to, Cause::Root)
    }

    pub fn enforce_node(&mut self, graph: GraphId, node: usize) -> Result<bool, Contradiction> {
        self.state.assignments.enforce_node(graph, node, Cause::Root)
    }

    pub fn enforce_edge(
        &mut self,
        graph: GraphId,
        from: usize,
        to: usize,
    ) -> Result<bool, Contradiction> {
        self.state
            .assignments
            .enforce_edge(graph, from, to, Cause::Root)
    }

    pub fn new_checkpoint(&mut self) {
        self.state.new_checkpoint();
    }

    pub fn restore_to(&mut self, checkpoint: usize) {
        self.state.restore_to(checkpoint);
    }
}
