use crate::basic_types::Cause;
use crate::basic_types::Contradiction;
use crate::basic_types::ContradictionKind;
use crate::engine::domains::DomainRanges;
use crate::engine::domains::DomainValues;
use crate::engine::graph::GraphView;
use crate::engine::trailed::SetIter;
use crate::engine::trailed::TrailedBitSet;
use crate::engine::trailed::TrailedInteger;
use crate::engine::trailed::TrailedSet;
use crate::engine::variables::DomainId;
use crate::engine::variables::GraphId;
use crate::engine::Assignments;
use crate::propagation::PropagatorId;

pub(crate) use private::HasAssignments;

mod private {
    use crate::engine::Assignments;

    pub trait HasAssignments {
        fn assignments(&self) -> &Assignments;
    }
}

/// Read access to the variables and trailed values of the solver.
pub trait ReadDomains: private::HasAssignments {
    fn lower_bound(&self, variable: DomainId) -> i32 {
        self.assignments().lower_bound(variable)
    }

    fn upper_bound(&self, variable: DomainId) -> i32 {
        self.assignments().upper_bound(variable)
    }

    fn size(&self, variable: DomainId) -> usize {
        self.assignments().size(variable)
    }

    fn contains(&self, variable: DomainId, value: i32) -> bool {
        self.assignments().contains(variable, value)
    }

    fn is_fixed(&self, variable: DomainId) -> bool {
        self.lower_bound(variable) == self.upper_bound(variable)
    }

    fn fixed_value(&self, variable: DomainId) -> Option<i32> {
        self.is_fixed(variable).then(|| self.lower_bound(variable))
    }

    /// The smallest value in the domain larger than `value`, or [`i32::MAX`] if there is none.
    fn next_value(&self, variable: DomainId, value: i32) -> i32 {
        self.assignments().next_value(variable, value)
    }

    /// The largest value in the domain smaller than `value`, or [`i32::MIN`] if there is none.
    fn previous_value(&self, variable: DomainId, value: i32) -> i32 {
        self.assignments().previous_value(variable, value)
    }

    fn values(&self, variable: DomainId) -> DomainValues<'_> {
        self.assignments().values(variable)
    }

    fn ranges(&self, variable: DomainId) -> DomainRanges<'_> {
        self.assignments().ranges(variable)
    }

    fn envelope(&self, graph: GraphId) -> GraphView<'_> {
        self.assignments().envelope(graph)
    }

    fn kernel(&self, graph: GraphId) -> GraphView<'_> {
        self.assignments().kernel(graph)
    }

    fn is_graph_fixed(&self, graph: GraphId) -> bool {
        self.assignments().is_graph_instantiated(graph)
    }

    /// Identifies the current search node; it changes whenever a world is pushed or popped.
    fn node_stamp(&self) -> u64 {
        self.assignments().node_stamp()
    }

    /// A counter which increases on every change to a domain or graph, and on every push or
    /// pop.
    fn time_stamp(&self) -> u64 {
        self.assignments().environment.time_stamp()
    }

    fn read_trailed(&self, integer: TrailedInteger) -> i64 {
        self.assignments().environment.read(integer)
    }

    fn trailed_bit(&self, bit_set: TrailedBitSet, index: usize) -> bool {
        self.assignments().environment.contains_bit(bit_set, index)
    }

    fn next_trailed_bit(&self, bit_set: TrailedBitSet, from: usize) -> Option<usize> {
        self.assignments().environment.next_set_bit(bit_set, from)
    }

    fn trailed_set_contains(&self, set: TrailedSet, element: usize) -> bool {
        self.assignments().environment.set_contains(set, element)
    }

    fn trailed_set_size(&self, set: TrailedSet) -> usize {
        self.assignments().environment.set_size(set)
    }

    fn trailed_set_iter(&self, set: TrailedSet) -> SetIter<'_> {
        self.assignments().environment.set_iter(set)
    }
}

impl<T: private::HasAssignments> ReadDomains for T {}

/// A read-only view on the state of the solver.
#[derive(Clone, Copy, Debug)]
pub struct Domains<'a> {
    pub(crate) assignments: &'a Assignments,
}

impl<'a> Domains<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        Domains { assignments }
    }
}

impl HasAssignments for Domains<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

/// Gives a propagator the means to change domains; every change is attributed to it.
#[derive(Debug)]
pub struct PropagationContext<'a> {
    pub(crate) assignments: &'a mut Assignments,
    pub(crate) propagator_id: PropagatorId,
}

impl HasAssignments for PropagationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(assignments: &'a mut Assignments, propagator_id: PropagatorId) -> Self {
        PropagationContext {
            assignments,
            propagator_id,
        }
    }

    pub fn propagator_id(&self) -> PropagatorId {
        self.propagator_id
    }

    pub fn domains(&self) -> Domains<'_> {
        Domains::new(self.assignments)
    }

    pub fn reborrow(&mut self) -> PropagationContext<'_> {
        PropagationContext {
            assignments: self.assignments,
            propagator_id: self.propagator_id,
        }
    }

    fn cause(&self) -> Cause {
        Cause::Propagator(self.propagator_id)
    }

    /// A contradiction which is not tied to a single variable, attributed to this propagator.
    pub fn contradiction(&self) -> Contradiction {
        Contradiction::new(ContradictionKind::Explicit, self.cause())
    }

    /// Each mutating method returns whether the domain changed, or the contradiction which
    /// prevented the change.
    pub fn remove(&mut self, variable: DomainId, value: i32) -> Result<bool, Contradiction> {
        let cause = self.cause();
        self.assignments.remove_value(variable, value, cause)
    }

    pub fn remove_interval(
        &mut self,
        variable: DomainId,
        from: i32,
        to: i32,
    ) -> Result<bool, Contradiction> {
        let cause = self.cause();
        self.assignments.remove_interval(variable, from, to, cause)
    }

    pub fn set_lower_bound(
        &mut self,
        variable: DomainId,
        bound: i32,
    ) -> Result<bool, Contradiction> {
        let cause = self.cause();
        self.assignments.update_lower_bound(variable, bound, cause)
    }

    pub fn set_upper_bound(
        &mut self,
        variable: DomainId,
        bound: i32,
    ) -> Result<bool, Contradiction> {
        let cause = self.cause();
        self.assignments.update_upper_bound(variable, bound, cause)
    }

    pub fn assign(&mut self, variable: DomainId, value: i32) -> Result<bool, Contradiction> {
        let cause = self.cause();
        self.assignments.instantiate(variable, value, cause)
    }

    pub fn remove_node(&mut self, graph: GraphId, node: usize) -> Result<bool, Contradiction> {
        let cause = self.cause();
        self.assignments.remove_node(graph, node, cause)
    }

    pub fn remove_edge(
        &mut self,
        graph: GraphId,
        from: usize,
        to: usize,
    ) -> Result<bool, Contradiction> {
        let cause = self.cause();
        self.assignments.remove_edge(graph, from, to, cause)
    }

    pub fn enforce_node(&mut self, graph: GraphId, node: usize) -> Result<bool, Contradiction> {
        let cause = self.cause();
        self.assignments.enforce_node(graph, node, cause)
    }

    pub fn enforce_edge(
        &mut self,
        graph: GraphId,
        from: usize,
        to: usize,
    ) -> Result<bool, Contradiction> {
        let cause = self.cause();
        self.assignments.enforce_edge(graph, from, to, cause)
    }

    pub fn assign_trailed(&mut self, integer: TrailedInteger, value: i64) {
        self.assignments.environment.assign(integer, value);
    }

    /// Returns the new value.
    pub fn add_assign_trailed(&mut self, integer: TrailedInteger, addition: i64) -> i64 {
        self.assignments.environment.add_assign(integer, addition)
    }

    pub fn set_trailed_bit(&mut self, bit_set: TrailedBitSet, index: usize) {
        self.assignments.environment.set_bit(bit_set, index);
    }

    pub fn clear_trailed_bit(&mut self, bit_set: TrailedBitSet, index: usize) {
        self.assignments.environment.clear_bit(bit_set, index);
    }

    /// Returns whether the element was absent.
    pub fn trailed_set_insert(&mut self, set: TrailedSet, element: usize) -> bool {
        self.assignments.environment.set_insert(set, element)
    }

    /// Returns whether the element was present.
    pub fn trailed_set_remove(&mut self, set: TrailedSet, element: usize) -> bool {
        self.assignments.environment.set_remove(set, element)
    }
}
