use super::Domains;
use super::LocalId;
use super::Propagator;
use super::PropagatorId;
use super::Watcher;
use crate::engine::delta::DeltaMonitor;
use crate::engine::graph::GraphEvents;
use crate::engine::notifications::DomainEvents;
use crate::engine::trailed::SetType;
use crate::engine::trailed::TrailedBitSet;
use crate::engine::trailed::TrailedInteger;
use crate::engine::trailed::TrailedSet;
use crate::engine::variables::DomainId;
use crate::engine::variables::GraphId;
use crate::engine::variables::Subject;
use crate::engine::State;

/// Creates a propagator and subscribes it to the events it needs.
pub trait PropagatorConstructor {
    type PropagatorImpl: Propagator;

    fn create(self, context: PropagatorConstructorContext) -> Self::PropagatorImpl;
}

/// Passed to [`PropagatorConstructor::create`].
///
/// Every registered variable becomes part of the scope of the propagator. The scope is used to
/// explain the changes the propagator makes, so a propagator has to register every variable it
/// reads, if necessary with [`DomainEvents::NONE`].
#[derive(Debug)]
pub struct PropagatorConstructorContext<'a> {
    state: &'a mut State,
    propagator_id: PropagatorId,
}

impl<'a> PropagatorConstructorContext<'a> {
    pub(crate) fn new(state: &'a mut State, propagator_id: PropagatorId) -> Self {
        PropagatorConstructorContext {
            state,
            propagator_id,
        }
    }

    pub fn propagator_id(&self) -> PropagatorId {
        self.propagator_id
    }

    pub fn domains(&self) -> Domains<'_> {
        Domains::new(&self.state.assignments)
    }

    /// Subscribes to `events` of `variable`; notifications refer to it by `local_id`.
    pub fn register(&mut self, variable: DomainId, events: DomainEvents, local_id: LocalId) {
        let watcher = Watcher {
            propagator: self.propagator_id,
            variable: local_id,
        };
        self.state
            .notification_engine
            .watch_domain(variable, events.events(), watcher);
        self.state
            .add_to_scope(self.propagator_id, Subject::Integer(variable));
    }

    pub fn register_graph(&mut self, graph: GraphId, events: GraphEvents, local_id: LocalId) {
        let watcher = Watcher {
            propagator: self.propagator_id,
            variable: local_id,
        };
        self.state
            .notification_engine
            .watch_graph(graph, events.events(), watcher);
        self.state
            .add_to_scope(self.propagator_id, Subject::Graph(graph));
    }

    /// A started monitor on the removals of `variable`.
    pub fn delta_monitor(&self, variable: DomainId) -> DeltaMonitor {
        let assignments = &self.state.assignments;
        let node_stamp = assignments.node_stamp();
        let mut monitor = DeltaMonitor::new(variable, self.propagator_id);
        monitor.start_at(node_stamp, assignments.delta(variable).visible(node_stamp).len());
        monitor
    }

    pub fn new_trailed_integer(&mut self, initial_value: i64) -> TrailedInteger {
        self.state.assignments.environment.make_int(initial_value)
    }

    pub fn new_trailed_bit_set(&mut self, capacity: usize) -> TrailedBitSet {
        self.state.assignments.environment.make_bit_set(capacity)
    }

    pub fn new_trailed_set(&mut self, set_type: SetType, capacity: usize) -> TrailedSet {
        self.state.assignments.environment.make_set(set_type, capacity)
    }

    /// Sets bits of a trailed bitset created by this context; the change is undone when the
    /// solver backtracks past the current world.
    pub fn set_trailed_bit(&mut self, bit_set: TrailedBitSet, index: usize) {
        self.state.assignments.environment.set_bit(bit_set, index);
    }

    pub fn trailed_set_insert(&mut self, set: TrailedSet, element: usize) -> bool {
        self.state.assignments.environment.set_insert(set, element)
    }
}
