use enumset::EnumSet;

use super::delta::IntDelta;
use super::domains::BitSetDomain;
use super::domains::DomainRanges;
use super::domains::DomainUpdate;
use super::domains::DomainValues;
use super::domains::IntegerDomain;
use super::domains::IntervalDomain;
use super::graph::GraphEvent;
use super::graph::GraphUpdate;
use super::graph::GraphVariable;
use super::graph::GraphView;
use super::notifications::DomainEvent;
use super::trailed::Environment;
use super::trailed::SetType;
use super::variables::DomainId;
use super::variables::GraphId;
use super::variables::Subject;
use crate::basic_types::Cause;
use crate::basic_types::Contradiction;
use crate::basic_types::GraphElement;
use crate::basic_types::Solution;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;

/// One change to a variable, kept when changes have to be explained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LoggedChange {
    pub(crate) subject: Subject,
    pub(crate) cause: Cause,
}

/// The variables of a solver together with the backtrackable storage backing them.
///
/// Every change is turned into events which wait here until the notification engine collects
/// them, and is optionally logged together with its cause.
#[derive(Debug, Default)]
pub struct Assignments {
    pub(crate) environment: Environment,
    domains: KeyedVec<DomainId, IntegerDomain>,
    deltas: KeyedVec<DomainId, IntDelta>,
    graphs: KeyedVec<GraphId, GraphVariable>,
    pending_domain_events: Vec<(DomainId, DomainEvent)>,
    pending_graph_events: Vec<(GraphId, GraphEvent, GraphElement)>,
    graph_event_buffer: Vec<(GraphEvent, GraphElement)>,
    change_log: Option<Trail<LoggedChange>>,
}

/// Variables.
impl Assignments {
    pub(crate) fn domain_ids(&self) -> impl Iterator<Item = DomainId> {
        self.domains.keys()
    }

    pub(crate) fn graph_ids(&self) -> impl Iterator<Item = GraphId> {
        self.graphs.keys()
    }

    pub(crate) fn new_interval_domain(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        let domain = IntervalDomain::new(&mut self.environment, lower_bound, upper_bound);
        self.push_domain(IntegerDomain::Interval(domain))
    }

    /// Creates an enumerated domain from strictly increasing `values`.
    pub(crate) fn new_enumerated_domain(&mut self, values: &[i32]) -> DomainId {
        let domain = BitSetDomain::new(&mut self.environment, values);
        self.push_domain(IntegerDomain::BitSet(domain))
    }

    fn push_domain(&mut self, domain: IntegerDomain) -> DomainId {
        let _ = self.deltas.push(IntDelta::default());
        self.domains.push(domain)
    }

    pub(crate) fn new_graph(
        &mut self,
        num_nodes: usize,
        directed: bool,
        set_type: SetType,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> GraphId {
        let graph = GraphVariable::new(&mut self.environment, num_nodes, directed, set_type, edges);
        self.graphs.push(graph)
    }
}

/// Reads.
impl Assignments {
    pub(crate) fn lower_bound(&self, domain: DomainId) -> i32 {
        self.domains[domain].lower_bound(&self.environment)
    }

    pub(crate) fn upper_bound(&self, domain: DomainId) -> i32 {
        self.domains[domain].upper_bound(&self.environment)
    }

    pub(crate) fn size(&self, domain: DomainId) -> usize {
        self.domains[domain].size(&self.environment)
    }

    pub(crate) fn contains(&self, domain: DomainId, value: i32) -> bool {
        self.domains[domain].contains(&self.environment, value)
    }

    pub(crate) fn next_value(&self, domain: DomainId, value: i32) -> i32 {
        self.domains[domain].next_value(&self.environment, value)
    }

    pub(crate) fn previous_value(&self, domain: DomainId, value: i32) -> i32 {
        self.domains[domain].previous_value(&self.environment, value)
    }

    pub(crate) fn values(&self, domain: DomainId) -> DomainValues<'_> {
        self.domains[domain].values(&self.environment)
    }

    pub(crate) fn ranges(&self, domain: DomainId) -> DomainRanges<'_> {
        self.domains[domain].ranges(&self.environment)
    }

    pub(crate) fn envelope(&self, graph: GraphId) -> GraphView<'_> {
        self.graphs[graph].envelope(&self.environment)
    }

    pub(crate) fn kernel(&self, graph: GraphId) -> GraphView<'_> {
        self.graphs[graph].kernel(&self.environment)
    }

    pub(crate) fn is_graph_instantiated(&self, graph: GraphId) -> bool {
        self.graphs[graph].is_instantiated(&self.environment)
    }

    pub(crate) fn all_instantiated(&self) -> bool {
        self.domains.keys().all(|domain| self.size(domain) == 1)
            && self.graphs.keys().all(|graph| self.is_graph_instantiated(graph))
    }

    /// Snapshot of the current values; every variable has to be instantiated.
    pub(crate) fn solution(&self) -> Solution {
        let mut integers = KeyedVec::default();
        for domain in self.domains.keys() {
            let _ = integers.push(self.lower_bound(domain));
        }
        let mut graphs = KeyedVec::default();
        for graph in self.graphs.keys() {
            let _ = graphs.push(self.graphs[graph].value(&self.environment));
        }
        Solution::new(integers, graphs)
    }

    pub(crate) fn delta(&self, domain: DomainId) -> &IntDelta {
        &self.deltas[domain]
    }

    pub(crate) fn node_stamp(&self) -> u64 {
        self.environment.node_stamp()
    }
}

/// Integer changes.
impl Assignments {
    fn change_domain(
        &mut self,
        domain: DomainId,
        cause: Cause,
        change: impl FnOnce(&IntegerDomain, &mut DomainUpdate<'_>) -> Result<bool, Contradiction>,
    ) -> Result<bool, Contradiction> {
        let representation = self.domains[domain];
        let lower_bound = representation.lower_bound(&self.environment);
        let upper_bound = representation.upper_bound(&self.environment);

        let mut update = DomainUpdate {
            environment: &mut self.environment,
            delta: &mut self.deltas[domain],
            domain,
            cause,
        };
        if !change(&representation, &mut update)? {
            return Ok(false);
        }

        self.environment.tick();
        let mut events = EnumSet::only(DomainEvent::Removal);
        let new_lower_bound = representation.lower_bound(&self.environment);
        let new_upper_bound = representation.upper_bound(&self.environment);
        if new_lower_bound != lower_bound {
            events |= DomainEvent::LowerBound;
        }
        if new_upper_bound != upper_bound {
            events |= DomainEvent::UpperBound;
        }
        if new_lower_bound == new_upper_bound {
            events |= DomainEvent::Assign;
        }
        self.pending_domain_events
            .extend(events.iter().map(|event| (domain, event)));
        self.log_change(Subject::Integer(domain), cause);

        Ok(true)
    }

    pub(crate) fn remove_value(
        &mut self,
        domain: DomainId,
        value: i32,
        cause: Cause,
    ) -> Result<bool, Contradiction> {
        self.change_domain(domain, cause, |representation, update| {
            representation.remove_value(update, value)
        })
    }

    pub(crate) fn remove_interval(
        &mut self,
        domain: DomainId,
        from: i32,
        to: i32,
        cause: Cause,
    ) -> Result<bool, Contradiction> {
        self.change_domain(domain, cause, |representation, update| {
            representation.remove_interval(update, from, to)
        })
    }

    pub(crate) fn update_lower_bound(
        &mut self,
        domain: DomainId,
        bound: i32,
        cause: Cause,
    ) -> Result<bool, Contradiction> {
        self.change_domain(domain, cause, |representation, update| {
            representation.update_lower_bound(update, bound)
        })
    }

    pub(crate) fn update_upper_bound(
        &mut self,
        domain: DomainId,
        bound: i32,
        cause: Cause,
    ) -> Result<bool, Contradiction> {
        self.change_domain(domain, cause, |representation, update| {
            representation.update_upper_bound(update, bound)
        })
    }

    pub(crate) fn instantiate(
        &mut self,
        domain: DomainId,
        value: i32,
        cause: Cause,
    ) -> Result<bool, Contradiction> {
        self.change_domain(domain, cause, |representation, update| {
            representation.instantiate(update, value)
        })
    }
}

/// Graph changes.
impl Assignments {
    fn change_graph(
        &mut self,
        graph: GraphId,
        cause: Cause,
        change: impl FnOnce(&GraphVariable, &mut GraphUpdate<'_>) -> Result<bool, Contradiction>,
    ) -> Result<bool, Contradiction> {
        self.graph_event_buffer.clear();
        let mut update = GraphUpdate {
            environment: &mut self.environment,
            graph,
            cause,
            events: &mut self.graph_event_buffer,
        };
        let result = change(&self.graphs[graph], &mut update);

        // Removing a node may have removed edges before failing.
        if !self.graph_event_buffer.is_empty() {
            self.environment.tick();
            self.pending_graph_events.extend(
                self.graph_event_buffer
                    .iter()
                    .map(|&(event, element)| (graph, event, element)),
            );
            self.log_change(Subject::Graph(graph), cause);
        }

        result
    }

    pub(crate) fn remove_node(
        &mut self,
        graph: GraphId,
        node: usize,
        cause: Cause,
    ) -> Result<bool, Contradiction> {
        self.change_graph(graph, cause, |variable, update| {
            variable.remove_node(update, node)
        })
    }

    pub(crate) fn remove_edge(
        &mut self,
        graph: GraphId,
        from: usize,
        to: usize,
        cause: Cause,
    ) -> Result<bool, Contradiction> {
        self.change_graph(graph, cause, |variable, update| {
            variable.remove_edge(update, from, to)
        })
    }

    pub(crate) fn enforce_node(
        &mut self,
        graph: GraphId,
        node: usize,
        cause: Cause,
    ) -> Result<bool, Contradiction> {
        self.change_graph(graph, cause, |variable, update| {
            variable.enforce_node(update, node)
        })
    }

    pub(crate) fn enforce_edge(
        &mut self,
        graph: GraphId,
        from: usize,
        to: usize,
        cause: Cause,
    ) -> Result<bool, Contradiction> {
        self.change_graph(graph, cause, |variable, update| {
            variable.enforce_edge(update, from, to)
        })
    }
}

/// Events, worlds and the change log.
impl Assignments {
    /// Moves the pending integer events into `buffer`, replacing its contents.
    pub(crate) fn take_domain_events(&mut self, buffer: &mut Vec<(DomainId, DomainEvent)>) {
        buffer.clear();
        std::mem::swap(buffer, &mut self.pending_domain_events);
    }

    /// Moves the pending graph events into `buffer`, replacing its contents.
    pub(crate) fn take_graph_events(
        &mut self,
        buffer: &mut Vec<(GraphId, GraphEvent, GraphElement)>,
    ) {
        buffer.clear();
        std::mem::swap(buffer, &mut self.pending_graph_events);
    }

    pub(crate) fn has_pending_events(&self) -> bool {
        !self.pending_domain_events.is_empty() || !self.pending_graph_events.is_empty()
    }

    pub(crate) fn clear_pending_events(&mut self) {
        self.pending_domain_events.clear();
        self.pending_graph_events.clear();
    }

    pub(crate) fn world_index(&self) -> usize {
        self.environment.world_index()
    }

    pub(crate) fn world_push(&mut self) {
        self.environment.world_push();
        if let Some(change_log) = self.change_log.as_mut() {
            change_log.new_checkpoint();
        }
    }

    pub(crate) fn world_pop_until(&mut self, world: usize) {
        if world == self.world_index() {
            return;
        }
        self.environment.world_pop_until(world);
        if let Some(change_log) = self.change_log.as_mut() {
            let _ = change_log.synchronise(world);
        }
        self.clear_pending_events();
    }

    /// Starts logging the cause of every change; the log starts empty in the current world.
    pub(crate) fn enable_change_log(&mut self) {
        let mut change_log = Trail::default();
        for _ in 0..self.world_index() {
            change_log.new_checkpoint();
        }
        self.change_log = Some(change_log);
    }

    /// The logged changes made below the root world, oldest first. Root changes cannot depend on
    /// decisions, so they are never part of an explanation.
    pub(crate) fn changes_since_root(&self) -> Option<&[LoggedChange]> {
        self.change_log.as_ref().map(|change_log| {
            if change_log.get_checkpoint() == 0 {
                &[][..]
            } else {
                change_log.entries_since(1)
            }
        })
    }

    fn log_change(&mut self, subject: Subject, cause: Cause) {
        if let Some(change_log) = self.change_log.as_mut() {
            change_log.push(LoggedChange { subject, cause });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_describe_the_change() {
        let mut assignments = Assignments::default();
        let x = assignments.new_enumerated_domain(&[1, 2, 3, 5]);

        let mut buffer = Vec::new();

        let _ = assignments.remove_value(x, 3, Cause::Root).unwrap();
        assignments.take_domain_events(&mut buffer);
        assert_eq!(buffer, vec![(x, DomainEvent::Removal)]);

        let _ = assignments.update_upper_bound(x, 2, Cause::Root).unwrap();
        assignments.take_domain_events(&mut buffer);
        let events = buffer.iter().map(|&(_, event)| event).collect::<EnumSet<_>>();
        assert_eq!(events, DomainEvent::Removal | DomainEvent::UpperBound);

        let _ = assignments.instantiate(x, 2, Cause::Root).unwrap();
        assignments.take_domain_events(&mut buffer);
        let events = buffer.iter().map(|&(_, event)| event).collect::<EnumSet<_>>();
        assert_eq!(
            events,
            DomainEvent::Removal | DomainEvent::LowerBound | DomainEvent::Assign
        );
    }

    #[test]
    fn unchanged_domains_raise_no_events() {
        let mut assignments = Assignments::default();
        let x = assignments.new_interval_domain(0, 10);

        assert!(!assignments.update_lower_bound(x, -4, Cause::Root).unwrap());
        assert!(!assignments.remove_value(x, 5, Cause::Root).unwrap());
        assert!(assignments.update_lower_bound(x, 11, Cause::Root).is_err());

        assert!(!assignments.has_pending_events());
        assert_eq!(assignments.environment.time_stamp(), 0);
    }

    #[test]
    fn change_log_follows_the_worlds() {
        let mut assignments = Assignments::default();
        assignments.enable_change_log();
        let x = assignments.new_interval_domain(0, 10);

        let _ = assignments.update_lower_bound(x, 1, Cause::Root).unwrap();
        assert_eq!(assignments.changes_since_root().map(<[_]>::len), Some(0));

        assignments.world_push();
        let _ = assignments
            .update_lower_bound(x, 2, Cause::Decision { depth: 1 })
            .unwrap();
        assert_eq!(
            assignments.changes_since_root(),
            Some(
                &[LoggedChange {
                    subject: Subject::Integer(x),
                    cause: Cause::Decision { depth: 1 }
                }][..]
            )
        );

        assignments.world_pop_until(0);
        assignments.world_push();
        assert_eq!(assignments.changes_since_root().map(<[_]>::len), Some(0));
    }
}
