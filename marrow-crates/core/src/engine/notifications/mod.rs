//! Delivers the events of changed variables to the propagators watching them.
mod domain_events;

pub use domain_events::DomainEvent;
pub use domain_events::DomainEvents;
use enum_map::EnumMap;
use enumset::EnumSet;

use super::graph::GraphEvent;
use super::Assignments;
use super::PropagatorQueue;
use crate::basic_types::GraphElement;
use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;
use crate::engine::variables::GraphId;
use crate::propagation::store::PropagatorStore;
use crate::propagation::Domains;
use crate::propagation::EnqueueDecision;
use crate::propagation::Watcher;

#[derive(Debug, Default)]
pub(crate) struct NotificationEngine {
    domain_watchers: KeyedVec<DomainId, EnumMap<DomainEvent, Vec<Watcher>>>,
    graph_watchers: KeyedVec<GraphId, EnumMap<GraphEvent, Vec<Watcher>>>,
    domain_events: Vec<(DomainId, DomainEvent)>,
    graph_events: Vec<(GraphId, GraphEvent, GraphElement)>,
}

impl NotificationEngine {
    pub(crate) fn watch_domain(
        &mut self,
        domain: DomainId,
        events: EnumSet<DomainEvent>,
        watcher: Watcher,
    ) {
        self.domain_watchers.accommodate(domain, EnumMap::default());
        for event in events {
            let watchers = &mut self.domain_watchers[domain][event];
            if !watchers.contains(&watcher) {
                watchers.push(watcher);
            }
        }
    }

    pub(crate) fn watch_graph(
        &mut self,
        graph: GraphId,
        events: EnumSet<GraphEvent>,
        watcher: Watcher,
    ) {
        self.graph_watchers.accommodate(graph, EnumMap::default());
        for event in events {
            let watchers = &mut self.graph_watchers[graph][event];
            if !watchers.contains(&watcher) {
                watchers.push(watcher);
            }
        }
    }

    /// Collects the pending events of `assignments` and enqueues every propagator which asks to
    /// be enqueued when notified, in the order in which the events happened.
    pub(crate) fn notify_propagators(
        &mut self,
        assignments: &mut Assignments,
        propagators: &mut PropagatorStore,
        queue: &mut PropagatorQueue,
    ) {
        while assignments.has_pending_events() {
            assignments.take_domain_events(&mut self.domain_events);
            assignments.take_graph_events(&mut self.graph_events);
            let domains = Domains::new(assignments);

            for &(domain, event) in &self.domain_events {
                let Some(watchers) = self.domain_watchers.get(domain) else {
                    continue;
                };
                for &watcher in &watchers[event] {
                    let propagator = &mut propagators[watcher.propagator];
                    let decision = propagator.notify(domains, watcher.variable, event);
                    if decision == EnqueueDecision::Enqueue {
                        queue.enqueue_propagator(watcher.propagator, propagator.priority());
                    }
                }
            }

            for &(graph, event, element) in &self.graph_events {
                let Some(watchers) = self.graph_watchers.get(graph) else {
                    continue;
                };
                for &watcher in &watchers[event] {
                    let propagator = &mut propagators[watcher.propagator];
                    let decision =
                        propagator.notify_graph(domains, watcher.variable, event, element);
                    if decision == EnqueueDecision::Enqueue {
                        queue.enqueue_propagator(watcher.propagator, propagator.priority());
                    }
                }
            }
        }
    }
}
