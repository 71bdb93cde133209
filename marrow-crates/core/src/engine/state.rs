use super::notifications::NotificationEngine;
use super::trailed::SetType;
use super::variables::DomainId;
use super::variables::GraphId;
use super::variables::Subject;
use super::Assignments;
use super::PropagatorQueue;
use crate::basic_types::PropagationStatus;
use crate::containers::KeyedVec;
use crate::create_statistics_struct;
use crate::marrow_assert_moderate;
use crate::marrow_assert_simple;
use crate::propagation::store::PropagatorStore;
use crate::propagation::Domains;
use crate::propagation::EntailmentStatus;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorHandle;
use crate::propagation::PropagatorId;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(StateStatistics {
    num_propagator_calls: u64,
    num_contradictions: u64,
});

/// The variables and propagators of a solver, and the fixpoint computation over them.
///
/// Changes made through [`State::new_checkpoint`] and [`State::restore_to`] are the only way
/// worlds are created and left.
#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) assignments: Assignments,
    pub(crate) propagators: PropagatorStore,
    pub(crate) propagator_queue: PropagatorQueue,
    pub(crate) notification_engine: NotificationEngine,
    /// The variables each propagator registered.
    scopes: KeyedVec<PropagatorId, Vec<Subject>>,
    /// Propagators which have not yet run since they were added.
    pending_from_scratch: KeyedVec<PropagatorId, bool>,
    statistics: StateStatistics,
}

/// Variables.
impl State {
    pub(crate) fn new_interval_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        marrow_assert_simple!(lower_bound <= upper_bound, "empty initial domain");
        self.assignments.new_interval_domain(lower_bound, upper_bound)
    }

    /// Creates an enumerated variable from arbitrary values; duplicates are ignored.
    pub(crate) fn new_sparse_variable(&mut self, mut values: Vec<i32>) -> DomainId {
        values.sort_unstable();
        values.dedup();
        marrow_assert_simple!(!values.is_empty(), "empty initial domain");
        self.assignments.new_enumerated_domain(&values)
    }

    pub(crate) fn new_graph_variable(
        &mut self,
        num_nodes: usize,
        directed: bool,
        set_type: SetType,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> GraphId {
        self.assignments
            .new_graph(num_nodes, directed, set_type, edges)
    }

    pub(crate) fn domains(&self) -> Domains<'_> {
        Domains::new(&self.assignments)
    }

    pub(crate) fn lower_bound(&self, variable: DomainId) -> i32 {
        self.assignments.lower_bound(variable)
    }

    pub(crate) fn upper_bound(&self, variable: DomainId) -> i32 {
        self.assignments.upper_bound(variable)
    }

    pub(crate) fn contains(&self, variable: DomainId, value: i32) -> bool {
        self.assignments.contains(variable, value)
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.assignments.world_index()
    }

    pub(crate) fn scope(&self, propagator_id: PropagatorId) -> &[Subject] {
        self.scopes
            .get(propagator_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn add_to_scope(&mut self, propagator_id: PropagatorId, subject: Subject) {
        self.scopes.accommodate(propagator_id, Vec::new());
        if !self.scopes[propagator_id].contains(&subject) {
            self.scopes[propagator_id].push(subject);
        }
    }
}

/// Propagators.
impl State {
    /// Adds the propagator and enqueues it; it is run from scratch by the next call to
    /// [`State::propagate_to_fixed_point`].
    pub(crate) fn add_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> PropagatorHandle<Constructor::PropagatorImpl> {
        let handle = self.propagators.next_handle();
        let propagator_id = handle.propagator_id();

        let propagator =
            constructor.create(PropagatorConstructorContext::new(self, propagator_id));
        let priority = propagator.priority();

        let added = self.propagators.push(propagator);
        marrow_assert_simple!(
            added.propagator_id() == propagator_id,
            "propagators were added while constructing one"
        );

        self.scopes.accommodate(propagator_id, Vec::new());
        self.pending_from_scratch.accommodate(propagator_id, false);
        self.pending_from_scratch[propagator_id] = true;
        self.propagator_queue
            .enqueue_propagator(propagator_id, priority);

        handle
    }

    pub(crate) fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self.propagators.get_propagator(handle)
    }

    pub(crate) fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger.clone());
        for (index, propagator) in self.propagators.iter_propagators().enumerate() {
            propagator.log_statistics(
                statistic_logger
                    .attach_to_prefix(propagator.name())
                    .attach_to_prefix(index),
            );
        }
    }

    /// Whether every propagator accepts the current, fully instantiated, domains.
    pub(crate) fn all_propagators_satisfied(&self) -> bool {
        let domains = self.domains();
        self.propagators
            .iter_propagators()
            .all(|propagator| propagator.is_entailed(domains) != EntailmentStatus::Violated)
    }
}

/// Worlds and propagation.
impl State {
    /// Opens a new world; [`State::restore_to`] with the current checkpoint undoes every change
    /// made from here on.
    pub(crate) fn new_checkpoint(&mut self) {
        marrow_assert_moderate!(self.propagator_queue.is_empty());
        self.assignments.world_push();
    }

    /// Backtracks to `checkpoint` and lets every propagator synchronise.
    pub(crate) fn restore_to(&mut self, checkpoint: usize) {
        marrow_assert_simple!(checkpoint <= self.get_checkpoint());
        self.assignments.world_pop_until(checkpoint);
        self.propagator_queue.clear();

        let domains = Domains::new(&self.assignments);
        for propagator in self.propagators.iter_propagators_mut() {
            propagator.synchronise(domains);
        }
    }

    fn propagate(&mut self, propagator_id: PropagatorId) -> PropagationStatus {
        self.statistics.num_propagator_calls += 1;

        let from_scratch = std::mem::replace(&mut self.pending_from_scratch[propagator_id], false);
        let propagator = &mut self.propagators[propagator_id];
        let context = PropagationContext::new(&mut self.assignments, propagator_id);
        let status = if from_scratch {
            propagator.propagate_from_scratch(context)
        } else {
            propagator.propagate(context)
        };

        if status.is_err() {
            self.statistics.num_contradictions += 1;
        }
        status
    }

    /// Runs the enqueued propagators, and the propagators they wake up, until none is left or one
    /// of them fails.
    ///
    /// On failure the queue and the pending events are discarded; the state is then only useful
    /// for [`State::restore_to`].
    pub(crate) fn propagate_to_fixed_point(&mut self) -> PropagationStatus {
        self.notification_engine.notify_propagators(
            &mut self.assignments,
            &mut self.propagators,
            &mut self.propagator_queue,
        );

        while let Some(propagator_id) = self.propagator_queue.pop() {
            let status = self.propagate(propagator_id);
            if let Err(contradiction) = status {
                log::trace!("{contradiction}");
                self.propagator_queue.clear();
                self.assignments.clear_pending_events();
                return Err(contradiction);
            }

            self.notification_engine.notify_propagators(
                &mut self.assignments,
                &mut self.propagators,
                &mut self.propagator_queue,
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::DomainEvents;
    use crate::propagation::LocalId;
    use crate::propagation::ReadDomains;

    /// `left < right`, on bounds.
    #[derive(Clone, Debug)]
    struct LessThan {
        left: DomainId,
        right: DomainId,
    }

    impl PropagatorConstructor for LessThan {
        type PropagatorImpl = LessThan;

        fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
            context.register(self.left, DomainEvents::BOUNDS, LocalId::from(0));
            context.register(self.right, DomainEvents::BOUNDS, LocalId::from(1));
            self
        }
    }

    impl Propagator for LessThan {
        fn name(&self) -> &str {
            "LessThan"
        }

        fn propagate_from_scratch(&mut self, mut context: PropagationContext) -> PropagationStatus {
            let right_upper_bound = context.upper_bound(self.right);
            let _ = context.set_upper_bound(self.left, right_upper_bound - 1)?;
            let left_lower_bound = context.lower_bound(self.left);
            let _ = context.set_lower_bound(self.right, left_lower_bound + 1)?;
            Ok(())
        }
    }

    #[test]
    fn propagating_at_a_fixed_point_changes_nothing() {
        let mut state = State::default();
        let x = state.new_interval_variable(0, 10);
        let y = state.new_interval_variable(0, 10);
        let z = state.new_interval_variable(0, 10);
        let _ = state.add_propagator(LessThan { left: x, right: y });
        let _ = state.add_propagator(LessThan { left: y, right: z });

        state.propagate_to_fixed_point().expect("no conflict");
        assert_eq!((state.lower_bound(z), state.upper_bound(x)), (2, 8));

        let time_stamp = state.assignments.environment.time_stamp();
        let num_calls = state.statistics.num_propagator_calls;
        state.propagate_to_fixed_point().expect("no conflict");

        assert_eq!(state.assignments.environment.time_stamp(), time_stamp);
        assert_eq!(state.statistics.num_propagator_calls, num_calls);
        assert!(state.propagator_queue.is_empty());
    }

    #[test]
    fn a_contradiction_empties_the_queue() {
        let mut state = State::default();
        let x = state.new_interval_variable(0, 3);
        let y = state.new_interval_variable(0, 3);
        let _ = state.add_propagator(LessThan { left: x, right: y });
        let _ = state.add_propagator(LessThan { left: y, right: x });

        assert!(state.propagate_to_fixed_point().is_err());
        assert!(state.propagator_queue.is_empty());
        assert!(!state.assignments.has_pending_events());
    }
}
