use super::RemovedRange;
use crate::basic_types::Cause;
use crate::basic_types::PropagationStatus;
use crate::engine::variables::DomainId;
use crate::marrow_assert_simple;
use crate::propagation::HasAssignments;
use crate::propagation::PropagationContext;
use crate::propagation::PropagatorId;
use crate::propagation::ReadDomains;

/// A cursor of one propagator into the delta of one variable.
///
/// The monitor hands out the removals which happened since it was last frozen, leaving out the
/// removals performed by the owning propagator itself.
///
/// Deltas only cover the current search node, so a monitor has to be started (see
/// [`DeltaMonitor::start_monitoring`]) in every node before it is frozen there. Monitors obtained
/// from
/// [`PropagatorConstructorContext::delta_monitor`](crate::propagation::PropagatorConstructorContext::delta_monitor)
/// are started in the node in which the propagator is created.
///
/// Freezing a monitor which was not started in the current node, or freezing it twice without
/// any change to the domains in between, is a bug in the propagator and panics.
#[derive(Clone, Debug)]
pub struct DeltaMonitor {
    variable: DomainId,
    owner: PropagatorId,
    /// The node stamp of the node in which the monitor was last started.
    started_in: Option<u64>,
    /// The time stamp of the last freeze since the monitor was started.
    frozen_at: Option<u64>,
    consumed: usize,
    window: Vec<RemovedRange>,
}

impl DeltaMonitor {
    pub(crate) fn new(variable: DomainId, owner: PropagatorId) -> DeltaMonitor {
        DeltaMonitor {
            variable,
            owner,
            started_in: None,
            frozen_at: None,
            consumed: 0,
            window: Vec::new(),
        }
    }

    pub fn variable(&self) -> DomainId {
        self.variable
    }

    /// Whether the monitor was started in the current search node.
    pub fn is_started(&self, domains: &impl ReadDomains) -> bool {
        self.started_in == Some(domains.node_stamp())
    }

    /// Starts monitoring in the current node, skipping every removal which happened before this
    /// call.
    pub fn start_monitoring(&mut self, context: &PropagationContext<'_>) {
        let assignments = context.assignments();
        let node_stamp = assignments.node_stamp();
        self.start_at(node_stamp, assignments.delta(self.variable).visible(node_stamp).len());
    }

    pub(crate) fn start_at(&mut self, node_stamp: u64, consumed: usize) {
        self.started_in = Some(node_stamp);
        self.frozen_at = None;
        self.consumed = consumed;
    }

    /// Captures the removals since the start or the previous freeze; they are consumed by this
    /// call.
    ///
    /// # Panics
    /// If the monitor was not started in the current node, or if it was already frozen and the
    /// domains did not change since.
    pub fn freeze(&mut self, context: &PropagationContext<'_>) -> FrozenDelta<'_> {
        let assignments = context.assignments();
        let node_stamp = assignments.node_stamp();
        let time_stamp = assignments.environment.time_stamp();
        marrow_assert_simple!(
            self.started_in == Some(node_stamp),
            "the delta monitor of {} was frozen before it was started in this node",
            self.variable
        );
        marrow_assert_simple!(
            self.frozen_at != Some(time_stamp),
            "the delta monitor of {} was frozen twice without a change in between",
            self.variable
        );
        self.frozen_at = Some(time_stamp);

        let entries = assignments.delta(self.variable).visible(node_stamp);
        let own_cause = Cause::Propagator(self.owner);
        self.window.clear();
        self.window.extend(
            entries[self.consumed..]
                .iter()
                .filter(|entry| entry.cause != own_cause)
                .copied(),
        );
        self.consumed = entries.len();

        FrozenDelta {
            entries: &self.window,
        }
    }
}

/// The removals captured by [`DeltaMonitor::freeze`].
#[derive(Clone, Copy, Debug)]
pub struct FrozenDelta<'a> {
    entries: &'a [RemovedRange],
}

impl<'a> FrozenDelta<'a> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn removed_ranges(&self) -> &'a [RemovedRange] {
        self.entries
    }

    pub fn removed_values(&self) -> impl Iterator<Item = i32> + 'a {
        self.entries.iter().flat_map(RemovedRange::values)
    }

    /// Applies `action` to every removed value, stopping at the first contradiction.
    pub fn for_each_removed_value(
        &self,
        mut action: impl FnMut(i32) -> PropagationStatus,
    ) -> PropagationStatus {
        for value in self.removed_values() {
            action(value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Assignments;
    use crate::propagation::Domains;

    const OWNER: PropagatorId = PropagatorId(0);

    fn setup() -> (Assignments, DomainId, DeltaMonitor) {
        let mut assignments = Assignments::default();
        let variable = assignments.new_enumerated_domain(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let mut monitor = DeltaMonitor::new(variable, OWNER);
        monitor.start_monitoring(&PropagationContext::new(&mut assignments, OWNER));
        (assignments, variable, monitor)
    }

    fn frozen_values(assignments: &mut Assignments, monitor: &mut DeltaMonitor) -> Vec<i32> {
        let context = PropagationContext::new(assignments, OWNER);
        monitor.freeze(&context).removed_values().collect()
    }

    #[test]
    fn removals_of_others_are_reported_once() {
        let (mut assignments, variable, mut monitor) = setup();

        let _ = assignments
            .remove_value(variable, 3, Cause::Root)
            .expect("non-empty domain");
        let _ = assignments
            .remove_interval(variable, 5, 6, Cause::Decision { depth: 1 })
            .expect("non-empty domain");
        assert_eq!(frozen_values(&mut assignments, &mut monitor), vec![3, 5, 6]);

        let _ = assignments
            .remove_value(variable, 8, Cause::Root)
            .expect("non-empty domain");
        assert_eq!(frozen_values(&mut assignments, &mut monitor), vec![8]);
    }

    #[test]
    fn own_removals_are_left_out() {
        let (mut assignments, variable, mut monitor) = setup();

        let mut context = PropagationContext::new(&mut assignments, OWNER);
        let _ = context.remove(variable, 2).expect("non-empty domain");
        let _ = assignments
            .remove_value(variable, 4, Cause::Root)
            .expect("non-empty domain");

        assert_eq!(frozen_values(&mut assignments, &mut monitor), vec![4]);
    }

    #[test]
    fn restarting_in_a_new_node_only_reports_later_removals() {
        let (mut assignments, variable, mut monitor) = setup();
        assignments.world_push();
        let _ = assignments
            .remove_value(variable, 1, Cause::Root)
            .expect("non-empty domain");

        monitor.start_monitoring(&PropagationContext::new(&mut assignments, OWNER));
        let _ = assignments
            .remove_value(variable, 7, Cause::Root)
            .expect("non-empty domain");

        assert_eq!(frozen_values(&mut assignments, &mut monitor), vec![7]);
        assert!(monitor.is_started(&Domains::new(&assignments)));

        assignments.world_pop_until(0);
        assert!(!monitor.is_started(&Domains::new(&assignments)));
    }

    #[test]
    #[should_panic(expected = "before it was started in this node")]
    fn freezing_in_a_node_without_a_start_panics() {
        let (mut assignments, variable, mut monitor) = setup();
        assignments.world_push();
        let _ = assignments
            .remove_value(variable, 3, Cause::Root)
            .expect("non-empty domain");

        let _ = frozen_values(&mut assignments, &mut monitor);
    }

    #[test]
    #[should_panic(expected = "frozen twice without a change in between")]
    fn freezing_twice_without_a_change_panics() {
        let (mut assignments, variable, mut monitor) = setup();
        let _ = assignments
            .remove_value(variable, 3, Cause::Root)
            .expect("non-empty domain");

        let _ = frozen_values(&mut assignments, &mut monitor);
        let _ = frozen_values(&mut assignments, &mut monitor);
    }
}
