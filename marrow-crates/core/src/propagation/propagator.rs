use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use super::Domains;
use super::LocalId;
use super::PropagationContext;
#[cfg(doc)]
use super::PropagatorConstructor;
use crate::basic_types::GraphElement;
use crate::basic_types::PropagationStatus;
use crate::engine::graph::GraphEvent;
use crate::engine::notifications::DomainEvent;
use crate::statistics::StatisticLogger;

impl_downcast!(Propagator);

/// A filtering algorithm for one constraint.
///
/// Propagators are created through a [`PropagatorConstructor`], which also registers the events
/// the propagator reacts to. Data which has to be restored on backtracking is kept in trailed
/// values (see [`PropagationContext::assign_trailed`]); everything else survives backtracking and
/// can be brought up to date in [`Propagator::synchronise`].
///
/// Any domain operation may fail with a contradiction, which should be returned with `?`; the
/// solver then abandons the fixpoint and backtracks.
pub trait Propagator: Downcast {
    /// The name of the propagator, used when logging statistics.
    fn name(&self) -> &str;

    /// Removes every value which can be shown to be inconsistent with the current domains,
    /// without relying on anything learned in earlier calls.
    ///
    /// Called the first time the propagator runs.
    fn propagate_from_scratch(&mut self, context: PropagationContext) -> PropagationStatus;

    /// Propagates after one or more of the watched events occurred.
    ///
    /// Incremental propagators override this method; by default it propagates from scratch.
    fn propagate(&mut self, context: PropagationContext) -> PropagationStatus {
        self.propagate_from_scratch(context)
    }

    /// Called for every event the propagator registered for, including events caused by the
    /// propagator itself. Decides whether the propagator should be enqueued.
    fn notify(
        &mut self,
        _domains: Domains,
        _local_id: LocalId,
        _event: DomainEvent,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// The counterpart of [`Propagator::notify`] for graph variables.
    fn notify_graph(
        &mut self,
        _domains: Domains,
        _local_id: LocalId,
        _event: GraphEvent,
        _element: GraphElement,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Called after the solver backtracked. Trailed values are already restored.
    fn synchronise(&mut self, _domains: Domains) {}

    /// Decides whether the constraint is satisfied or violated by every assignment of the current
    /// domains. Must not change any state.
    fn is_entailed(&self, _domains: Domains) -> EntailmentStatus {
        EntailmentStatus::Undetermined
    }

    /// Determines when the propagator is run relative to others.
    fn priority(&self) -> Priority {
        Priority::Linear
    }

    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

/// Whether a propagator should be enqueued after a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueDecision {
    Enqueue,
    Skip,
}

/// What the current domains imply for a constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntailmentStatus {
    /// Every assignment satisfies the constraint.
    Satisfied,
    /// No assignment satisfies the constraint.
    Violated,
    Undetermined,
}

/// The expected cost of running a propagator, by the arity of its algorithm. Cheaper propagators
/// are run first.
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Priority {
    Unary = 0,
    Binary = 1,
    Ternary = 2,
    #[default]
    Linear = 3,
    Quadratic = 4,
    Cubic = 5,
    VerySlow = 6,
}

impl Priority {
    pub(crate) const NUM_PRIORITIES: u32 = 7;
}
