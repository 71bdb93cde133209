//! The interface between propagators and the solver.
//!
//! A propagator is created by a [`PropagatorConstructor`], which registers the variables the
//! propagator watches through the [`PropagatorConstructorContext`]. Whenever a watched variable
//! changes, [`Propagator::notify`] decides whether the propagator is enqueued; once it is popped
//! from the queue, [`Propagator::propagate`] tightens domains through a [`PropagationContext`].
//! Propagation either succeeds or returns a [`Contradiction`](crate::basic_types::Contradiction),
//! which aborts the current fixpoint.
mod constructor;
mod contexts;
mod identifiers;
mod propagator;
pub(crate) mod store;

pub use constructor::PropagatorConstructor;
pub use constructor::PropagatorConstructorContext;
pub use contexts::Domains;
pub(crate) use contexts::HasAssignments;
pub use contexts::PropagationContext;
pub use contexts::ReadDomains;
pub use identifiers::LocalId;
pub use identifiers::PropagatorId;
pub(crate) use identifiers::Watcher;
pub use propagator::EnqueueDecision;
pub use propagator::EntailmentStatus;
pub use propagator::Priority;
pub use propagator::Propagator;
pub use store::PropagatorHandle;

pub use crate::basic_types::Cause;
pub use crate::basic_types::Contradiction;
pub use crate::basic_types::ContradictionKind;
pub use crate::basic_types::GraphElement;
pub use crate::basic_types::PropagationStatus;
pub use crate::engine::delta::DeltaMonitor;
pub use crate::engine::delta::FrozenDelta;
pub use crate::engine::delta::RemovedRange;
pub use crate::engine::domains::DomainRanges;
pub use crate::engine::domains::DomainValues;
pub use crate::engine::graph::GraphEvent;
pub use crate::engine::graph::GraphEvents;
pub use crate::engine::graph::GraphView;
pub use crate::engine::notifications::DomainEvent;
pub use crate::engine::notifications::DomainEvents;
pub use crate::engine::trailed::SetIter;
pub use crate::engine::trailed::SetType;
pub use crate::engine::trailed::TrailedBitSet;
pub use crate::engine::trailed::TrailedInteger;
pub use crate::engine::trailed::TrailedSet;
