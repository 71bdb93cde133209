//! Per-variable logs of removed values, read incrementally by propagators through
//! [`DeltaMonitor`]s.
mod delta_monitor;
mod int_delta;

pub use delta_monitor::DeltaMonitor;
pub use delta_monitor::FrozenDelta;
pub(crate) use int_delta::IntDelta;
pub use int_delta::RemovedRange;
