//! Arc consistent filtering for all different constraints.
pub(crate) mod all_different_propagator;
mod bipartite_matching;
mod strongly_connected;

pub use all_different_propagator::*;
