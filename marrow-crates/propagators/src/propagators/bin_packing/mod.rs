pub(crate) mod bin_packing_propagator;
mod no_sum;

pub use bin_packing_propagator::*;
