pub(crate) mod binary_not_equals;
pub(crate) mod linear_sum;

pub use binary_not_equals::*;
pub use linear_sum::*;
