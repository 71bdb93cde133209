//! Integer helpers shared by propagators.
mod num_ext;

pub use num_ext::NumExt;
