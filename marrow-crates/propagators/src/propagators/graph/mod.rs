//! Propagators over graph variables.
pub(crate) mod arborescence;
mod dominators;

pub use arborescence::*;
