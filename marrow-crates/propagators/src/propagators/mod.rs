pub(crate) mod all_different;
pub(crate) mod arithmetic;
pub(crate) mod bin_packing;
pub(crate) mod graph;

pub use all_different::*;
pub use arithmetic::*;
pub use bin_packing::*;
pub use graph::*;
