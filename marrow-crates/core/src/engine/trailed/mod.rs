//! Backtrackable storage. Every mutable value of the search lives in the [`Environment`] and is
//! restored when a world is popped.
mod environment;
mod trailed_change;
mod trailed_keys;
mod trailed_set;

pub(crate) use environment::Environment;
pub(crate) use trailed_change::TrailedChange;
pub use trailed_keys::TrailedBitSet;
pub use trailed_keys::TrailedInteger;
pub use trailed_keys::TrailedSet;
pub use trailed_set::SetIter;
pub use trailed_set::SetType;
pub(crate) use trailed_set::SetData;
