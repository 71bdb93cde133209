use std::fmt::Display;
use std::fmt::Formatter;

use crate::containers::StorageKey;

/// Identifies a propagator by the order in which it was added to the solver.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PropagatorId(pub(crate) u32);

impl StorageKey for PropagatorId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        PropagatorId(index as u32)
    }
}

impl Display for PropagatorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "propagator {}", self.0)
    }
}

/// Chosen by a propagator when it registers a variable and handed back in every notification
/// about that variable. Propagators usually pick the position of the variable in their own
/// arrays.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocalId(u32);

impl LocalId {
    pub const fn from(value: u32) -> Self {
        LocalId(value)
    }

    pub fn unpack(self) -> u32 {
        self.0
    }
}

impl Display for LocalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "local {}", self.0)
    }
}

/// One registration: which propagator watches, and under which [`LocalId`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub(crate) struct Watcher {
    pub(crate) propagator: PropagatorId,
    pub(crate) variable: LocalId,
}
