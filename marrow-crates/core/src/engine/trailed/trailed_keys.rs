use crate::containers::StorageKey;

/// Handle to a backtrackable integer owned by an [`Environment`](super::Environment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrailedInteger {
    id: u32,
}

impl StorageKey for TrailedInteger {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        Self { id: index as u32 }
    }
}

/// Handle to a backtrackable fixed-capacity bitset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrailedBitSet {
    id: u32,
}

impl StorageKey for TrailedBitSet {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        Self { id: index as u32 }
    }
}

/// Handle to a backtrackable set of integers in `[0, capacity)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrailedSet {
    id: u32,
}

impl StorageKey for TrailedSet {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        Self { id: index as u32 }
    }
}
