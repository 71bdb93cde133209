use crate::containers::StorageKey;

/// A graph variable.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GraphId {
    pub(crate) id: u32,
}

impl GraphId {
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl StorageKey for GraphId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        GraphId { id: index as u32 }
    }
}

impl std::fmt::Display for GraphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g{}", self.id)
    }
}
