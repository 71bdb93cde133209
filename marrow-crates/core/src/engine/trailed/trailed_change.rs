use super::TrailedBitSet;
use super::TrailedInteger;
use super::TrailedSet;

/// An undo record. Integers and bitset words are saved at most once per world (copy-on-write),
/// set operations are logged individually and undone in reverse order.
#[derive(Debug, Clone, Copy)]
pub(crate) enum TrailedChange {
    Integer {
        reference: TrailedInteger,
        old_value: i64,
        old_stamp: u64,
    },
    Word {
        reference: TrailedBitSet,
        word: u32,
        old_value: u64,
        old_stamp: u64,
    },
    SetInsertion {
        reference: TrailedSet,
        element: u32,
    },
    SetRemoval {
        reference: TrailedSet,
        element: u32,
    },
}
