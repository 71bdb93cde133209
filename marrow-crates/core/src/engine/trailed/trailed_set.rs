use std::slice;

/// How a backtrackable set stores its members.
///
/// A bitset answers membership with a single word access but iterates over the whole capacity;
/// a sparse set iterates only over its members. The choice is made once, when the set is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SetType {
    #[default]
    BitSet,
    Sparse,
}

#[derive(Debug, Clone)]
pub(crate) enum SetData {
    BitSet {
        words: Vec<u64>,
        size: usize,
    },
    Sparse {
        /// Members occupy `dense[..size]`.
        dense: Vec<u32>,
        positions: Vec<u32>,
        size: usize,
    },
}

impl SetData {
    pub(crate) fn new(set_type: SetType, capacity: usize) -> SetData {
        match set_type {
            SetType::BitSet => SetData::BitSet {
                words: vec![0; capacity.div_ceil(64)],
                size: 0,
            },
            SetType::Sparse => SetData::Sparse {
                dense: (0..capacity as u32).collect(),
                positions: (0..capacity as u32).collect(),
                size: 0,
            },
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        match self {
            SetData::BitSet { words, .. } => words.len() * 64,
            SetData::Sparse { dense, .. } => dense.len(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            SetData::BitSet { size, .. } | SetData::Sparse { size, .. } => *size,
        }
    }

    pub(crate) fn contains(&self, element: usize) -> bool {
        match self {
            SetData::BitSet { words, .. } => words
                .get(element / 64)
                .is_some_and(|word| word & (1 << (element % 64)) != 0),
            SetData::Sparse {
                positions, size, ..
            } => positions
                .get(element)
                .is_some_and(|&position| (position as usize) < *size),
        }
    }

    /// Returns whether the element was absent.
    pub(crate) fn insert(&mut self, element: usize) -> bool {
        if self.contains(element) {
            return false;
        }
        match self {
            SetData::BitSet { words, size } => {
                words[element / 64] |= 1 << (element % 64);
                *size += 1;
            }
            SetData::Sparse {
                dense,
                positions,
                size,
            } => {
                let position = positions[element] as usize;
                let displaced = dense[*size];
                dense.swap(position, *size);
                positions[displaced as usize] = position as u32;
                positions[element] = *size as u32;
                *size += 1;
            }
        }
        true
    }

    /// Returns whether the element was present.
    pub(crate) fn remove(&mut self, element: usize) -> bool {
        if !self.contains(element) {
            return false;
        }
        match self {
            SetData::BitSet { words, size } => {
                words[element / 64] &= !(1 << (element % 64));
                *size -= 1;
            }
            SetData::Sparse {
                dense,
                positions,
                size,
            } => {
                *size -= 1;
                let position = positions[element] as usize;
                let displaced = dense[*size];
                dense.swap(position, *size);
                positions[displaced as usize] = position as u32;
                positions[element] = *size as u32;
            }
        }
        true
    }

    pub(crate) fn iter(&self) -> SetIter<'_> {
        match self {
            SetData::BitSet { words, .. } => SetIter::Bits {
                words,
                word_index: 0,
                current: words.first().copied().unwrap_or(0),
            },
            SetData::Sparse { dense, size, .. } => SetIter::Dense(dense[..*size].iter()),
        }
    }
}

/// Iterator over the members of a backtrackable set. Bitsets yield members in increasing order,
/// sparse sets in insertion-dependent order.
#[derive(Debug, Clone)]
pub enum SetIter<'a> {
    Bits {
        words: &'a [u64],
        word_index: usize,
        current: u64,
    },
    Dense(slice::Iter<'a, u32>),
}

impl Iterator for SetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            SetIter::Bits {
                words,
                word_index,
                current,
            } => loop {
                if *current != 0 {
                    let bit = current.trailing_zeros() as usize;
                    *current &= *current - 1;
                    return Some(*word_index * 64 + bit);
                }
                *word_index += 1;
                if *word_index >= words.len() {
                    return None;
                }
                *current = words[*word_index];
            },
            SetIter::Dense(members) => members.next().map(|&element| element as usize),
        }
    }
}
