use super::SetData;
use super::SetIter;
use super::SetType;
use super::TrailedBitSet;
use super::TrailedChange;
use super::TrailedInteger;
use super::TrailedSet;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::marrow_assert_moderate;
use crate::marrow_assert_simple;

#[derive(Debug, Clone, Copy)]
struct StampedInteger {
    value: i64,
    /// Identifier of the world in which the old value was last saved.
    stamp: u64,
}

#[derive(Debug, Clone)]
struct StampedBitSet {
    words: Vec<u64>,
    stamps: Vec<u64>,
    capacity: usize,
}

/// Owner of all backtrackable values of a solver.
///
/// A world is a checkpoint in the history of these values; [`Environment::world_push`] opens a
/// new one and [`Environment::world_pop_until`] restores every value to what it was when the
/// matching push happened. Nothing is copied on a push: integers and bitset words save their old value the
/// first time they are written in a world, and are never saved twice within the same world.
#[derive(Debug)]
pub(crate) struct Environment {
    trail: Trail<TrailedChange>,
    /// Unique identifier of every open world, indexed by world index. Worlds which are popped and
    /// pushed again get a fresh identifier so stale stamps never match.
    world_identifiers: Vec<u64>,
    time_stamp: u64,
    node_stamp: u64,
    integers: KeyedVec<TrailedInteger, StampedInteger>,
    bit_sets: KeyedVec<TrailedBitSet, StampedBitSet>,
    sets: KeyedVec<TrailedSet, SetData>,
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            trail: Trail::default(),
            world_identifiers: vec![0],
            time_stamp: 0,
            node_stamp: 0,
            integers: KeyedVec::default(),
            bit_sets: KeyedVec::default(),
            sets: KeyedVec::default(),
        }
    }
}

impl Environment {
    /// The backtracking depth; the root world has index 0.
    pub(crate) fn world_index(&self) -> usize {
        self.trail.get_checkpoint()
    }

    /// A counter which increases on every push, every pop and every domain or graph change.
    pub(crate) fn time_stamp(&self) -> u64 {
        self.time_stamp
    }

    /// The time stamp of the last push or pop; identifies the search node being explored.
    pub(crate) fn node_stamp(&self) -> u64 {
        self.node_stamp
    }

    pub(crate) fn tick(&mut self) {
        self.time_stamp += 1;
    }

    fn current_world(&self) -> u64 {
        self.world_identifiers[self.world_identifiers.len() - 1]
    }

    pub(crate) fn world_push(&mut self) {
        self.trail.new_checkpoint();
        self.time_stamp += 1;
        self.node_stamp = self.time_stamp;
        self.world_identifiers.push(self.time_stamp);
    }

    /// Restores the values of the previous world.
    ///
    /// # Panics
    /// Popping the root world is a programming error.
    #[cfg(test)]
    pub(crate) fn world_pop(&mut self) {
        marrow_assert_simple!(self.world_index() > 0, "cannot pop below the root world");
        self.world_pop_until(self.world_index() - 1);
    }

    /// Pops worlds until `world` is the current one.
    pub(crate) fn world_pop_until(&mut self, world: usize) {
        marrow_assert_simple!(
            world <= self.world_index(),
            "cannot pop from world {} up to world {world}",
            self.world_index()
        );
        if world == self.world_index() {
            return;
        }

        for change in self.trail.synchronise(world) {
            match change {
                TrailedChange::Integer {
                    reference,
                    old_value,
                    old_stamp,
                } => {
                    self.integers[reference] = StampedInteger {
                        value: old_value,
                        stamp: old_stamp,
                    };
                }
                TrailedChange::Word {
                    reference,
                    word,
                    old_value,
                    old_stamp,
                } => {
                    let bit_set = &mut self.bit_sets[reference];
                    bit_set.words[word as usize] = old_value;
                    bit_set.stamps[word as usize] = old_stamp;
                }
                TrailedChange::SetInsertion { reference, element } => {
                    let _ = self.sets[reference].remove(element as usize);
                }
                TrailedChange::SetRemoval { reference, element } => {
                    let _ = self.sets[reference].insert(element as usize);
                }
            }
        }

        self.world_identifiers.truncate(world + 1);
        self.time_stamp += 1;
        self.node_stamp = self.time_stamp;
    }
}

/// Integers.
impl Environment {
    pub(crate) fn make_int(&mut self, initial_value: i64) -> TrailedInteger {
        let stamp = self.current_world();
        self.integers.push(StampedInteger {
            value: initial_value,
            stamp,
        })
    }

    pub(crate) fn read(&self, integer: TrailedInteger) -> i64 {
        self.integers[integer].value
    }

    pub(crate) fn assign(&mut self, integer: TrailedInteger, value: i64) {
        let world = self.current_world();
        let stored = self.integers[integer];
        if stored.value == value {
            return;
        }
        if stored.stamp != world {
            self.trail.push(TrailedChange::Integer {
                reference: integer,
                old_value: stored.value,
                old_stamp: stored.stamp,
            });
        }
        self.integers[integer] = StampedInteger { value, stamp: world };
    }

    /// Adds `addition` to the integer and returns the new value.
    pub(crate) fn add_assign(&mut self, integer: TrailedInteger, addition: i64) -> i64 {
        let value = self.read(integer) + addition;
        self.assign(integer, value);
        value
    }
}

fn bits_between(low: usize, high: usize) -> u64 {
    marrow_assert_moderate!(low <= high && high < 64);
    let upper = if high == 63 {
        u64::MAX
    } else {
        (1_u64 << (high + 1)) - 1
    };
    upper & (u64::MAX << low)
}

/// Bitsets.
impl Environment {
    /// Creates a bitset with all bits in `[0, capacity)` cleared.
    pub(crate) fn make_bit_set(&mut self, capacity: usize) -> TrailedBitSet {
        let num_words = capacity.div_ceil(64).max(1);
        let stamp = self.current_world();
        self.bit_sets.push(StampedBitSet {
            words: vec![0; num_words],
            stamps: vec![stamp; num_words],
            capacity,
        })
    }

    fn write_word(&mut self, bit_set: TrailedBitSet, word: usize, value: u64) {
        let world = self.current_world();
        let stored = &mut self.bit_sets[bit_set];
        let old_value = stored.words[word];
        if old_value == value {
            return;
        }
        if stored.stamps[word] != world {
            self.trail.push(TrailedChange::Word {
                reference: bit_set,
                word: word as u32,
                old_value,
                old_stamp: stored.stamps[word],
            });
            stored.stamps[word] = world;
        }
        stored.words[word] = value;
    }

    pub(crate) fn contains_bit(&self, bit_set: TrailedBitSet, index: usize) -> bool {
        let stored = &self.bit_sets[bit_set];
        index < stored.capacity && stored.words[index / 64] & (1 << (index % 64)) != 0
    }

    pub(crate) fn set_bit(&mut self, bit_set: TrailedBitSet, index: usize) {
        marrow_assert_moderate!(index < self.bit_sets[bit_set].capacity);
        let word = self.bit_sets[bit_set].words[index / 64];
        self.write_word(bit_set, index / 64, word | (1 << (index % 64)));
    }

    pub(crate) fn clear_bit(&mut self, bit_set: TrailedBitSet, index: usize) {
        marrow_assert_moderate!(index < self.bit_sets[bit_set].capacity);
        let word = self.bit_sets[bit_set].words[index / 64];
        self.write_word(bit_set, index / 64, word & !(1 << (index % 64)));
    }

    /// Clears every bit in `[from, to]`.
    pub(crate) fn clear_bit_range(&mut self, bit_set: TrailedBitSet, from: usize, to: usize) {
        self.update_range(bit_set, from, to, |word, mask| word & !mask);
    }

    fn update_range(
        &mut self,
        bit_set: TrailedBitSet,
        from: usize,
        to: usize,
        update: impl Fn(u64, u64) -> u64,
    ) {
        if from > to {
            return;
        }
        marrow_assert_moderate!(to < self.bit_sets[bit_set].capacity);
        for word in from / 64..=to / 64 {
            let low = if word == from / 64 { from % 64 } else { 0 };
            let high = if word == to / 64 { to % 64 } else { 63 };
            let current = self.bit_sets[bit_set].words[word];
            self.write_word(bit_set, word, update(current, bits_between(low, high)));
        }
    }

    /// Number of set bits in `[from, to]`.
    pub(crate) fn count_bits(&self, bit_set: TrailedBitSet, from: usize, to: usize) -> usize {
        if from > to {
            return 0;
        }
        let stored = &self.bit_sets[bit_set];
        (from / 64..=to / 64)
            .map(|word| {
                let low = if word == from / 64 { from % 64 } else { 0 };
                let high = if word == to / 64 { to % 64 } else { 63 };
                (stored.words[word] & bits_between(low, high)).count_ones() as usize
            })
            .sum()
    }

    /// The smallest set bit which is at least `from`.
    pub(crate) fn next_set_bit(&self, bit_set: TrailedBitSet, from: usize) -> Option<usize> {
        let stored = &self.bit_sets[bit_set];
        next_matching_bit(&stored.words, stored.capacity, from, |word| word)
    }

    /// The smallest cleared bit which is at least `from`, or the capacity if there is none.
    pub(crate) fn next_clear_bit(&self, bit_set: TrailedBitSet, from: usize) -> usize {
        let stored = &self.bit_sets[bit_set];
        next_matching_bit(&stored.words, stored.capacity, from, |word| !word)
            .unwrap_or(stored.capacity)
    }

    /// The largest set bit which is at most `from`.
    pub(crate) fn previous_set_bit(&self, bit_set: TrailedBitSet, from: usize) -> Option<usize> {
        let stored = &self.bit_sets[bit_set];
        previous_matching_bit(&stored.words, stored.capacity, from, |word| word)
    }

    /// The largest cleared bit which is at most `from`.
    pub(crate) fn previous_clear_bit(&self, bit_set: TrailedBitSet, from: usize) -> Option<usize> {
        let stored = &self.bit_sets[bit_set];
        previous_matching_bit(&stored.words, stored.capacity, from, |word| !word)
    }
}

fn next_matching_bit(
    words: &[u64],
    capacity: usize,
    from: usize,
    transform: impl Fn(u64) -> u64,
) -> Option<usize> {
    if from >= capacity {
        return None;
    }
    let mut word_index = from / 64;
    let mut word = transform(words[word_index]) & (u64::MAX << (from % 64));
    loop {
        if word != 0 {
            let index = word_index * 64 + word.trailing_zeros() as usize;
            return (index < capacity).then_some(index);
        }
        word_index += 1;
        if word_index >= words.len() {
            return None;
        }
        word = transform(words[word_index]);
    }
}

fn previous_matching_bit(
    words: &[u64],
    capacity: usize,
    from: usize,
    transform: impl Fn(u64) -> u64,
) -> Option<usize> {
    if capacity == 0 {
        return None;
    }
    let from = from.min(capacity - 1);
    let mut word_index = from / 64;
    let mut word = transform(words[word_index]) & bits_between(0, from % 64);
    loop {
        if word != 0 {
            return Some(word_index * 64 + 63 - word.leading_zeros() as usize);
        }
        if word_index == 0 {
            return None;
        }
        word_index -= 1;
        word = transform(words[word_index]);
    }
}

/// Sets.
impl Environment {
    /// Creates an empty set over `[0, capacity)`.
    pub(crate) fn make_set(&mut self, set_type: SetType, capacity: usize) -> TrailedSet {
        self.sets.push(SetData::new(set_type, capacity))
    }

    pub(crate) fn set_contains(&self, set: TrailedSet, element: usize) -> bool {
        self.sets[set].contains(element)
    }

    pub(crate) fn set_size(&self, set: TrailedSet) -> usize {
        self.sets[set].len()
    }

    pub(crate) fn set_iter(&self, set: TrailedSet) -> SetIter<'_> {
        self.sets[set].iter()
    }

    /// Returns whether the element was absent.
    pub(crate) fn set_insert(&mut self, set: TrailedSet, element: usize) -> bool {
        marrow_assert_moderate!(element < self.sets[set].capacity());
        let inserted = self.sets[set].insert(element);
        if inserted {
            self.trail.push(TrailedChange::SetInsertion {
                reference: set,
                element: element as u32,
            });
        }
        inserted
    }

    /// Returns whether the element was present.
    pub(crate) fn set_remove(&mut self, set: TrailedSet, element: usize) -> bool {
        let removed = self.sets[set].remove(element);
        if removed {
            self.trail.push(TrailedChange::SetRemoval {
                reference: set,
                element: element as u32,
            });
        }
        removed
    }
}
