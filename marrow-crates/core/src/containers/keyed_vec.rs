use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// A vector which can only be indexed by `Key`.
///
/// Variables, propagators and backtrackable values are all identified by small copyable keys; a
/// [`KeyedVec`] stores the data belonging to each key without the risk of indexing one store with
/// the key of another.
#[derive(Debug, Hash, PartialEq, Eq)]
pub struct KeyedVec<Key, Value> {
    key: PhantomData<Key>,
    elements: Vec<Value>,
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            elements: self.elements.clone(),
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        Self {
            key: PhantomData,
            elements: Vec::default(),
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Appends a value and returns the key under which it is stored.
    pub fn push(&mut self, value: Value) -> Key {
        self.elements.push(value);
        Key::create_from_index(self.elements.len() - 1)
    }

    /// Reserves the next key, so that a value can be built knowing its own key before it is
    /// stored with [`Slot::populate`].
    pub fn new_slot(&mut self) -> Slot<'_, Key, Value> {
        Slot { vec: self }
    }

    pub fn get(&self, key: Key) -> Option<&Value> {
        self.elements.get(key.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &'_ Value> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Value> {
        self.elements.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.elements.len()).map(Key::create_from_index)
    }
}

impl<Key: StorageKey, Value: Clone> KeyedVec<Key, Value> {
    /// Makes sure `key` can be indexed, filling new positions with `default_value`.
    pub fn accommodate(&mut self, key: Key, default_value: Value) {
        if key.index() >= self.elements.len() {
            self.elements.resize(key.index() + 1, default_value);
        }
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, index: Key) -> &mut Self::Output {
        &mut self.elements[index.index()]
    }
}

impl StorageKey for usize {
    fn index(&self) -> usize {
        *self
    }

    fn create_from_index(index: usize) -> Self {
        index
    }
}

/// A key which maps to a position in a [`KeyedVec`].
pub trait StorageKey: Clone {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

/// A reserved position for a new value in a [`KeyedVec`].
#[derive(Debug)]
pub struct Slot<'a, Key, Value> {
    vec: &'a mut KeyedVec<Key, Value>,
}

impl<Key: StorageKey, Value> Slot<'_, Key, Value> {
    pub fn key(&self) -> Key {
        Key::create_from_index(self.vec.len())
    }

    pub fn populate(self, value: Value) -> Key {
        self.vec.push(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_key_matches_the_key_returned_on_populate() {
        let mut values: KeyedVec<usize, &str> = KeyedVec::default();
        let _ = values.push("first");

        let slot = values.new_slot();
        let reserved = slot.key();
        let stored = slot.populate("second");

        assert_eq!(reserved, stored);
        assert_eq!(values[stored], "second");
    }

    #[test]
    fn accommodate_only_grows() {
        let mut values: KeyedVec<usize, u32> = KeyedVec::default();
        values.accommodate(3, 7);
        values[1] = 2;
        values.accommodate(1, 9);

        assert_eq!(values.len(), 4);
        assert_eq!(values.iter().copied().collect::<Vec<_>>(), vec![7, 2, 7, 7]);
    }
}
