use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::marrow_assert_simple;

/// An append-only log split into checkpoints; backtracking to a checkpoint drains everything
/// pushed after it, newest first.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    current_checkpoint: usize,
    /// Entry `i` is the length of the trail when checkpoint `i + 1` was created.
    delimiters: Vec<usize>,
    entries: Vec<T>,
}

impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            current_checkpoint: 0,
            delimiters: Vec::new(),
            entries: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.current_checkpoint += 1;
        self.delimiters.push(self.entries.len());
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.current_checkpoint
    }

    /// The entries pushed after `checkpoint` was entered, oldest first.
    pub(crate) fn entries_since(&self, checkpoint: usize) -> &[T] {
        marrow_assert_simple!(checkpoint <= self.current_checkpoint);
        let start = if checkpoint == 0 {
            0
        } else {
            self.delimiters[checkpoint - 1]
        };
        &self.entries[start..]
    }

    /// Removes every entry pushed after `new_checkpoint` was entered and yields them newest
    /// first.
    pub(crate) fn synchronise(&mut self, new_checkpoint: usize) -> Rev<Drain<'_, T>> {
        marrow_assert_simple!(
            new_checkpoint < self.current_checkpoint,
            "cannot backtrack from checkpoint {} to {new_checkpoint}",
            self.current_checkpoint
        );

        let new_length = self.delimiters[new_checkpoint];
        self.current_checkpoint = new_checkpoint;
        self.delimiters.truncate(new_checkpoint);
        self.entries.drain(new_length..).rev()
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry)
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_pushed_at_root_survive_backtracking() {
        let mut trail = Trail::default();
        trail.push('a');
        trail.new_checkpoint();
        trail.push('b');

        let drained = trail.synchronise(0).collect::<Vec<_>>();

        assert_eq!(drained, vec!['b']);
        assert_eq!(&['a'], trail.deref());
    }

    #[test]
    fn synchronise_skips_several_checkpoints_at_once() {
        let mut trail = Trail::default();
        for value in 0..4 {
            trail.new_checkpoint();
            trail.push(value);
        }

        let drained = trail.synchronise(1).collect::<Vec<_>>();

        assert_eq!(drained, vec![3, 2, 1]);
        assert_eq!(trail.get_checkpoint(), 1);
        assert_eq!(&[0], trail.deref());
    }

    #[test]
    fn entries_since_a_checkpoint() {
        let mut trail = Trail::default();
        trail.push(10);
        trail.new_checkpoint();
        trail.push(11);
        trail.new_checkpoint();
        trail.push(12);

        assert_eq!(trail.entries_since(0), &[10, 11, 12]);
        assert_eq!(trail.entries_since(1), &[11, 12]);
        assert_eq!(trail.entries_since(2), &[12]);
    }
}
