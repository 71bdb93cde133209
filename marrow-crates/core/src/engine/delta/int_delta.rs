use crate::basic_types::Cause;

/// A range of values `[from, to]` removed from a domain by `cause`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemovedRange {
    pub from: i32,
    pub to: i32,
    pub cause: Cause,
}

impl RemovedRange {
    pub fn values(&self) -> impl DoubleEndedIterator<Item = i32> {
        self.from..=self.to
    }
}

/// The removals performed on one domain during the current search node.
///
/// The log is cleared lazily: the first removal recorded under a new node stamp discards the
/// entries of the previous node.
#[derive(Clone, Debug, Default)]
pub(crate) struct IntDelta {
    entries: Vec<RemovedRange>,
    node_stamp: u64,
}

impl IntDelta {
    pub(crate) fn record(&mut self, node_stamp: u64, from: i32, to: i32, cause: Cause) {
        if self.node_stamp != node_stamp {
            self.entries.clear();
            self.node_stamp = node_stamp;
        }
        self.entries.push(RemovedRange { from, to, cause });
    }

    /// The entries recorded during the node identified by `node_stamp`.
    pub(crate) fn visible(&self, node_stamp: u64) -> &[RemovedRange] {
        if self.node_stamp == node_stamp {
            &self.entries
        } else {
            &[]
        }
    }
}
