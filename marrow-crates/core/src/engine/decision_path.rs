use crate::branching::Decision;
use crate::marrow_assert_simple;

/// A decision on the current search path.
#[derive(Clone, Debug)]
pub(crate) struct DecisionPathEntry {
    pub(crate) decision: Decision,
    /// Whether the negation of the decision is applied instead of the decision.
    pub(crate) refuted: bool,
    /// For a refuted decision, the depths of the earlier decisions which imply the refutation.
    pub(crate) explanation: Vec<u32>,
}

/// The decisions from the root to the current node. The decision at depth `d` (starting at 1)
/// was taken in world `d - 1` and is applied in world `d`.
#[derive(Clone, Debug, Default)]
pub(crate) struct DecisionPath {
    entries: Vec<DecisionPathEntry>,
}

impl DecisionPath {
    pub(crate) fn depth(&self) -> u32 {
        self.entries.len() as u32
    }

    pub(crate) fn push(&mut self, decision: Decision) -> u32 {
        self.entries.push(DecisionPathEntry {
            decision,
            refuted: false,
            explanation: Vec::new(),
        });
        self.depth()
    }

    pub(crate) fn entry(&self, depth: u32) -> &DecisionPathEntry {
        marrow_assert_simple!(depth >= 1 && depth <= self.depth());
        &self.entries[depth as usize - 1]
    }

    /// The deepest decision whose negation was not tried yet.
    pub(crate) fn deepest_open_decision(&self) -> Option<u32> {
        self.entries
            .iter()
            .rposition(|entry| !entry.refuted)
            .map(|index| index as u32 + 1)
    }

    /// Replaces the decision at `depth` by its negation and drops every deeper decision. Returns
    /// the negated decision.
    pub(crate) fn refute(&mut self, depth: u32, explanation: Vec<u32>) -> Decision {
        marrow_assert_simple!(
            !self.entry(depth).refuted,
            "the decision at depth {depth} was refuted twice"
        );
        self.entries.truncate(depth as usize);
        let entry = &mut self.entries[depth as usize - 1];
        entry.refuted = true;
        entry.explanation = explanation;
        entry.decision.negation()
    }

    /// Explains the decision at `depth` by everything above it: the depths of the positive
    /// decisions, with every refuted decision replaced by its own explanation.
    pub(crate) fn prefix_explanation(&self, depth: u32) -> Vec<u32> {
        let mut explanation = self.entries[..depth as usize - 1]
            .iter()
            .zip(1..)
            .flat_map(|(entry, entry_depth)| {
                if entry.refuted {
                    entry.explanation.clone()
                } else {
                    vec![entry_depth]
                }
            })
            .collect::<Vec<_>>();
        explanation.sort_unstable();
        explanation.dedup();
        explanation
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// The positive decisions at the given depths.
    pub(crate) fn decisions_at(&self, depths: &[u32]) -> Vec<Decision> {
        depths
            .iter()
            .map(|&depth| self.entry(depth).decision)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Assignments;

    #[test]
    fn refuting_truncates_deeper_decisions() {
        let mut assignments = Assignments::default();
        let x = assignments.new_interval_domain(0, 5);

        let mut path = DecisionPath::default();
        let _ = path.push(Decision::assign(x, 0));
        let _ = path.push(Decision::assign(x, 1));
        let _ = path.push(Decision::assign(x, 2));

        let negation = path.refute(2, vec![1]);
        assert_eq!(negation, Decision::remove(x, 1));
        assert_eq!(path.depth(), 2);
        assert_eq!(path.entry(2).explanation, vec![1]);
        assert_eq!(path.deepest_open_decision(), Some(1));

        let _ = path.refute(1, vec![]);
        assert_eq!(path.deepest_open_decision(), None);
    }

    #[test]
    fn prefix_explanation_replaces_refuted_decisions() {
        let mut assignments = Assignments::default();
        let x = assignments.new_interval_domain(0, 5);

        let mut path = DecisionPath::default();
        let _ = path.push(Decision::assign(x, 0));
        let _ = path.push(Decision::assign(x, 1));
        let _ = path.refute(2, vec![]);
        let _ = path.push(Decision::assign(x, 2));
        let _ = path.push(Decision::assign(x, 3));

        assert_eq!(path.prefix_explanation(4), vec![1, 3]);
        assert_eq!(path.prefix_explanation(1), Vec::<u32>::new());
    }
}
