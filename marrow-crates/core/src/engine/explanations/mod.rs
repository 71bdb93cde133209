//! Explanations of contradictions in terms of decisions.
//!
//! Every change made while explanations are enabled is logged together with its [`Cause`]. A
//! contradiction is explained by walking the log backwards from the subjects involved in the
//! failure: changes made by a propagator make its whole scope relevant, positive decisions
//! contribute their depth, and refutations contribute the explanation stored when they were
//! applied. Root changes contribute nothing.
use super::decision_path::DecisionPath;
use super::State;
use crate::basic_types::Cause;
use crate::basic_types::Contradiction;
use crate::containers::HashSet;
use crate::engine::variables::Subject;
use crate::marrow_assert_simple;
use crate::propagation::PropagatorId;

/// The depths, in increasing order, of the decisions which together imply `contradiction`. An
/// empty explanation means the contradiction follows from the root alone.
pub(crate) fn explain_contradiction(
    state: &State,
    decision_path: &DecisionPath,
    contradiction: Contradiction,
) -> Vec<u32> {
    let change_log = state.assignments.changes_since_root();
    marrow_assert_simple!(
        change_log.is_some(),
        "contradictions are explained without a change log"
    );

    let mut explainer = Explainer {
        state,
        decision_path,
        relevant: HashSet::default(),
        visited_propagators: HashSet::default(),
        depths: HashSet::default(),
    };

    if let Some(subject) = contradiction.subject() {
        let _ = explainer.relevant.insert(subject);
    }
    explainer.add_cause(contradiction.cause());

    for change in change_log.unwrap_or_default().iter().rev() {
        if explainer.relevant.contains(&change.subject) {
            explainer.add_cause(change.cause);
        }
    }

    let mut explanation = explainer.depths.into_iter().collect::<Vec<_>>();
    explanation.sort_unstable();
    explanation
}

struct Explainer<'a> {
    state: &'a State,
    decision_path: &'a DecisionPath,
    relevant: HashSet<Subject>,
    visited_propagators: HashSet<PropagatorId>,
    depths: HashSet<u32>,
}

impl Explainer<'_> {
    fn add_cause(&mut self, cause: Cause) {
        match cause {
            Cause::Root => {}
            Cause::Decision { depth } => {
                let _ = self.depths.insert(depth);
            }
            Cause::Refutation { depth } => {
                self.depths
                    .extend(self.decision_path.entry(depth).explanation.iter().copied());
            }
            Cause::Propagator(propagator_id) => {
                if self.visited_propagators.insert(propagator_id) {
                    self.relevant
                        .extend(self.state.scope(propagator_id).iter().copied());
                }
            }
        }
    }
}
