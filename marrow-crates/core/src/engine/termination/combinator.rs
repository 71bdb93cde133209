use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers when one of two given [`TerminationCondition`]s
/// triggers.
#[derive(Clone, Copy, Debug)]
pub struct Combinator<T1, T2> {
    first: T1,
    second: T2,
}

impl<T1, T2> Combinator<T1, T2> {
    pub fn new(first: T1, second: T2) -> Self {
        Combinator { first, second }
    }
}

impl<T1: TerminationCondition, T2: TerminationCondition> TerminationCondition
    for Combinator<T1, T2>
{
    fn should_stop(&mut self) -> bool {
        // Both are polled so that stateful conditions observe every poll.
        let first = self.first.should_stop();
        let second = self.second.should_stop();
        first || second
    }

    fn decision_has_been_made(&mut self) {
        self.first.decision_has_been_made();
        self.second.decision_has_been_made();
    }

    fn contradiction_has_occurred(&mut self) {
        self.first.contradiction_has_occurred();
        self.second.contradiction_has_occurred();
    }
}
