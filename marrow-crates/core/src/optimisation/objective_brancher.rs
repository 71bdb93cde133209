use super::ObjectiveStrategy;
use super::OptimisationDirection;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::propagation::ReadDomains;

/// Branches on the objective variable according to an [`ObjectiveStrategy`] until it is fixed,
/// and then defers to the wrapped brancher.
#[derive(Debug)]
pub struct ObjectiveBrancher<B> {
    objective: DomainId,
    direction: OptimisationDirection,
    strategy: ObjectiveStrategy,
    brancher: B,
}

impl<B: Brancher> ObjectiveBrancher<B> {
    pub fn new(
        objective: DomainId,
        direction: OptimisationDirection,
        strategy: ObjectiveStrategy,
        brancher: B,
    ) -> Self {
        ObjectiveBrancher {
            objective,
            direction,
            strategy,
            brancher,
        }
    }

    fn objective_decision(&self, lower_bound: i32, upper_bound: i32) -> Decision {
        use ObjectiveStrategy::*;
        use OptimisationDirection::*;

        match (self.strategy, self.direction) {
            (BottomUp, Minimise) | (TopDown, Maximise) => {
                Decision::assign(self.objective, lower_bound)
            }
            (BottomUp, Maximise) | (TopDown, Minimise) => {
                Decision::assign(self.objective, upper_bound)
            }
            (Dichotomic, Minimise) => {
                let middle = lower_bound as i64 + (upper_bound as i64 - lower_bound as i64) / 2;
                Decision::less_or_equal(self.objective, middle as i32)
            }
            (Dichotomic, Maximise) => {
                let middle =
                    lower_bound as i64 + (upper_bound as i64 - lower_bound as i64 + 1) / 2;
                Decision::greater_or_equal(self.objective, middle as i32)
            }
        }
    }
}

impl<B: Brancher> Brancher for ObjectiveBrancher<B> {
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision> {
        let lower_bound = context.lower_bound(self.objective);
        let upper_bound = context.upper_bound(self.objective);
        if lower_bound != upper_bound {
            return Some(self.objective_decision(lower_bound, upper_bound));
        }

        self.brancher.next_decision(context)
    }

    fn on_conflict(&mut self) {
        self.brancher.on_conflict()
    }

    fn on_backtrack(&mut self) {
        self.brancher.on_backtrack()
    }

    fn on_solution(&mut self, solution: &Solution) {
        self.brancher.on_solution(solution)
    }

    fn on_restart(&mut self) {
        self.brancher.on_restart()
    }
}
