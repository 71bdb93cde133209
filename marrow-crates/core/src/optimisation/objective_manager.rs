use super::OptimisationDirection;
use crate::basic_types::Cause;
use crate::basic_types::Contradiction;
use crate::engine::variables::DomainId;
use crate::engine::Assignments;

/// Keeps the incumbent objective value and imposes the cut derived from it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ObjectiveManager {
    objective: DomainId,
    direction: OptimisationDirection,
    best: Option<i32>,
}

impl ObjectiveManager {
    pub(crate) fn new(objective: DomainId, direction: OptimisationDirection) -> Self {
        ObjectiveManager {
            objective,
            direction,
            best: None,
        }
    }

    pub(crate) fn best(&self) -> Option<i32> {
        self.best
    }

    /// Records the objective value of a new solution; returns whether it improves on the
    /// incumbent.
    pub(crate) fn record(&mut self, value: i32) -> bool {
        let improves = match (self.best, self.direction) {
            (None, _) => true,
            (Some(best), OptimisationDirection::Minimise) => value < best,
            (Some(best), OptimisationDirection::Maximise) => value > best,
        };
        if improves {
            self.best = Some(value);
        }
        improves
    }

    /// Requires the objective to strictly improve on the incumbent. The cut is not attributed to
    /// any decision, since it holds for the remainder of the search.
    pub(crate) fn apply_cut(&self, assignments: &mut Assignments) -> Result<bool, Contradiction> {
        let Some(best) = self.best else {
            return Ok(false);
        };

        match self.direction {
            OptimisationDirection::Minimise => {
                assignments.update_upper_bound(self.objective, best.saturating_sub(1), Cause::Root)
            }
            OptimisationDirection::Maximise => {
                assignments.update_lower_bound(self.objective, best.saturating_add(1), Cause::Root)
            }
        }
    }

    pub(crate) fn objective(&self) -> DomainId {
        self.objective
    }
}
