use crate::basic_types::Random;
#[cfg(doc)]
use crate::branching::Brancher;
use crate::engine::Assignments;
#[cfg(doc)]
use crate::propagation::PropagationContext;
use crate::propagation::HasAssignments;
#[cfg(doc)]
use crate::propagation::ReadDomains;

/// The context provided to the [`Brancher`]. Like the [`PropagationContext`] it gives read access
/// to the domains through [`ReadDomains`], and in addition it gives access to the random
/// generator of the solver.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    assignments: &'a Assignments,
    random_generator: &'a mut dyn Random,
}

impl<'a> SelectionContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments, random_generator: &'a mut dyn Random) -> Self {
        SelectionContext {
            assignments,
            random_generator,
        }
    }

    /// Returns a random generator which can be used to generate random values (see [`Random`] for
    /// more information).
    pub fn random(&mut self) -> &mut dyn Random {
        self.random_generator
    }
}

impl HasAssignments for SelectionContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use crate::engine::variables::DomainId;
    use crate::engine::Assignments;

    /// Creates assignments with one interval variable per pair of bounds.
    pub(crate) fn assignments_with(bounds: &[(i32, i32)]) -> (Assignments, Vec<DomainId>, SmallRng) {
        let mut assignments = Assignments::default();
        let variables = bounds
            .iter()
            .map(|&(lower_bound, upper_bound)| {
                assignments.new_interval_domain(lower_bound, upper_bound)
            })
            .collect();
        (assignments, variables, SmallRng::seed_from_u64(42))
    }
}
