use super::TerminationCondition;

/// Stops the solver after a number of decisions.
#[derive(Debug, Copy, Clone)]
pub struct NodeBudget {
    budget: u64,
    num_nodes: u64,
}

impl NodeBudget {
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            num_nodes: 0,
        }
    }
}

impl TerminationCondition for NodeBudget {
    fn should_stop(&mut self) -> bool {
        self.num_nodes >= self.budget
    }

    fn decision_has_been_made(&mut self) {
        self.num_nodes += 1;
    }
}
