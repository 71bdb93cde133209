use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::propagation::ReadDomains;

/// Selects the first unfixed variable in the order in which they were provided.
#[derive(Debug, Clone)]
pub struct InputOrder {
    variables: Vec<DomainId>,
}

impl InputOrder {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The InputOrder variable selector was not provided with any variables");
        }
        InputOrder {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector<DomainId> for InputOrder {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        self.variables
            .iter()
            .copied()
            .find(|&variable| !context.is_fixed(variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::selection_context::tests::assignments_with;

    #[test]
    fn skips_fixed_variables() {
        let (assignments, variables, mut random) = assignments_with(&[(3, 3), (0, 5), (0, 1)]);
        let mut context = SelectionContext::new(&assignments, &mut random);

        let mut selector = InputOrder::new(&variables);
        assert_eq!(selector.select_variable(&mut context), Some(variables[1]));
    }

    #[test]
    fn none_when_all_fixed() {
        let (assignments, variables, mut random) = assignments_with(&[(3, 3), (1, 1)]);
        let mut context = SelectionContext::new(&assignments, &mut random);

        let mut selector = InputOrder::new(&variables);
        assert_eq!(selector.select_variable(&mut context), None);
    }
}
