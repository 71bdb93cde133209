use std::cmp::Reverse;

use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::propagation::ReadDomains;

/// Selects the unfixed variable with the largest upper bound.
#[derive(Debug, Clone)]
pub struct Largest {
    variables: Vec<DomainId>,
}

impl Largest {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The Largest variable selector was not provided with any variables");
        }
        Largest {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector<DomainId> for Largest {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        self.variables
            .iter()
            .copied()
            .filter(|&variable| !context.is_fixed(variable))
            .min_by_key(|&variable| Reverse(context.upper_bound(variable)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::selection_context::tests::assignments_with;

    #[test]
    fn largest_upper_bound_is_selected_first_in_ties() {
        let (assignments, variables, mut random) =
            assignments_with(&[(0, 5), (20, 20), (1, 9), (3, 9)]);
        let mut context = SelectionContext::new(&assignments, &mut random);

        let mut selector = Largest::new(&variables);
        assert_eq!(selector.select_variable(&mut context), Some(variables[2]));
    }
}
