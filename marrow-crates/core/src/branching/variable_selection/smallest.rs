use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::propagation::ReadDomains;

/// Selects the unfixed variable with the smallest lower bound.
#[derive(Debug, Clone)]
pub struct Smallest {
    variables: Vec<DomainId>,
}

impl Smallest {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The Smallest variable selector was not provided with any variables");
        }
        Smallest {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector<DomainId> for Smallest {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        self.variables
            .iter()
            .copied()
            .filter(|&variable| !context.is_fixed(variable))
            .min_by_key(|&variable| context.lower_bound(variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::selection_context::tests::assignments_with;

    #[test]
    fn smallest_lower_bound_is_selected() {
        let (assignments, variables, mut random) =
            assignments_with(&[(4, 10), (-3, -3), (2, 8), (2, 3)]);
        let mut context = SelectionContext::new(&assignments, &mut random);

        let mut selector = Smallest::new(&variables);
        assert_eq!(selector.select_variable(&mut context), Some(variables[2]));
    }
}
