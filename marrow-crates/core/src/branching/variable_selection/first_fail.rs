use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::propagation::ReadDomains;

/// Selects the unfixed variable with the fewest values in its domain. Ties are broken by input
/// order.
#[derive(Debug, Clone)]
pub struct FirstFail {
    variables: Vec<DomainId>,
}

impl FirstFail {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The FirstFail variable selector was not provided with any variables");
        }
        FirstFail {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector<DomainId> for FirstFail {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        self.variables
            .iter()
            .copied()
            .filter(|&variable| !context.is_fixed(variable))
            .min_by_key(|&variable| context.size(variable))
    }
}
