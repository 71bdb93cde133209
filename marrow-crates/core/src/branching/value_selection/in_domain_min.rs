use crate::branching::value_selection::ValueSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::propagation::ReadDomains;

/// Assigns the variable to its lower bound.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainMin;

impl ValueSelector<DomainId> for InDomainMin {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Decision {
        Decision::assign(decision_variable, context.lower_bound(decision_variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::selection_context::tests::assignments_with;

    #[test]
    fn assigns_lower_bound() {
        let (assignments, variables, mut random) = assignments_with(&[(-4, 9)]);
        let mut context = SelectionContext::new(&assignments, &mut random);

        let decision = InDomainMin.select_value(&mut context, variables[0]);
        assert_eq!(decision, Decision::assign(variables[0], -4));
    }
}
