use crate::branching::value_selection::ValueSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::propagation::ReadDomains;

/// Assigns the variable to its upper bound.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainMax;

impl ValueSelector<DomainId> for InDomainMax {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Decision {
        Decision::assign(decision_variable, context.upper_bound(decision_variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::selection_context::tests::assignments_with;

    #[test]
    fn assigns_upper_bound() {
        let (assignments, variables, mut random) = assignments_with(&[(-4, 9)]);
        let mut context = SelectionContext::new(&assignments, &mut random);

        let decision = InDomainMax.select_value(&mut context, variables[0]);
        assert_eq!(decision, Decision::assign(variables[0], 9));
    }
}
