use crate::branching::value_selection::ValueSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::propagation::ReadDomains;

/// Splits the domain in half, exploring the lower half first.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainSplit;

impl ValueSelector<DomainId> for InDomainSplit {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Decision {
        let lower_bound = context.lower_bound(decision_variable) as i64;
        let upper_bound = context.upper_bound(decision_variable) as i64;
        let middle = (lower_bound + upper_bound).div_euclid(2) as i32;
        Decision::less_or_equal(decision_variable, middle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::selection_context::tests::assignments_with;

    #[test]
    fn both_halves_are_non_empty() {
        let (assignments, variables, mut random) = assignments_with(&[(-3, -2)]);
        let mut context = SelectionContext::new(&assignments, &mut random);

        let decision = InDomainSplit.select_value(&mut context, variables[0]);
        assert_eq!(decision, Decision::less_or_equal(variables[0], -3));
        assert_eq!(decision.negation(), Decision::greater_or_equal(variables[0], -2));
    }
}
