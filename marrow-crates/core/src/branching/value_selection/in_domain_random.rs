use crate::branching::value_selection::ValueSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::propagation::ReadDomains;

/// Assigns the variable to a value of its domain chosen uniformly at random.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainRandom;

impl ValueSelector<DomainId> for InDomainRandom {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Decision {
        let size = context.size(decision_variable);
        let index = context.random().generate_usize_below(size);
        let value = context
            .values(decision_variable)
            .nth(index)
            .unwrap_or_else(|| context.lower_bound(decision_variable));
        Decision::assign(decision_variable, value)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::branching::IntegerOperator;
    use crate::engine::Assignments;

    #[test]
    fn selected_value_is_in_the_domain() {
        let mut assignments = Assignments::default();
        let x = assignments.new_enumerated_domain(&[-7, 2, 3, 40]);
        let mut random = SmallRng::seed_from_u64(7);
        let mut context = SelectionContext::new(&assignments, &mut random);

        for _ in 0..50 {
            match InDomainRandom.select_value(&mut context, x) {
                Decision::Integer {
                    variable,
                    operator: IntegerOperator::Assign,
                    value,
                } => {
                    assert_eq!(variable, x);
                    assert!([-7, 2, 3, 40].contains(&value));
                }
                decision => panic!("unexpected decision {decision}"),
            }
        }
    }
}
