use crate::branching::value_selection::ValueSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::propagation::ReadDomains;

/// Assigns the variable to the value of its domain closest to the middle of its bounds. Of two
/// values at the same distance the smaller one is chosen.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainMiddle;

impl ValueSelector<DomainId> for InDomainMiddle {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Decision {
        let lower_bound = context.lower_bound(decision_variable) as i64;
        let upper_bound = context.upper_bound(decision_variable) as i64;
        let middle = (lower_bound + upper_bound).div_euclid(2) as i32;

        if context.contains(decision_variable, middle) {
            return Decision::assign(decision_variable, middle);
        }

        let below = context.previous_value(decision_variable, middle);
        let above = context.next_value(decision_variable, middle);
        let value = if middle as i64 - below as i64 <= above as i64 - middle as i64 {
            below
        } else {
            above
        };
        Decision::assign(decision_variable, value)
    }
}
