use std::fmt::Debug;
use std::marker::PhantomData;

use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::Decision;
use crate::branching::SelectionContext;

/// A [`Brancher`] which chooses the variable and the decision on it separately: first the
/// [`VariableSelector`] picks a variable, then the [`ValueSelector`] picks the decision.
#[derive(Debug)]
pub struct IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect> {
    pub(crate) variable_selector: VariableSelect,
    pub(crate) value_selector: ValueSelect,
    variable_type: PhantomData<Var>,
}

impl<Var, VariableSelect, ValueSelect>
    IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    pub fn new(variable_selector: VariableSelect, value_selector: ValueSelect) -> Self {
        IndependentVariableValueBrancher {
            variable_selector,
            value_selector,
            variable_type: PhantomData,
        }
    }
}

impl<Var, VariableSelect, ValueSelect> Brancher
    for IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    Var: Debug + 'static,
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision> {
        self.variable_selector
            .select_variable(context)
            .map(|variable| self.value_selector.select_value(context, variable))
    }
}
