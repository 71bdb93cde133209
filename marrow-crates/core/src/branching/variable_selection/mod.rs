//! Variable selectors pick the variable the next decision is about.
mod first_fail;
mod input_order;
mod largest;
mod smallest;

use std::fmt::Debug;

pub use first_fail::FirstFail;
pub use input_order::InputOrder;
pub use largest::Largest;
pub use smallest::Smallest;

use crate::branching::SelectionContext;

/// Determines which variable to branch on next.
pub trait VariableSelector<Var>: Debug {
    /// Returns [`None`] exactly when every variable of the selector is fixed.
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var>;
}

/// The available variable selectors, for configuring the default brancher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum VariableSelectorType {
    #[default]
    InputOrder,
    FirstFail,
    Smallest,
    Largest,
}
