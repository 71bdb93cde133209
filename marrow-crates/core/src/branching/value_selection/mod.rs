//! Value selectors turn the variable picked by a
//! [`VariableSelector`](crate::branching::variable_selection::VariableSelector) into a
//! [`Decision`].
mod in_domain_max;
mod in_domain_middle;
mod in_domain_min;
mod in_domain_random;
mod in_domain_split;

use std::fmt::Debug;

pub use in_domain_max::InDomainMax;
pub use in_domain_middle::InDomainMiddle;
pub use in_domain_min::InDomainMin;
pub use in_domain_random::InDomainRandom;
pub use in_domain_split::InDomainSplit;

use crate::branching::Decision;
use crate::branching::SelectionContext;

/// Determines the decision taken on the variable which was selected.
pub trait ValueSelector<Var>: Debug {
    /// Called with a variable which is not fixed.
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var)
        -> Decision;
}

/// The available value selectors, for configuring the default brancher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ValueSelectorType {
    #[default]
    InDomainMin,
    InDomainMax,
    InDomainMiddle,
    InDomainRandom,
    InDomainSplit,
}
