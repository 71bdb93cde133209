//! Contains structures and traits to define the decision making procedure of the solver.
//!
//! In general, it provides 3 traits:
//! - The [`Brancher`] which selects the next [`Decision`]; an example implementation is the
//!   [`IndependentVariableValueBrancher`].
//! - The [`VariableSelector`] which picks the variable to branch on.
//! - The [`ValueSelector`] which turns the selected variable into a [`Decision`].
//!
//! Every decision has a negation, which the search applies when the decision is refuted. The
//! search therefore builds a binary tree.
mod brancher;
pub mod branchers;
mod decision;
pub(crate) mod selection_context;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use decision::Decision;
pub use decision::GraphOperator;
pub use decision::IntegerOperator;
pub use selection_context::SelectionContext;

#[cfg(doc)]
use crate::branching::branchers::IndependentVariableValueBrancher;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
