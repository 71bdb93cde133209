//! Implementations of the [`Brancher`](crate::branching::Brancher) trait.
mod graph_brancher;
mod independent_variable_value_brancher;
mod sequenced_brancher;

pub use graph_brancher::GraphBrancher;
pub use independent_variable_value_brancher::IndependentVariableValueBrancher;
pub use sequenced_brancher::SequencedBrancher;
