//! # Marrow
//! The engine of a constraint programming solver. Problems are modelled with integer variables and
//! graph variables, constrained by propagators, and solved by a depth-first search over binary
//! decisions.
//!
//! Every mutable value of the search lives in a trailed environment, so backtracking restores
//! domains, graphs and propagator state in time proportional to what changed. Propagators are run
//! by priority until a fixpoint is reached; a contradiction aborts the fixpoint and the search
//! refutes the last open decision, or jumps back further when backjumping is enabled.
//!
//! The main entry point is the [`Solver`]:
//! ```rust
//! # use marrow_core::Solver;
//! # use marrow_core::results::SatisfactionResult;
//! # use marrow_core::termination::Indefinite;
//! let mut solver = Solver::default();
//! let x = solver.new_bounded_integer(1, 3);
//!
//! let mut brancher = solver.default_brancher();
//! let result = solver.satisfy(&mut brancher, &mut Indefinite);
//! assert!(matches!(result, SatisfactionResult::Satisfiable(_)));
//! ```
//!
//! Constraints live in separate crates which implement [`propagation::Propagator`] and
//! [`propagation::PropagatorConstructor`] on top of the types re-exported here.
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub mod math;
pub(crate) mod propagators;
#[doc(hidden)]
pub mod marrow_asserts;

pub mod branching;
pub mod optimisation;
pub mod propagation;
pub mod statistics;

pub use convert_case;
pub use rand;

// We declare a private module with public use, so that all exports from API are exports directly
// from the crate.
//
// Example:
// `use marrow_core::Solver;`
// vs.
// `use marrow_core::api::Solver;`
mod api;

pub use api::*;

pub use crate::api::solver::DefaultBrancher;
pub use crate::api::solver::Solver;
pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Random;
pub use crate::propagation::PropagatorHandle;
