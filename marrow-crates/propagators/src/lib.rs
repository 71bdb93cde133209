//! Contains the propagators of the marrow solver, each of which filters one kind of constraint.
//!
//! The [`constraints`] module offers a function per constraint which builds the matching
//! [`PropagatorConstructor`](marrow_core::propagation::PropagatorConstructor); it can be posted
//! with [`Solver::add_propagator`](marrow_core::Solver::add_propagator).
//!
//! If you want to implement your own propagator, the traits to implement are found in
//! [`marrow_core::propagation`].
pub mod constraints;
mod propagators;

pub use propagators::*;
