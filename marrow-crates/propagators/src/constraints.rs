//! Functions creating the propagators for common constraints.
//!
//! ```rust
//! # use marrow_core::results::SatisfactionResult;
//! # use marrow_core::termination::Indefinite;
//! # use marrow_core::Solver;
//! # use marrow_propagators::constraints;
//! let mut solver = Solver::default();
//! let x = solver.new_bounded_integer(0, 2);
//! let y = solver.new_bounded_integer(0, 2);
//!
//! let _ = solver
//!     .add_propagator(constraints::all_different(vec![x, y]))
//!     .expect("no conflict at the root");
//! let _ = solver
//!     .add_propagator(constraints::equals(vec![(1, x), (1, y)], 3))
//!     .expect("no conflict at the root");
//!
//! let mut brancher = solver.default_brancher();
//! let result = solver.satisfy(&mut brancher, &mut Indefinite);
//! assert!(matches!(result, SatisfactionResult::Satisfiable(_)));
//! ```
use marrow_core::propagation::PropagatorConstructor;
use marrow_core::variables::DomainId;
use marrow_core::variables::GraphId;

use crate::AllDifferentPropagatorArgs;
use crate::ArborescencePropagatorArgs;
use crate::BinPackingPropagatorArgs;
use crate::BinaryNotEqualsPropagatorArgs;
use crate::LinearComparator;
use crate::LinearSumPropagatorArgs;

/// Creates the propagator enforcing that all `variables` take distinct values.
pub fn all_different(variables: impl Into<Vec<DomainId>>) -> impl PropagatorConstructor {
    AllDifferentPropagatorArgs {
        variables: variables.into(),
    }
}

/// Creates the propagator enforcing `a != b`.
pub fn binary_not_equals(a: DomainId, b: DomainId) -> impl PropagatorConstructor {
    BinaryNotEqualsPropagatorArgs { a, b }
}

fn linear(
    terms: impl Into<Vec<(i32, DomainId)>>,
    comparator: LinearComparator,
    rhs: i32,
) -> LinearSumPropagatorArgs {
    LinearSumPropagatorArgs {
        terms: terms.into(),
        comparator,
        rhs,
    }
}

/// Creates the propagator enforcing `\sum weight * variable = rhs`.
pub fn equals(terms: impl Into<Vec<(i32, DomainId)>>, rhs: i32) -> impl PropagatorConstructor {
    linear(terms, LinearComparator::Equal, rhs)
}

/// Creates the propagator enforcing `\sum weight * variable != rhs`.
pub fn not_equals(terms: impl Into<Vec<(i32, DomainId)>>, rhs: i32) -> impl PropagatorConstructor {
    linear(terms, LinearComparator::NotEqual, rhs)
}

/// Creates the propagator enforcing `\sum weight * variable <= rhs`.
pub fn less_than_or_equals(
    terms: impl Into<Vec<(i32, DomainId)>>,
    rhs: i32,
) -> impl PropagatorConstructor {
    linear(terms, LinearComparator::LessOrEqual, rhs)
}

/// Creates the propagator enforcing `\sum weight * variable >= rhs`.
pub fn greater_than_or_equals(
    terms: impl Into<Vec<(i32, DomainId)>>,
    rhs: i32,
) -> impl PropagatorConstructor {
    linear(terms, LinearComparator::GreaterOrEqual, rhs)
}

/// Creates the propagator packing item `i` of size `sizes[i]` into bin `items[i] - offset`, such
/// that the load of every bin `j` equals `loads[j]`.
pub fn bin_packing(
    items: impl Into<Vec<DomainId>>,
    sizes: impl Into<Vec<i32>>,
    loads: impl Into<Vec<DomainId>>,
    offset: i32,
) -> impl PropagatorConstructor {
    BinPackingPropagatorArgs {
        items: items.into(),
        sizes: sizes.into(),
        loads: loads.into(),
        offset,
        no_sum_filtering: true,
    }
}

/// Creates the propagator enforcing that `graph` is an arborescence rooted at `root`.
pub fn arborescence(graph: GraphId, root: usize) -> impl PropagatorConstructor {
    ArborescencePropagatorArgs { graph, root }
}
