#![cfg(test)]
use marrow_core::propagation::PropagatorConstructor;
use marrow_core::variables::DomainId;
use marrow_core::Solver;
use marrow_propagators::constraints;

use crate::for_each_solution;

const LOWER_BOUND: i32 = -2;
const UPPER_BOUND: i32 = 3;

/// Counts the solutions of a linear constraint over three variables in
/// `[LOWER_BOUND, UPPER_BOUND]`, checking each one with `holds`.
fn count<C: PropagatorConstructor>(
    post: impl FnOnce(Vec<(i32, DomainId)>) -> C,
    weights: [i32; 3],
    holds: impl Fn(i32) -> bool,
) -> usize
where
    C::PropagatorImpl: 'static,
{
    let mut solver = Solver::default();
    let variables = (0..3)
        .map(|_| solver.new_bounded_integer(LOWER_BOUND, UPPER_BOUND))
        .collect::<Vec<_>>();
    let terms = weights
        .iter()
        .copied()
        .zip(variables.iter().copied())
        .collect::<Vec<_>>();
    if solver.add_propagator(post(terms)).is_err() {
        return 0;
    }

    let mut brancher = solver.default_brancher();
    for_each_solution(&mut solver, &mut brancher, |solution| {
        let sum = weights
            .iter()
            .zip(variables.iter())
            .map(|(&weight, &variable)| weight * solution.integer_value(variable))
            .sum::<i32>();
        assert!(holds(sum), "sum {sum} violates the constraint");
    })
}

fn brute_force(weights: [i32; 3], holds: impl Fn(i32) -> bool) -> usize {
    let range = LOWER_BOUND..=UPPER_BOUND;
    range
        .clone()
        .flat_map(|a| {
            let values = range.clone();
            range
                .clone()
                .flat_map(move |b| values.clone().map(move |c| (a, b, c)))
        })
        .filter(|&(a, b, c)| holds(weights[0] * a + weights[1] * b + weights[2] * c))
        .count()
}

#[test]
fn comparators_match_enumeration() {
    let weight_sets = [[1, 1, 1], [2, -3, 1], [-1, -1, 4], [3, 0, 3]];
    let rhs_values = [-4, 0, 1, 5];

    for weights in weight_sets {
        for rhs in rhs_values {
            assert_eq!(
                count(|terms| constraints::equals(terms, rhs), weights, |s| s == rhs),
                brute_force(weights, |s| s == rhs),
                "{weights:?} = {rhs}"
            );
            assert_eq!(
                count(
                    |terms| constraints::not_equals(terms, rhs),
                    weights,
                    |s| s != rhs
                ),
                brute_force(weights, |s| s != rhs),
                "{weights:?} != {rhs}"
            );
            assert_eq!(
                count(
                    |terms| constraints::less_than_or_equals(terms, rhs),
                    weights,
                    |s| s <= rhs
                ),
                brute_force(weights, |s| s <= rhs),
                "{weights:?} <= {rhs}"
            );
            assert_eq!(
                count(
                    |terms| constraints::greater_than_or_equals(terms, rhs),
                    weights,
                    |s| s >= rhs
                ),
                brute_force(weights, |s| s >= rhs),
                "{weights:?} >= {rhs}"
            );
        }
    }
}
