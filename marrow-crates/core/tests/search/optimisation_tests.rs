#![cfg(test)]
use std::ops::ControlFlow;

use marrow_core::optimisation::OptimisationDirection;
use marrow_core::options::ObjectiveStrategy;
use marrow_core::options::SolverOptions;
use marrow_core::results::OptimisationResult;
use marrow_core::results::Solution;
use marrow_core::termination::Indefinite;
use marrow_core::termination::NodeBudget;
use marrow_core::Solver;

use crate::init_logging;
use crate::pairwise_different_model;
use crate::PairwiseDifferent;

const STRATEGIES: [Option<ObjectiveStrategy>; 4] = [
    None,
    Some(ObjectiveStrategy::BottomUp),
    Some(ObjectiveStrategy::TopDown),
    Some(ObjectiveStrategy::Dichotomic),
];

#[test]
fn every_strategy_proves_the_optimum() {
    init_logging();
    for strategy in STRATEGIES {
        for (direction, expected) in [
            (OptimisationDirection::Minimise, 4),
            (OptimisationDirection::Maximise, 6),
        ] {
            // The other variables take {1, 2, 3} between them.
            let mut solver = Solver::default();
            let objective = solver.new_bounded_integer(1, 6);
            let mut variables = (0..3)
                .map(|_| solver.new_bounded_integer(1, 3))
                .collect::<Vec<_>>();
            variables.push(objective);
            let _ = solver
                .add_propagator(PairwiseDifferent { variables })
                .expect("no conflict at the root");
            let mut brancher = solver.default_brancher();

            let mut values = vec![];
            let result = solver.optimise(
                &mut brancher,
                &mut Indefinite,
                direction,
                objective,
                strategy,
                |solution: &Solution| {
                    values.push(solution.integer_value(objective));
                    ControlFlow::Continue(())
                },
            );

            assert!(
                matches!(&result, OptimisationResult::Optimal(solution) if solution.integer_value(objective) == expected),
                "{strategy:?} {direction:?} gave {result:?}"
            );
            assert_eq!(values.last(), Some(&expected));
        }
    }
}

#[test]
fn interrupted_optimisation_keeps_the_incumbent() {
    let (mut solver, variables) = pairwise_different_model(SolverOptions::default(), 5, 8);
    let objective = variables[0];
    let mut brancher = solver.default_brancher();

    let result = solver.optimise(
        &mut brancher,
        &mut NodeBudget::new(6),
        OptimisationDirection::Maximise,
        objective,
        None,
        |_: &Solution| ControlFlow::Continue(()),
    );

    match result {
        OptimisationResult::Satisfiable(solution) => {
            assert!(solution.integer_value(objective) < 8);
        }
        other => panic!("expected an incumbent without proof, got {other:?}"),
    }
}
