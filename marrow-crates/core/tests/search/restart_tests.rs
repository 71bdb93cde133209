#![cfg(test)]
use marrow_core::options::CutoffSequenceType;
use marrow_core::options::LearningOptions;
use marrow_core::options::RestartCriterion;
use marrow_core::options::RestartOptions;
use marrow_core::options::SolverOptions;
use marrow_core::results::SatisfactionResult;
use marrow_core::search::SearchStatus;
use marrow_core::termination::Indefinite;

use crate::count_solutions;
use crate::init_logging;
use crate::pairwise_different_model;

const SEQUENCES: [CutoffSequenceType; 5] = [
    CutoffSequenceType::Monotonic,
    CutoffSequenceType::Linear,
    CutoffSequenceType::Geometrical,
    CutoffSequenceType::InnerOuterGeometrical,
    CutoffSequenceType::Luby,
];

fn learning_options() -> [LearningOptions; 3] {
    [
        LearningOptions::default(),
        LearningOptions {
            backjumping: true,
            keep_nogoods_across_restarts: false,
        },
        LearningOptions {
            backjumping: true,
            keep_nogoods_across_restarts: true,
        },
    ]
}

fn restarting(
    sequence_generator_type: CutoffSequenceType,
    criterion: RestartCriterion,
) -> RestartOptions {
    RestartOptions {
        sequence_generator_type,
        base_interval: 2,
        geometric_coef: 1.5,
        reset_cutoff_on_solution: false,
        max_restarts: 50,
        criterion,
        enabled: true,
    }
}

#[test]
fn pigeonhole_is_unsatisfiable_under_every_configuration() {
    init_logging();
    for sequence in SEQUENCES {
        for criterion in [
            RestartCriterion::Fails,
            RestartCriterion::Nodes,
            RestartCriterion::Backtracks,
        ] {
            for learning_options in learning_options() {
                let options = SolverOptions {
                    restart_options: restarting(sequence, criterion),
                    learning_options,
                    ..Default::default()
                };
                let (mut solver, _) = pairwise_different_model(options, 6, 5);
                let mut brancher = solver.default_brancher();

                let result = solver.satisfy(&mut brancher, &mut Indefinite);
                assert!(
                    matches!(result, SatisfactionResult::Unsatisfiable),
                    "{sequence} restarts on {criterion} with {learning_options:?} gave {result:?}"
                );
                assert_eq!(solver.search_status(), SearchStatus::Complete);
            }
        }
    }
}

#[test]
fn restarts_are_counted() {
    let options = SolverOptions {
        restart_options: restarting(CutoffSequenceType::Monotonic, RestartCriterion::Fails),
        ..Default::default()
    };
    let (mut solver, _) = pairwise_different_model(options, 7, 6);
    let mut brancher = solver.default_brancher();

    let result = solver.satisfy(&mut brancher, &mut Indefinite);
    assert!(matches!(result, SatisfactionResult::Unsatisfiable));
    assert_eq!(solver.statistics().num_restarts(), 50);
}

#[test]
fn restarting_search_finds_a_permutation() {
    let options = SolverOptions {
        restart_options: restarting(CutoffSequenceType::Luby, RestartCriterion::Fails),
        ..Default::default()
    };
    let (mut solver, variables) = pairwise_different_model(options, 5, 5);
    let mut brancher = solver.default_brancher();

    match solver.satisfy(&mut brancher, &mut Indefinite) {
        SatisfactionResult::Satisfiable(solution) => {
            let mut values = variables
                .iter()
                .map(|&variable| solution.integer_value(variable))
                .collect::<Vec<_>>();
            values.sort_unstable();
            assert_eq!(values, vec![1, 2, 3, 4, 5]);
        }
        other => panic!("expected a solution, got {other:?}"),
    }
}

#[test]
fn backjumping_finds_every_solution() {
    for learning_options in learning_options() {
        let options = SolverOptions {
            learning_options,
            ..Default::default()
        };
        let (mut solver, _) = pairwise_different_model(options, 4, 5);
        let mut brancher = solver.default_brancher();

        assert_eq!(count_solutions(&mut solver, &mut brancher), 120);
        assert_eq!(solver.statistics().num_solutions(), 120);
    }
}
