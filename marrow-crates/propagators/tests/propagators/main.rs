#![cfg(test)]
//! Checks the propagators inside complete searches: the number of solutions found by the solver
//! is compared with a brute force enumeration of the same model.

use marrow_core::branching::Brancher;
use marrow_core::results::solution_iterator::IteratedSolution;
use marrow_core::results::Solution;
use marrow_core::termination::Indefinite;
use marrow_core::Solver;

mod all_different_tests;
mod arborescence_tests;
mod bin_packing_tests;
mod linear_tests;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Enumerates every solution of the model in `solver`, passing each to `on_solution`.
fn for_each_solution(
    solver: &mut Solver,
    brancher: &mut impl Brancher,
    mut on_solution: impl FnMut(&Solution),
) -> usize {
    init_logging();
    let mut num_solutions = 0;
    let mut termination = Indefinite;
    let mut iterator = solver.get_solution_iterator(brancher, &mut termination);
    loop {
        match iterator.next_solution() {
            IteratedSolution::Solution(solution) => {
                num_solutions += 1;
                on_solution(&solution);
            }
            IteratedSolution::Finished | IteratedSolution::Unsatisfiable => break,
            IteratedSolution::Unknown => panic!("the search is not limited"),
        }
    }
    num_solutions
}

fn count_solutions(solver: &mut Solver, brancher: &mut impl Brancher) -> usize {
    for_each_solution(solver, brancher, |_| {})
}
