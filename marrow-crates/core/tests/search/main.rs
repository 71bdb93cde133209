#![cfg(test)]
//! End-to-end searches through the [`Solver`] facade, over a model which only uses a
//! propagator defined here.

use marrow_core::branching::Brancher;
use marrow_core::options::SolverOptions;
use marrow_core::propagation::DomainEvents;
use marrow_core::propagation::Domains;
use marrow_core::propagation::EntailmentStatus;
use marrow_core::propagation::LocalId;
use marrow_core::propagation::PropagationContext;
use marrow_core::propagation::PropagationStatus;
use marrow_core::propagation::Propagator;
use marrow_core::propagation::PropagatorConstructor;
use marrow_core::propagation::PropagatorConstructorContext;
use marrow_core::propagation::ReadDomains;
use marrow_core::results::solution_iterator::IteratedSolution;
use marrow_core::termination::Indefinite;
use marrow_core::variables::DomainId;
use marrow_core::Solver;

mod optimisation_tests;
mod restart_tests;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Pairwise difference of all variables, removing the value of a fixed variable from the others.
#[derive(Clone, Debug)]
struct PairwiseDifferent {
    variables: Vec<DomainId>,
}

impl PropagatorConstructor for PairwiseDifferent {
    type PropagatorImpl = PairwiseDifferent;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        for (index, &variable) in self.variables.iter().enumerate() {
            context.register(variable, DomainEvents::ASSIGN, LocalId::from(index as u32));
        }
        self
    }
}

impl Propagator for PairwiseDifferent {
    fn name(&self) -> &str {
        "PairwiseDifferent"
    }

    fn propagate_from_scratch(&mut self, mut context: PropagationContext) -> PropagationStatus {
        for &fixed in self.variables.iter() {
            let Some(value) = context.fixed_value(fixed) else {
                continue;
            };
            for &other in self.variables.iter().filter(|&&other| other != fixed) {
                let _ = context.remove(other, value)?;
            }
        }
        Ok(())
    }

    fn is_entailed(&self, domains: Domains) -> EntailmentStatus {
        let values = self
            .variables
            .iter()
            .map(|&variable| domains.fixed_value(variable))
            .collect::<Option<Vec<_>>>();
        match values {
            Some(mut values) => {
                let num_values = values.len();
                values.sort_unstable();
                values.dedup();
                if values.len() == num_values {
                    EntailmentStatus::Satisfied
                } else {
                    EntailmentStatus::Violated
                }
            }
            None => EntailmentStatus::Undetermined,
        }
    }
}

/// Creates `num_variables` variables over `1..=num_values` which take pairwise different
/// values.
fn pairwise_different_model(
    options: SolverOptions,
    num_variables: usize,
    num_values: i32,
) -> (Solver, Vec<DomainId>) {
    let mut solver = Solver::with_options(options);
    let variables = (0..num_variables)
        .map(|_| solver.new_bounded_integer(1, num_values))
        .collect::<Vec<_>>();
    let _ = solver.add_propagator(PairwiseDifferent {
        variables: variables.clone(),
    });
    (solver, variables)
}

fn count_solutions(solver: &mut Solver, brancher: &mut impl Brancher) -> usize {
    init_logging();
    let mut num_solutions = 0;
    let mut termination = Indefinite;
    let mut iterator = solver.get_solution_iterator(brancher, &mut termination);
    loop {
        match iterator.next_solution() {
            IteratedSolution::Solution(_) => num_solutions += 1,
            IteratedSolution::Finished | IteratedSolution::Unsatisfiable => break,
            IteratedSolution::Unknown => panic!("the search is not limited"),
        }
    }
    num_solutions
}
