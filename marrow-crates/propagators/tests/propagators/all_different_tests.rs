#![cfg(test)]
use marrow_core::branching::branchers::IndependentVariableValueBrancher;
use marrow_core::branching::value_selection::InDomainMin;
use marrow_core::branching::variable_selection::InputOrder;
use marrow_core::containers::HashSet;
use marrow_core::variables::DomainId;
use marrow_core::Solver;
use marrow_propagators::constraints;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

use crate::count_solutions;
use crate::for_each_solution;

#[test]
fn permutations_of_eight_values() {
    let mut solver = Solver::default();
    let variables = (0..8)
        .map(|_| solver.new_sparse_integer((1..=8).collect::<Vec<_>>()))
        .collect::<Vec<_>>();
    let _ = solver
        .add_propagator(constraints::all_different(variables.clone()))
        .expect("no conflict at the root");

    let mut brancher = solver.default_brancher();
    let mut seen: HashSet<Vec<i32>> = HashSet::default();
    let num_solutions = for_each_solution(&mut solver, &mut brancher, |solution| {
        let values = variables
            .iter()
            .map(|&variable| solution.integer_value(variable))
            .collect::<Vec<_>>();
        let distinct = values.iter().collect::<HashSet<_>>();
        assert_eq!(distinct.len(), values.len(), "{values:?} repeats a value");
        assert!(seen.insert(values), "a solution is reported twice");
    });

    assert_eq!(num_solutions, 40320);
}

#[test]
fn too_few_values_have_no_solution() {
    let mut solver = Solver::default();
    let mut variables = (0..3)
        .map(|_| solver.new_sparse_integer(vec![1, 2]))
        .collect::<Vec<_>>();
    variables.push(solver.new_sparse_integer(vec![1, 2, 3]));

    let result = solver.add_propagator(constraints::all_different(variables));
    assert!(result.is_err());

    let mut brancher = solver.default_brancher();
    assert_eq!(count_solutions(&mut solver, &mut brancher), 0);
}

/// Eight variables over `1..=8`, where the variables in `fixed_to_four` only keep the value 4.
fn permutations_with_fixed_fours(fixed_to_four: &[usize]) -> usize {
    let mut solver = Solver::default();
    let variables = (0..8)
        .map(|index| {
            if fixed_to_four.contains(&index) {
                solver.new_sparse_integer(vec![4])
            } else {
                solver.new_sparse_integer((1..=8).collect::<Vec<_>>())
            }
        })
        .collect::<Vec<_>>();
    let _ = solver.add_propagator(constraints::all_different(variables));

    let mut brancher = solver.default_brancher();
    count_solutions(&mut solver, &mut brancher)
}

#[test]
fn a_value_forced_on_one_variable_is_left_to_the_others() {
    assert_eq!(permutations_with_fixed_fours(&[0]), 5040);
}

#[test]
fn shrinking_a_domain_to_a_forced_value_leaves_no_permutation() {
    assert_eq!(permutations_with_fixed_fours(&[0, 5]), 0);
}

fn random_domains(rng: &mut SmallRng) -> Vec<Vec<i32>> {
    let num_variables: usize = rng.gen_range(2..=6);
    let num_values = num_variables as i32 + rng.gen_range(-1..=1);
    (0..num_variables)
        .map(|_| {
            let mut domain = (1..=num_values)
                .filter(|_| rng.gen_bool(0.7))
                .collect::<Vec<_>>();
            if domain.is_empty() {
                domain.push(rng.gen_range(1..=num_values));
            }
            domain
        })
        .collect()
}

fn brute_force(domains: &[Vec<i32>], chosen: &mut Vec<i32>) -> usize {
    let Some(domain) = domains.get(chosen.len()) else {
        return 1;
    };
    let mut count = 0;
    for &value in domain {
        if !chosen.contains(&value) {
            chosen.push(value);
            count += brute_force(domains, chosen);
            let _ = chosen.pop();
        }
    }
    count
}

/// Returns the number of solutions and the number of search nodes.
fn solve(domains: &[Vec<i32>], decomposed: bool) -> (usize, u64) {
    let mut solver = Solver::default();
    let variables: Vec<DomainId> = domains
        .iter()
        .map(|domain| solver.new_sparse_integer(domain.clone()))
        .collect();

    if decomposed {
        for (index, &a) in variables.iter().enumerate() {
            for &b in variables[index + 1..].iter() {
                let _ = solver.add_propagator(constraints::binary_not_equals(a, b));
            }
        }
    } else {
        let _ = solver.add_propagator(constraints::all_different(variables.clone()));
    }

    let mut brancher = IndependentVariableValueBrancher::<DomainId, _, _>::new(
        InputOrder::new(&variables),
        InDomainMin,
    );
    let num_solutions = count_solutions(&mut solver, &mut brancher);
    (num_solutions, solver.statistics().num_nodes())
}

#[test]
fn agrees_with_the_decomposition_on_random_instances() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let domains = random_domains(&mut rng);
        let expected = brute_force(&domains, &mut Vec::new());

        let (arc_consistent, arc_consistent_nodes) = solve(&domains, false);
        let (decomposed, decomposed_nodes) = solve(&domains, true);

        assert_eq!(arc_consistent, expected, "domains {domains:?}");
        assert_eq!(decomposed, expected, "domains {domains:?}");
        assert!(
            arc_consistent_nodes <= decomposed_nodes,
            "domains {domains:?}: {arc_consistent_nodes} > {decomposed_nodes} nodes"
        );
    }
}
