#![cfg(test)]
use marrow_core::branching::branchers::GraphBrancher;
use marrow_core::containers::HashSet;
use marrow_core::results::GraphValue;
use marrow_core::variables::SetType;
use marrow_core::Solver;
use marrow_propagators::constraints;

use crate::for_each_solution;

const NUM_NODES: usize = 4;
const ROOT: usize = 0;

fn complete_digraph() -> Vec<(usize, usize)> {
    (0..NUM_NODES)
        .flat_map(|from| (0..NUM_NODES).map(move |to| (from, to)))
        .filter(|&(from, to)| from != to)
        .collect()
}

/// Whether `edges` form an arborescence over `nodes` rooted at [`ROOT`].
fn is_arborescence(nodes: &[usize], edges: &[(usize, usize)]) -> bool {
    if !nodes.contains(&ROOT) {
        return false;
    }
    if edges
        .iter()
        .any(|(from, to)| !nodes.contains(from) || !nodes.contains(to))
    {
        return false;
    }

    let num_parents = |node: usize| edges.iter().filter(|&&(_, to)| to == node).count();
    if num_parents(ROOT) != 0 || nodes.iter().any(|&node| node != ROOT && num_parents(node) != 1)
    {
        return false;
    }

    let mut reached = vec![ROOT];
    let mut position = 0;
    while let Some(&node) = reached.get(position) {
        position += 1;
        for &(from, to) in edges {
            if from == node && !reached.contains(&to) {
                reached.push(to);
            }
        }
    }
    reached.len() == nodes.len()
}

fn brute_force() -> (usize, usize) {
    let all_edges = complete_digraph();
    let mut num_arborescences = 0;
    let mut num_spanning = 0;

    for node_set in 0_u32..1 << NUM_NODES {
        let nodes = (0..NUM_NODES)
            .filter(|node| node_set & (1 << node) != 0)
            .collect::<Vec<_>>();
        for edge_set in 0_u32..1 << all_edges.len() {
            let edges = all_edges
                .iter()
                .enumerate()
                .filter(|&(index, _)| edge_set & (1 << index) != 0)
                .map(|(_, &edge)| edge)
                .collect::<Vec<_>>();
            if is_arborescence(&nodes, &edges) {
                num_arborescences += 1;
                if nodes.len() == NUM_NODES {
                    num_spanning += 1;
                }
            }
        }
    }

    (num_arborescences, num_spanning)
}

fn sorted(value: &GraphValue) -> (Vec<usize>, Vec<(usize, usize)>) {
    let mut nodes = value.nodes.clone();
    nodes.sort_unstable();
    let mut edges = value.edges.clone();
    edges.sort_unstable();
    (nodes, edges)
}

#[test]
fn arborescences_of_the_complete_digraph() {
    let (expected, expected_spanning) = brute_force();
    assert_eq!(expected, 29);
    assert_eq!(expected_spanning, 16);

    let mut solver = Solver::default();
    let graph = solver.new_graph_variable(NUM_NODES, true, SetType::BitSet, complete_digraph());
    let _ = solver
        .add_propagator(constraints::arborescence(graph, ROOT))
        .expect("no conflict at the root");

    let mut brancher = GraphBrancher::new(&[graph]);
    let mut seen: HashSet<(Vec<usize>, Vec<(usize, usize)>)> = HashSet::default();
    let mut num_spanning = 0;
    let num_solutions = for_each_solution(&mut solver, &mut brancher, |solution| {
        let (nodes, edges) = sorted(solution.graph_value(graph));
        assert!(
            is_arborescence(&nodes, &edges),
            "{nodes:?} with {edges:?} is not an arborescence"
        );
        if nodes.len() == NUM_NODES {
            num_spanning += 1;
        }
        assert!(seen.insert((nodes, edges)), "a solution is reported twice");
    });

    assert_eq!(num_solutions, expected);
    assert_eq!(num_spanning, expected_spanning);
}

#[test]
fn graph_without_edges_only_keeps_the_root() {
    let mut solver = Solver::default();
    let graph = solver.new_graph_variable(NUM_NODES, true, SetType::Sparse, []);
    let _ = solver
        .add_propagator(constraints::arborescence(graph, ROOT))
        .expect("no conflict at the root");

    let mut brancher = solver.default_brancher();
    let num_solutions = for_each_solution(&mut solver, &mut brancher, |solution| {
        let (nodes, edges) = sorted(solution.graph_value(graph));
        assert_eq!(nodes, vec![ROOT]);
        assert!(edges.is_empty());
    });

    assert_eq!(num_solutions, 1);
}
