use std::collections::VecDeque;

use marrow_core::marrow_assert_simple;
use marrow_core::propagation::Contradiction;
use marrow_core::propagation::Domains;
use marrow_core::propagation::EntailmentStatus;
use marrow_core::propagation::GraphEvents;
use marrow_core::propagation::LocalId;
use marrow_core::propagation::Priority;
use marrow_core::propagation::PropagationContext;
use marrow_core::propagation::PropagationStatus;
use marrow_core::propagation::Propagator;
use marrow_core::propagation::PropagatorConstructor;
use marrow_core::propagation::PropagatorConstructorContext;
use marrow_core::propagation::ReadDomains;
use marrow_core::variables::GraphId;

use super::dominators::DominatorTree;

/// The [`PropagatorConstructor`] for the [`ArborescencePropagator`].
#[derive(Clone, Copy, Debug)]
pub struct ArborescencePropagatorArgs {
    pub graph: GraphId,
    pub root: usize,
}

impl PropagatorConstructor for ArborescencePropagatorArgs {
    type PropagatorImpl = ArborescencePropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let ArborescencePropagatorArgs { graph, root } = self;
        let capacity = context.domains().envelope(graph).capacity();
        marrow_assert_simple!(
            context.domains().envelope(graph).is_directed(),
            "an arborescence is a directed graph"
        );
        marrow_assert_simple!(root < capacity, "the root {root} is not a node of the graph");

        context.register_graph(graph, GraphEvents::ANY, LocalId::from(0));

        ArborescencePropagator {
            graph,
            root,
            successors: vec![Vec::new(); capacity],
            reached: vec![false; capacity],
            queue: VecDeque::new(),
            dominators: DominatorTree::default(),
        }
    }
}

/// Propagator for a graph variable forming an arborescence rooted at a fixed node: every node of
/// the graph is reached from the root through exactly one path.
///
/// Nodes are optional. The root is mandatory and has no incoming edge, every other node has
/// exactly one incoming edge. Filtering relies on the dominator tree of the envelope:
/// - nodes which the root cannot reach are removed,
/// - an edge `(u, v)` where `v` dominates `u` closes a cycle and is removed,
/// - the dominators of mandatory nodes are mandatory as well, and so is the single remaining
///   incoming edge of a mandatory node.
#[derive(Clone, Debug)]
pub struct ArborescencePropagator {
    graph: GraphId,
    root: usize,

    /// Snapshot of the envelope, indexed by node.
    successors: Vec<Vec<usize>>,
    reached: Vec<bool>,
    queue: VecDeque<usize>,
    dominators: DominatorTree,
}

impl ArborescencePropagator {
    fn take_snapshot(&mut self, context: &PropagationContext) {
        let envelope = context.envelope(self.graph);
        for (node, successors) in self.successors.iter_mut().enumerate() {
            successors.clear();
            if envelope.contains_node(node) {
                successors.extend(envelope.successors(node));
            }
        }
    }

    /// The root is mandatory and has no parent.
    fn filter_root(&self, context: &mut PropagationContext) -> Result<bool, Contradiction> {
        let mut changed = context.enforce_node(self.graph, self.root)?;
        let parents: Vec<usize> = context.envelope(self.graph).predecessors(self.root).collect();
        for parent in parents {
            changed |= context.remove_edge(self.graph, parent, self.root)?;
        }
        Ok(changed)
    }

    /// A node with a mandatory incoming edge loses its other incoming edges.
    fn filter_single_parent(
        &self,
        context: &mut PropagationContext,
    ) -> Result<bool, Contradiction> {
        let mut changed = false;
        let nodes: Vec<usize> = context.kernel(self.graph).nodes().collect();
        for node in nodes {
            let Some(parent) = context.kernel(self.graph).predecessors(node).next() else {
                continue;
            };
            let others: Vec<usize> = context
                .envelope(self.graph)
                .predecessors(node)
                .filter(|&other| other != parent)
                .collect();
            for other in others {
                changed |= context.remove_edge(self.graph, other, node)?;
            }
        }
        Ok(changed)
    }

    fn filter_unreachable(
        &mut self,
        context: &mut PropagationContext,
    ) -> Result<bool, Contradiction> {
        self.reached.fill(false);
        self.queue.clear();
        self.queue.push_back(self.root);
        self.reached[self.root] = true;
        while let Some(node) = self.queue.pop_front() {
            for &successor in self.successors[node].iter() {
                if !self.reached[successor] {
                    self.reached[successor] = true;
                    self.queue.push_back(successor);
                }
            }
        }

        let mut changed = false;
        let nodes: Vec<usize> = context.envelope(self.graph).nodes().collect();
        for node in nodes {
            if !self.reached[node] {
                changed |= context.remove_node(self.graph, node)?;
            }
        }
        Ok(changed)
    }

    fn filter_with_dominators(
        &mut self,
        context: &mut PropagationContext,
    ) -> Result<bool, Contradiction> {
        self.take_snapshot(context);
        self.dominators.compute(self.root, &self.successors);

        let mut changed = false;
        for node in 0..self.successors.len() {
            for position in 0..self.successors[node].len() {
                let successor = self.successors[node][position];
                if self.dominators.dominates(successor, node) {
                    changed |= context.remove_edge(self.graph, node, successor)?;
                }
            }
        }

        let mandatory: Vec<usize> = context.kernel(self.graph).nodes().collect();
        for node in mandatory {
            let mut dominated = node;
            while let Some(dominator) = self.dominators.immediate_dominator(dominated) {
                if dominator == dominated {
                    break;
                }
                changed |= context.enforce_node(self.graph, dominator)?;
                dominated = dominator;
            }
        }
        Ok(changed)
    }

    /// A mandatory node other than the root with one possible parent keeps that parent.
    fn filter_forced_parent(
        &self,
        context: &mut PropagationContext,
    ) -> Result<bool, Contradiction> {
        let mut changed = false;
        let nodes: Vec<usize> = context.kernel(self.graph).nodes().collect();
        for node in nodes {
            if node == self.root {
                continue;
            }
            let envelope = context.envelope(self.graph);
            if envelope.num_predecessors(node) != 1 {
                continue;
            }
            let parent = envelope.predecessors(node).next();
            if let Some(parent) = parent {
                changed |= context.enforce_edge(self.graph, parent, node)?;
            }
        }
        Ok(changed)
    }

    fn is_arborescence(&self, domains: &Domains) -> bool {
        let kernel = domains.kernel(self.graph);
        if !kernel.contains_node(self.root) || kernel.num_predecessors(self.root) != 0 {
            return false;
        }
        let mut reached = vec![false; kernel.capacity()];
        let mut queue = VecDeque::from([self.root]);
        reached[self.root] = true;
        let mut num_reached = 1;
        while let Some(node) = queue.pop_front() {
            for successor in kernel.successors(node) {
                if reached[successor] {
                    // A second path into a node.
                    return false;
                }
                reached[successor] = true;
                num_reached += 1;
                queue.push_back(successor);
            }
        }
        num_reached == kernel.num_nodes()
    }
}

impl Propagator for ArborescencePropagator {
    fn name(&self) -> &str {
        "Arborescence"
    }

    fn priority(&self) -> Priority {
        Priority::Quadratic
    }

    fn propagate_from_scratch(&mut self, mut context: PropagationContext) -> PropagationStatus {
        loop {
            let mut changed = self.filter_root(&mut context)?;
            changed |= self.filter_single_parent(&mut context)?;
            self.take_snapshot(&context);
            changed |= self.filter_unreachable(&mut context)?;
            changed |= self.filter_with_dominators(&mut context)?;
            changed |= self.filter_forced_parent(&mut context)?;
            if !changed {
                return Ok(());
            }
        }
    }

    fn is_entailed(&self, domains: Domains) -> EntailmentStatus {
        if domains.is_graph_fixed(self.graph) {
            return if self.is_arborescence(&domains) {
                EntailmentStatus::Satisfied
            } else {
                EntailmentStatus::Violated
            };
        }

        let kernel = domains.kernel(self.graph);
        let envelope = domains.envelope(self.graph);
        if !envelope.contains_node(self.root)
            || kernel.num_predecessors(self.root) > 0
            || kernel.nodes().any(|node| kernel.num_predecessors(node) > 1)
        {
            EntailmentStatus::Violated
        } else {
            EntailmentStatus::Undetermined
        }
    }
}

#[cfg(test)]
mod tests {
    use marrow_core::testing::TestSolver;

    use super::*;

    fn complete_digraph(num_nodes: usize) -> Vec<(usize, usize)> {
        (0..num_nodes)
            .flat_map(|from| (0..num_nodes).map(move |to| (from, to)))
            .filter(|&(from, to)| from != to)
            .collect()
    }

    #[test]
    fn the_root_is_mandatory_without_parents() {
        let mut solver = TestSolver::default();
        let graph = solver.new_graph_variable(3, true, complete_digraph(3));

        let _ = solver
            .new_propagator(ArborescencePropagatorArgs { graph, root: 0 })
            .expect("no conflict");

        assert!(solver.kernel(graph).contains_node(0));
        assert_eq!(solver.envelope(graph).num_predecessors(0), 0);
        assert_eq!(solver.envelope(graph).num_edges(), 4);
    }

    #[test]
    fn unreachable_nodes_are_removed() {
        let mut solver = TestSolver::default();
        let graph = solver.new_graph_variable(4, true, [(0, 1), (2, 3), (3, 2)]);

        let _ = solver
            .new_propagator(ArborescencePropagatorArgs { graph, root: 0 })
            .expect("no conflict");

        let envelope = solver.envelope(graph);
        assert!(envelope.contains_node(1));
        assert!(!envelope.contains_node(2));
        assert!(!envelope.contains_node(3));
    }

    #[test]
    fn unreachable_mandatory_node_is_a_conflict() {
        let mut solver = TestSolver::default();
        let graph = solver.new_graph_variable(3, true, [(0, 1), (2, 1)]);
        let _ = solver.enforce_node(graph, 2).expect("node in envelope");

        let _ = solver
            .new_propagator(ArborescencePropagatorArgs { graph, root: 0 })
            .expect_err("node 2 cannot be reached from the root");
    }

    #[test]
    fn edges_back_to_a_dominator_are_removed() {
        let mut solver = TestSolver::default();
        // 0 -> 1 -> 2 -> 3, 3 -> 1, 2 -> 2 and 0 -> 3
        let graph = solver.new_graph_variable(
            4,
            true,
            [(0, 1), (1, 2), (2, 3), (3, 1), (2, 2), (0, 3)],
        );

        let _ = solver
            .new_propagator(ArborescencePropagatorArgs { graph, root: 0 })
            .expect("no conflict");

        let envelope = solver.envelope(graph);
        assert!(!envelope.contains_edge(2, 2));
        // 1 is not dominated by 3, since 0 -> 1 avoids it.
        assert!(envelope.contains_edge(3, 1));
        assert!(envelope.contains_edge(0, 3));
    }

    #[test]
    fn dominators_of_mandatory_nodes_are_enforced() {
        let mut solver = TestSolver::default();
        let graph = solver.new_graph_variable(4, true, [(0, 1), (1, 2), (1, 3), (3, 2)]);
        let _ = solver
            .new_propagator(ArborescencePropagatorArgs { graph, root: 0 })
            .expect("no conflict");
        assert!(!solver.kernel(graph).contains_node(1));

        solver.new_checkpoint();
        let _ = solver.enforce_node(graph, 2).expect("node in envelope");
        solver.propagate_until_fixed_point().expect("no conflict");

        let kernel = solver.kernel(graph);
        assert!(kernel.contains_node(1));
        assert!(kernel.contains_edge(0, 1));
        assert!(!kernel.contains_node(3));

        solver.restore_to(0);
        assert!(!solver.kernel(graph).contains_node(1));
    }

    #[test]
    fn a_mandatory_parent_excludes_the_others() {
        let mut solver = TestSolver::default();
        let graph = solver.new_graph_variable(3, true, complete_digraph(3));
        let _ = solver
            .new_propagator(ArborescencePropagatorArgs { graph, root: 0 })
            .expect("no conflict");

        solver.new_checkpoint();
        let _ = solver.enforce_edge(graph, 1, 2).expect("edge in envelope");
        solver.propagate_until_fixed_point().expect("no conflict");

        let envelope = solver.envelope(graph);
        assert!(!envelope.contains_edge(0, 2));
        assert!(!envelope.contains_edge(2, 1));
        assert!(solver.kernel(graph).contains_edge(0, 1));
    }

    #[test]
    fn entailment_of_a_fixed_graph() {
        let mut solver = TestSolver::default();
        let graph = solver.new_graph_variable(3, true, [(0, 1), (0, 2)]);
        let handle = solver
            .new_propagator(ArborescencePropagatorArgs { graph, root: 0 })
            .expect("no conflict");

        let _ = solver.enforce_edge(graph, 0, 1).expect("edge in envelope");
        let _ = solver.enforce_edge(graph, 0, 2).expect("edge in envelope");

        let propagator = solver.get_propagator(handle).expect("valid handle");
        assert_eq!(
            propagator.is_entailed(solver.domains()),
            EntailmentStatus::Satisfied
        );
    }
}
