use log::warn;

use crate::branching::Brancher;
use crate::branching::Decision;
use crate::branching::GraphOperator;
use crate::branching::SelectionContext;
use crate::engine::variables::GraphId;
use crate::propagation::ReadDomains;

/// Branches on the graph variables in input order. For the first graph which is not fixed it
/// enforces the first envelope node outside the kernel; once all nodes are decided, it enforces
/// the first envelope edge outside the kernel.
#[derive(Debug, Clone)]
pub struct GraphBrancher {
    graphs: Vec<GraphId>,
}

impl GraphBrancher {
    pub fn new(graphs: &[GraphId]) -> Self {
        if graphs.is_empty() {
            warn!("The GraphBrancher was not provided with any variables");
        }
        GraphBrancher {
            graphs: graphs.to_vec(),
        }
    }
}

impl Brancher for GraphBrancher {
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision> {
        for &graph in &self.graphs {
            let envelope = context.envelope(graph);
            let kernel = context.kernel(graph);

            if let Some(node) = envelope.nodes().find(|&node| !kernel.contains_node(node)) {
                return Some(Decision::Graph {
                    variable: graph,
                    operator: GraphOperator::EnforceNode(node),
                });
            }

            let undecided_edge = envelope.nodes().find_map(|from| {
                envelope
                    .successors(from)
                    .find(|&to| {
                        (envelope.is_directed() || from <= to) && !kernel.contains_edge(from, to)
                    })
                    .map(|to| (from, to))
            });
            if let Some((from, to)) = undecided_edge {
                return Some(Decision::Graph {
                    variable: graph,
                    operator: GraphOperator::EnforceEdge(from, to),
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::basic_types::Cause;
    use crate::engine::trailed::SetType;
    use crate::engine::Assignments;

    #[test]
    fn nodes_before_edges() {
        let mut assignments = Assignments::default();
        let graph = assignments.new_graph(2, true, SetType::BitSet, [(0, 1)]);
        let mut random = SmallRng::seed_from_u64(0);

        let mut brancher = GraphBrancher::new(&[graph]);
        {
            let mut context = SelectionContext::new(&assignments, &mut random);
            assert_eq!(
                brancher.next_decision(&mut context),
                Some(Decision::Graph {
                    variable: graph,
                    operator: GraphOperator::EnforceNode(0)
                })
            );
        }

        let _ = assignments
            .enforce_node(graph, 0, Cause::Root)
            .expect("node is in the envelope");
        let _ = assignments
            .enforce_node(graph, 1, Cause::Root)
            .expect("node is in the envelope");
        {
            let mut context = SelectionContext::new(&assignments, &mut random);
            assert_eq!(
                brancher.next_decision(&mut context),
                Some(Decision::Graph {
                    variable: graph,
                    operator: GraphOperator::EnforceEdge(0, 1)
                })
            );
        }

        let _ = assignments
            .enforce_edge(graph, 0, 1, Cause::Root)
            .expect("edge is in the envelope");
        let mut context = SelectionContext::new(&assignments, &mut random);
        assert_eq!(brancher.next_decision(&mut context), None);
    }
}
