/// A digraph in compressed adjacency form, rebuilt on every call without reallocating.
#[derive(Clone, Debug, Default)]
pub(super) struct Digraph {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl Digraph {
    pub(super) fn clear(&mut self) {
        self.offsets.clear();
        self.targets.clear();
        self.offsets.push(0);
    }

    /// Nodes are added in order; the successors of a node are added right after it.
    pub(super) fn add_node(&mut self) {
        if self.offsets.is_empty() {
            self.offsets.push(0);
        }
        self.offsets.push(self.targets.len());
    }

    pub(super) fn add_successor(&mut self, target: usize) {
        self.targets.push(target);
        if let Some(last) = self.offsets.last_mut() {
            *last = self.targets.len();
        }
    }

    pub(super) fn num_nodes(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    fn successors(&self, node: usize) -> &[usize] {
        &self.targets[self.offsets[node]..self.offsets[node + 1]]
    }
}

/// Tarjan's algorithm without recursion, so deep alternating paths cannot exhaust the call stack.
#[derive(Clone, Debug, Default)]
pub(super) struct StronglyConnectedComponents {
    component: Vec<usize>,
    index: Vec<usize>,
    low_link: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    calls: Vec<(usize, usize)>,
}

const UNVISITED: usize = usize::MAX;

impl StronglyConnectedComponents {
    /// The component of every node; nodes share a component iff they lie on a common cycle.
    pub(super) fn compute(&mut self, graph: &Digraph) -> &[usize] {
        let num_nodes = graph.num_nodes();
        self.component.clear();
        self.component.resize(num_nodes, UNVISITED);
        self.index.clear();
        self.index.resize(num_nodes, UNVISITED);
        self.low_link.clear();
        self.low_link.resize(num_nodes, 0);
        self.on_stack.clear();
        self.on_stack.resize(num_nodes, false);
        self.stack.clear();
        self.calls.clear();

        let mut next_index = 0;
        let mut num_components = 0;

        for root in 0..num_nodes {
            if self.index[root] != UNVISITED {
                continue;
            }
            self.visit(root, &mut next_index);

            while let Some(&(node, position)) = self.calls.last() {
                let successors = graph.successors(node);
                if position < successors.len() {
                    if let Some(call) = self.calls.last_mut() {
                        call.1 += 1;
                    }
                    let successor = successors[position];
                    if self.index[successor] == UNVISITED {
                        self.visit(successor, &mut next_index);
                    } else if self.on_stack[successor] {
                        self.low_link[node] = self.low_link[node].min(self.index[successor]);
                    }
                    continue;
                }

                let _ = self.calls.pop();
                if let Some(&(parent, _)) = self.calls.last() {
                    self.low_link[parent] = self.low_link[parent].min(self.low_link[node]);
                }

                if self.low_link[node] == self.index[node] {
                    while let Some(member) = self.stack.pop() {
                        self.on_stack[member] = false;
                        self.component[member] = num_components;
                        if member == node {
                            break;
                        }
                    }
                    num_components += 1;
                }
            }
        }

        &self.component
    }

    fn visit(&mut self, node: usize, next_index: &mut usize) {
        self.index[node] = *next_index;
        self.low_link[node] = *next_index;
        *next_index += 1;
        self.stack.push(node);
        self.on_stack[node] = true;
        self.calls.push((node, 0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[&[usize]]) -> Digraph {
        let mut graph = Digraph::default();
        graph.clear();
        for successors in edges {
            graph.add_node();
            for &successor in successors.iter() {
                graph.add_successor(successor);
            }
        }
        graph
    }

    #[test]
    fn cycles_form_components() {
        // 0 -> 1 -> 2 -> 0, 2 -> 3, 3 -> 4 -> 3
        let graph = graph(&[&[1], &[2], &[0, 3], &[4], &[3]]);
        let mut scc = StronglyConnectedComponents::default();
        let component = scc.compute(&graph).to_vec();

        assert_eq!(component[0], component[1]);
        assert_eq!(component[1], component[2]);
        assert_eq!(component[3], component[4]);
        assert_ne!(component[0], component[3]);
    }

    #[test]
    fn acyclic_nodes_are_alone() {
        let graph = graph(&[&[1, 2], &[2], &[]]);
        let mut scc = StronglyConnectedComponents::default();
        let component = scc.compute(&graph).to_vec();

        assert_ne!(component[0], component[1]);
        assert_ne!(component[1], component[2]);
        assert_ne!(component[0], component[2]);
    }

    #[test]
    fn buffers_are_reused_between_calls() {
        let mut scc = StronglyConnectedComponents::default();
        let _ = scc.compute(&graph(&[&[1], &[0], &[]]));
        let component = scc.compute(&graph(&[&[], &[2], &[1]])).to_vec();

        assert_ne!(component[0], component[1]);
        assert_eq!(component[1], component[2]);
    }
}
