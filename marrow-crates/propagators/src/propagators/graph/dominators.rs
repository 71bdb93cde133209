const UNDEFINED: usize = usize::MAX;

/// The dominator tree of the nodes reachable from a root, computed with the iterative algorithm of
/// Cooper, Harvey and Kennedy.
///
/// A node `a` dominates `b` when every path from the root to `b` passes through `a`; every node
/// dominates itself. Buffers are kept between computations.
#[derive(Clone, Debug, Default)]
pub(crate) struct DominatorTree {
    immediate_dominator: Vec<usize>,
    postorder_index: Vec<usize>,
    reverse_postorder: Vec<usize>,
    predecessors: Vec<Vec<usize>>,
    /// Pre- and postorder numbers of the dominator tree, answering dominance queries in constant
    /// time.
    enter: Vec<usize>,
    exit: Vec<usize>,
    children: Vec<Vec<usize>>,
    stack: Vec<(usize, usize)>,
}

impl DominatorTree {
    /// `successors[node]` lists the successors of `node`; nodes which cannot be reached from
    /// `root` are ignored.
    pub(crate) fn compute(&mut self, root: usize, successors: &[Vec<usize>]) {
        let num_nodes = successors.len();
        self.compute_postorder(root, successors);

        for predecessors in self.predecessors.iter_mut() {
            predecessors.clear();
        }
        self.predecessors.resize_with(num_nodes, Vec::new);
        for &node in self.reverse_postorder.iter() {
            for &successor in successors[node].iter() {
                self.predecessors[successor].push(node);
            }
        }

        self.immediate_dominator.clear();
        self.immediate_dominator.resize(num_nodes, UNDEFINED);
        self.immediate_dominator[root] = root;

        let mut changed = true;
        while changed {
            changed = false;
            for position in 1..self.reverse_postorder.len() {
                let node = self.reverse_postorder[position];
                let mut candidate = UNDEFINED;
                for &predecessor in self.predecessors[node].iter() {
                    if self.immediate_dominator[predecessor] == UNDEFINED {
                        continue;
                    }
                    candidate = if candidate == UNDEFINED {
                        predecessor
                    } else {
                        self.intersect(predecessor, candidate)
                    };
                }
                if self.immediate_dominator[node] != candidate {
                    self.immediate_dominator[node] = candidate;
                    changed = true;
                }
            }
        }

        self.number_tree(root, num_nodes);
    }

    /// Fills the postorder of the depth-first search from `root`, without recursion.
    fn compute_postorder(&mut self, root: usize, successors: &[Vec<usize>]) {
        let num_nodes = successors.len();
        self.postorder_index.clear();
        self.postorder_index.resize(num_nodes, UNDEFINED);
        self.reverse_postorder.clear();

        let mut visited = vec![false; num_nodes];
        self.stack.clear();
        self.stack.push((root, 0));
        visited[root] = true;
        while let Some(top) = self.stack.last_mut() {
            let (node, position) = *top;
            if let Some(&successor) = successors[node].get(position) {
                top.1 += 1;
                if !visited[successor] {
                    visited[successor] = true;
                    self.stack.push((successor, 0));
                }
            } else {
                self.postorder_index[node] = self.reverse_postorder.len();
                self.reverse_postorder.push(node);
                let _ = self.stack.pop();
            }
        }
        self.reverse_postorder.reverse();
    }

    fn intersect(&self, mut first: usize, mut second: usize) -> usize {
        while first != second {
            while self.postorder_index[first] < self.postorder_index[second] {
                first = self.immediate_dominator[first];
            }
            while self.postorder_index[second] < self.postorder_index[first] {
                second = self.immediate_dominator[second];
            }
        }
        first
    }

    fn number_tree(&mut self, root: usize, num_nodes: usize) {
        for children in self.children.iter_mut() {
            children.clear();
        }
        self.children.resize_with(num_nodes, Vec::new);
        for &node in self.reverse_postorder.iter() {
            if node != root {
                self.children[self.immediate_dominator[node]].push(node);
            }
        }

        self.enter.clear();
        self.enter.resize(num_nodes, UNDEFINED);
        self.exit.clear();
        self.exit.resize(num_nodes, UNDEFINED);

        let mut counter = 0;
        self.stack.clear();
        self.stack.push((root, 0));
        self.enter[root] = counter;
        counter += 1;
        while let Some(top) = self.stack.last_mut() {
            let (node, position) = *top;
            if let Some(&child) = self.children[node].get(position) {
                top.1 += 1;
                self.enter[child] = counter;
                counter += 1;
                self.stack.push((child, 0));
            } else {
                self.exit[node] = counter;
                counter += 1;
                let _ = self.stack.pop();
            }
        }
    }

    pub(crate) fn is_reachable(&self, node: usize) -> bool {
        self.immediate_dominator[node] != UNDEFINED
    }

    /// The immediate dominator of a reachable node; the root is its own immediate dominator.
    pub(crate) fn immediate_dominator(&self, node: usize) -> Option<usize> {
        let dominator = self.immediate_dominator[node];
        (dominator != UNDEFINED).then_some(dominator)
    }

    pub(crate) fn dominates(&self, dominator: usize, node: usize) -> bool {
        self.is_reachable(dominator)
            && self.is_reachable(node)
            && self.enter[dominator] <= self.enter[node]
            && self.exit[node] <= self.exit[dominator]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(root: usize, edges: &[(usize, usize)], num_nodes: usize) -> DominatorTree {
        let mut successors = vec![Vec::new(); num_nodes];
        for &(from, to) in edges {
            successors[from].push(to);
        }
        let mut tree = DominatorTree::default();
        tree.compute(root, &successors);
        tree
    }

    #[test]
    fn diamond() {
        // 0 -> 1 -> 3, 0 -> 2 -> 3, 3 -> 4
        let tree = tree(0, &[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)], 5);

        assert_eq!(tree.immediate_dominator(0), Some(0));
        assert_eq!(tree.immediate_dominator(1), Some(0));
        assert_eq!(tree.immediate_dominator(2), Some(0));
        assert_eq!(tree.immediate_dominator(3), Some(0));
        assert_eq!(tree.immediate_dominator(4), Some(3));
        assert!(tree.dominates(3, 4));
        assert!(tree.dominates(0, 4));
        assert!(!tree.dominates(1, 3));
        assert!(tree.dominates(4, 4));
    }

    #[test]
    fn loops_do_not_change_dominators() {
        // 0 -> 1 -> 2 -> 3 with back edges 3 -> 1 and 2 -> 1
        let tree = tree(0, &[(0, 1), (1, 2), (2, 3), (3, 1), (2, 1)], 4);

        assert_eq!(tree.immediate_dominator(2), Some(1));
        assert_eq!(tree.immediate_dominator(3), Some(2));
        assert!(tree.dominates(1, 3));
        assert!(!tree.dominates(3, 1));
    }

    #[test]
    fn unreachable_nodes_are_not_dominated() {
        let tree = tree(0, &[(0, 1), (2, 1)], 3);

        assert!(!tree.is_reachable(2));
        assert_eq!(tree.immediate_dominator(2), None);
        assert!(!tree.dominates(0, 2));
        assert!(tree.dominates(0, 1));
    }

    #[test]
    fn recomputation_reuses_buffers() {
        let mut successors = vec![vec![1], vec![2], vec![]];
        let mut tree = DominatorTree::default();
        tree.compute(0, &successors);
        assert!(tree.dominates(1, 2));

        successors[0].push(2);
        tree.compute(0, &successors);
        assert!(!tree.dominates(1, 2));
        assert_eq!(tree.immediate_dominator(2), Some(0));
    }
}
