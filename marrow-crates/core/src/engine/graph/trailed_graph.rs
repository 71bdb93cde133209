use crate::engine::trailed::Environment;
use crate::engine::trailed::SetIter;
use crate::engine::trailed::SetType;
use crate::engine::trailed::TrailedInteger;
use crate::engine::trailed::TrailedSet;

/// A backtrackable graph over the nodes `0..num_nodes`.
///
/// Undirected graphs store every edge in the successor sets of both endpoints and have no
/// predecessor sets.
#[derive(Clone, Debug)]
pub(crate) struct TrailedGraph {
    directed: bool,
    nodes: TrailedSet,
    successors: Vec<TrailedSet>,
    predecessors: Vec<TrailedSet>,
    num_edges: TrailedInteger,
}

impl TrailedGraph {
    pub(crate) fn new(
        environment: &mut Environment,
        num_nodes: usize,
        directed: bool,
        set_type: SetType,
    ) -> Self {
        let mut make_sets = |count: usize| {
            (0..count)
                .map(|_| environment.make_set(set_type, num_nodes))
                .collect::<Vec<_>>()
        };
        let successors = make_sets(num_nodes);
        let predecessors = make_sets(if directed { num_nodes } else { 0 });

        TrailedGraph {
            directed,
            nodes: environment.make_set(set_type, num_nodes),
            successors,
            predecessors,
            num_edges: environment.make_int(0),
        }
    }

    pub(crate) fn num_nodes(&self, environment: &Environment) -> usize {
        environment.set_size(self.nodes)
    }

    pub(crate) fn num_edges(&self, environment: &Environment) -> usize {
        environment.read(self.num_edges) as usize
    }

    pub(crate) fn contains_node(&self, environment: &Environment, node: usize) -> bool {
        node < self.successors.len() && environment.set_contains(self.nodes, node)
    }

    pub(crate) fn contains_edge(&self, environment: &Environment, from: usize, to: usize) -> bool {
        from < self.successors.len() && environment.set_contains(self.successors[from], to)
    }

    pub(crate) fn successors<'a>(&self, environment: &'a Environment, node: usize) -> SetIter<'a> {
        environment.set_iter(self.successors[node])
    }

    pub(crate) fn predecessors<'a>(
        &self,
        environment: &'a Environment,
        node: usize,
    ) -> SetIter<'a> {
        if self.directed {
            environment.set_iter(self.predecessors[node])
        } else {
            environment.set_iter(self.successors[node])
        }
    }

    pub(crate) fn add_node(&self, environment: &mut Environment, node: usize) -> bool {
        environment.set_insert(self.nodes, node)
    }

    pub(crate) fn remove_node(&self, environment: &mut Environment, node: usize) -> bool {
        environment.set_remove(self.nodes, node)
    }

    pub(crate) fn add_edge(&self, environment: &mut Environment, from: usize, to: usize) -> bool {
        if !environment.set_insert(self.successors[from], to) {
            return false;
        }
        if self.directed {
            let _ = environment.set_insert(self.predecessors[to], from);
        } else {
            let _ = environment.set_insert(self.successors[to], from);
        }
        let _ = environment.add_assign(self.num_edges, 1);
        true
    }

    pub(crate) fn remove_edge(
        &self,
        environment: &mut Environment,
        from: usize,
        to: usize,
    ) -> bool {
        if !environment.set_remove(self.successors[from], to) {
            return false;
        }
        if self.directed {
            let _ = environment.set_remove(self.predecessors[to], from);
        } else {
            let _ = environment.set_remove(self.successors[to], from);
        }
        let _ = environment.add_assign(self.num_edges, -1);
        true
    }
}

/// A read-only view on the envelope or the kernel of a graph variable.
#[derive(Clone, Copy, Debug)]
pub struct GraphView<'a> {
    graph: &'a TrailedGraph,
    environment: &'a Environment,
}

impl<'a> GraphView<'a> {
    pub(crate) fn new(graph: &'a TrailedGraph, environment: &'a Environment) -> Self {
        GraphView { graph, environment }
    }

    pub fn is_directed(&self) -> bool {
        self.graph.directed
    }

    /// The number of nodes the graph was created over, present or not.
    pub fn capacity(&self) -> usize {
        self.graph.successors.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes(self.environment)
    }

    pub fn num_edges(&self) -> usize {
        self.graph.num_edges(self.environment)
    }

    /// The present nodes, in no particular order.
    pub fn nodes(&self) -> SetIter<'a> {
        self.environment.set_iter(self.graph.nodes)
    }

    pub fn contains_node(&self, node: usize) -> bool {
        self.graph.contains_node(self.environment, node)
    }

    pub fn contains_edge(&self, from: usize, to: usize) -> bool {
        self.graph.contains_edge(self.environment, from, to)
    }

    /// The heads of the edges leaving `node`; the neighbours of `node` for undirected graphs.
    pub fn successors(&self, node: usize) -> SetIter<'a> {
        self.graph.successors(self.environment, node)
    }

    /// The tails of the edges entering `node`; the neighbours of `node` for undirected graphs.
    pub fn predecessors(&self, node: usize) -> SetIter<'a> {
        self.graph.predecessors(self.environment, node)
    }

    pub fn num_successors(&self, node: usize) -> usize {
        self.environment.set_size(self.graph.successors[node])
    }

    pub fn num_predecessors(&self, node: usize) -> usize {
        if self.graph.directed {
            self.environment.set_size(self.graph.predecessors[node])
        } else {
            self.num_successors(node)
        }
    }
}
