use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;
use crate::engine::variables::GraphId;

/// The value of an instantiated graph variable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphValue {
    pub nodes: Vec<usize>,
    /// The edges, ordered by source then target; undirected edges are reported once with the
    /// smaller endpoint first.
    pub edges: Vec<(usize, usize)>,
}

/// A snapshot of every variable of the solver at a point where all of them were instantiated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    integers: KeyedVec<DomainId, i32>,
    graphs: KeyedVec<GraphId, GraphValue>,
}

impl Solution {
    pub(crate) fn new(
        integers: KeyedVec<DomainId, i32>,
        graphs: KeyedVec<GraphId, GraphValue>,
    ) -> Solution {
        Solution { integers, graphs }
    }

    pub fn integer_value(&self, variable: DomainId) -> i32 {
        self.integers[variable]
    }

    pub fn graph_value(&self, variable: GraphId) -> &GraphValue {
        &self.graphs[variable]
    }

    pub fn num_integer_variables(&self) -> usize {
        self.integers.len()
    }

    pub fn num_graph_variables(&self) -> usize {
        self.graphs.len()
    }
}
