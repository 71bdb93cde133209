use super::GraphEvent;
use super::GraphView;
use super::TrailedGraph;
use crate::basic_types::Cause;
use crate::basic_types::Contradiction;
use crate::basic_types::ContradictionKind;
use crate::basic_types::GraphElement;
use crate::basic_types::GraphValue;
use crate::engine::trailed::Environment;
use crate::engine::trailed::SetType;
use crate::engine::variables::GraphId;

/// What a graph variable needs to perform a change.
#[derive(Debug)]
pub(crate) struct GraphUpdate<'a> {
    pub(crate) environment: &'a mut Environment,
    pub(crate) graph: GraphId,
    pub(crate) cause: Cause,
    /// Receives the events of every change which is performed.
    pub(crate) events: &'a mut Vec<(GraphEvent, GraphElement)>,
}

impl GraphUpdate<'_> {
    fn violation(&self, element: GraphElement) -> Contradiction {
        Contradiction::new(
            ContradictionKind::Graph {
                graph: self.graph,
                element,
            },
            self.cause,
        )
    }
}

/// A graph variable over the nodes `0..num_nodes`.
///
/// The envelope only loses nodes and edges, the kernel only gains them, and the kernel is always
/// a subgraph of the envelope.
#[derive(Clone, Debug)]
pub(crate) struct GraphVariable {
    directed: bool,
    envelope: TrailedGraph,
    kernel: TrailedGraph,
}

impl GraphVariable {
    /// Creates a variable whose envelope holds every node and the given edges, and whose kernel is
    /// empty.
    pub(crate) fn new(
        environment: &mut Environment,
        num_nodes: usize,
        directed: bool,
        set_type: SetType,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let envelope = TrailedGraph::new(environment, num_nodes, directed, set_type);
        let kernel = TrailedGraph::new(environment, num_nodes, directed, set_type);
        for node in 0..num_nodes {
            let _ = envelope.add_node(environment, node);
        }
        for (from, to) in edges {
            let _ = envelope.add_edge(environment, from, to);
        }

        GraphVariable {
            directed,
            envelope,
            kernel,
        }
    }

    pub(crate) fn envelope<'a>(&'a self, environment: &'a Environment) -> GraphView<'a> {
        GraphView::new(&self.envelope, environment)
    }

    pub(crate) fn kernel<'a>(&'a self, environment: &'a Environment) -> GraphView<'a> {
        GraphView::new(&self.kernel, environment)
    }

    pub(crate) fn is_instantiated(&self, environment: &Environment) -> bool {
        self.envelope.num_nodes(environment) == self.kernel.num_nodes(environment)
            && self.envelope.num_edges(environment) == self.kernel.num_edges(environment)
    }

    /// The kernel, sorted; only meaningful once the variable is instantiated.
    pub(crate) fn value(&self, environment: &Environment) -> GraphValue {
        let kernel = self.kernel(environment);
        let mut nodes = kernel.nodes().collect::<Vec<_>>();
        nodes.sort_unstable();
        let mut edges = nodes
            .iter()
            .flat_map(|&from| kernel.successors(from).map(move |to| (from, to)))
            .filter(|&(from, to)| self.directed || from <= to)
            .collect::<Vec<_>>();
        edges.sort_unstable();
        GraphValue { nodes, edges }
    }

    /// Removes the node and its incident edges from the envelope.
    pub(crate) fn remove_node(
        &self,
        update: &mut GraphUpdate<'_>,
        node: usize,
    ) -> Result<bool, Contradiction> {
        if !self.envelope.contains_node(update.environment, node) {
            return Ok(false);
        }
        if self.kernel.contains_node(update.environment, node) {
            return Err(update.violation(GraphElement::Node(node)));
        }

        let outgoing = self
            .envelope
            .successors(update.environment, node)
            .collect::<Vec<_>>();
        for to in outgoing {
            let _ = self.remove_edge(update, node, to)?;
        }
        if self.directed {
            let incoming = self
                .envelope
                .predecessors(update.environment, node)
                .collect::<Vec<_>>();
            for from in incoming {
                let _ = self.remove_edge(update, from, node)?;
            }
        }

        let _ = self.envelope.remove_node(update.environment, node);
        update
            .events
            .push((GraphEvent::RemoveNode, GraphElement::Node(node)));
        Ok(true)
    }

    pub(crate) fn remove_edge(
        &self,
        update: &mut GraphUpdate<'_>,
        from: usize,
        to: usize,
    ) -> Result<bool, Contradiction> {
        if !self.envelope.contains_edge(update.environment, from, to) {
            return Ok(false);
        }
        if self.kernel.contains_edge(update.environment, from, to) {
            return Err(update.violation(GraphElement::Edge(from, to)));
        }

        let _ = self.envelope.remove_edge(update.environment, from, to);
        update
            .events
            .push((GraphEvent::RemoveEdge, GraphElement::Edge(from, to)));
        Ok(true)
    }

    pub(crate) fn enforce_node(
        &self,
        update: &mut GraphUpdate<'_>,
        node: usize,
    ) -> Result<bool, Contradiction> {
        if self.kernel.contains_node(update.environment, node) {
            return Ok(false);
        }
        if !self.envelope.contains_node(update.environment, node) {
            return Err(update.violation(GraphElement::Node(node)));
        }

        let _ = self.kernel.add_node(update.environment, node);
        update
            .events
            .push((GraphEvent::EnforceNode, GraphElement::Node(node)));
        Ok(true)
    }

    /// Adds the edge and both of its endpoints to the kernel.
    pub(crate) fn enforce_edge(
        &self,
        update: &mut GraphUpdate<'_>,
        from: usize,
        to: usize,
    ) -> Result<bool, Contradiction> {
        if self.kernel.contains_edge(update.environment, from, to) {
            return Ok(false);
        }
        if !self.envelope.contains_edge(update.environment, from, to) {
            return Err(update.violation(GraphElement::Edge(from, to)));
        }

        let _ = self.enforce_node(update, from)?;
        let _ = self.enforce_node(update, to)?;
        let _ = self.kernel.add_edge(update.environment, from, to);
        update
            .events
            .push((GraphEvent::EnforceEdge, GraphElement::Edge(from, to)));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        environment: Environment,
        events: Vec<(GraphEvent, GraphElement)>,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                environment: Environment::default(),
                events: Vec::new(),
            }
        }

        fn update(&mut self) -> GraphUpdate<'_> {
            GraphUpdate {
                environment: &mut self.environment,
                graph: GraphId { id: 0 },
                cause: Cause::Root,
                events: &mut self.events,
            }
        }
    }

    fn complete_edges(num_nodes: usize) -> Vec<(usize, usize)> {
        (0..num_nodes)
            .flat_map(|from| (0..num_nodes).map(move |to| (from, to)))
            .filter(|(from, to)| from != to)
            .collect()
    }

    #[test]
    fn removing_a_node_removes_its_edges() {
        for set_type in [SetType::BitSet, SetType::Sparse] {
            let mut fixture = Fixture::new();
            let graph =
                GraphVariable::new(&mut fixture.environment, 3, true, set_type, complete_edges(3));

            assert!(graph.remove_node(&mut fixture.update(), 1).unwrap());

            let envelope = graph.envelope(&fixture.environment);
            assert_eq!(envelope.num_nodes(), 2);
            assert_eq!(envelope.num_edges(), 2);
            assert!(envelope.contains_edge(0, 2));
            assert!(!envelope.contains_edge(0, 1));
            assert_eq!(envelope.predecessors(1).count(), 0);
        }
    }

    #[test]
    fn enforcing_an_edge_enforces_its_endpoints() {
        let mut fixture = Fixture::new();
        let graph = GraphVariable::new(
            &mut fixture.environment,
            3,
            false,
            SetType::BitSet,
            [(0, 1), (1, 2)],
        );

        assert!(graph.enforce_edge(&mut fixture.update(), 2, 1).unwrap());

        let kernel = graph.kernel(&fixture.environment);
        assert!(kernel.contains_node(1) && kernel.contains_node(2));
        assert!(kernel.contains_edge(1, 2));
        assert_eq!(
            fixture.events,
            vec![
                (GraphEvent::EnforceNode, GraphElement::Node(2)),
                (GraphEvent::EnforceNode, GraphElement::Node(1)),
                (GraphEvent::EnforceEdge, GraphElement::Edge(2, 1)),
            ]
        );
    }

    #[test]
    fn kernel_outside_envelope_is_a_contradiction() {
        let mut fixture = Fixture::new();
        let graph = GraphVariable::new(
            &mut fixture.environment,
            3,
            true,
            SetType::Sparse,
            [(0, 1), (1, 2)],
        );

        let _ = graph.enforce_edge(&mut fixture.update(), 0, 1).unwrap();

        let error = graph.remove_node(&mut fixture.update(), 1).unwrap_err();
        assert_eq!(
            error.kind(),
            ContradictionKind::Graph {
                graph: GraphId { id: 0 },
                element: GraphElement::Node(1)
            }
        );
        assert!(graph.remove_edge(&mut fixture.update(), 0, 1).is_err());
        assert!(graph.enforce_edge(&mut fixture.update(), 0, 2).is_err());
        assert!(graph.envelope(&fixture.environment).contains_edge(1, 2));
    }

    #[test]
    fn instantiation_and_value() {
        let mut fixture = Fixture::new();
        let graph = GraphVariable::new(
            &mut fixture.environment,
            3,
            false,
            SetType::BitSet,
            [(0, 1), (1, 2)],
        );

        fixture.environment.world_push();
        let _ = graph.remove_node(&mut fixture.update(), 0).unwrap();
        let _ = graph.enforce_edge(&mut fixture.update(), 1, 2).unwrap();
        assert!(graph.is_instantiated(&fixture.environment));
        assert_eq!(
            graph.value(&fixture.environment),
            GraphValue {
                nodes: vec![1, 2],
                edges: vec![(1, 2)]
            }
        );

        fixture.environment.world_pop();
        assert!(!graph.is_instantiated(&fixture.environment));
        assert_eq!(graph.envelope(&fixture.environment).num_edges(), 2);
    }
}
