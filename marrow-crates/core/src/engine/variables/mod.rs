//! Identifiers of the decision variables of a solver.
mod domain_id;
mod graph_id;

pub use domain_id::DomainId;
pub use graph_id::GraphId;

/// Any variable of the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Subject {
    Integer(DomainId),
    Graph(GraphId),
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Integer(domain) => write!(f, "{domain}"),
            Subject::Graph(graph) => write!(f, "{graph}"),
        }
    }
}

impl From<DomainId> for Subject {
    fn from(value: DomainId) -> Self {
        Subject::Integer(value)
    }
}

impl From<GraphId> for Subject {
    fn from(value: GraphId) -> Self {
        Subject::Graph(value)
    }
}
