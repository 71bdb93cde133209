use std::fmt::Display;
use std::fmt::Formatter;

use crate::engine::variables::DomainId;
use crate::engine::variables::GraphId;
use crate::engine::variables::Subject;
use crate::propagation::PropagatorId;

/// The result of running a propagator (or a fixpoint of propagators).
pub type PropagationStatus = Result<(), Contradiction>;

/// Who performed a change to a domain or a graph variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cause {
    /// Changes made while building the model, and bounds imposed by the objective manager.
    Root,
    /// The positive branch of the decision at the given depth of the decision path.
    Decision { depth: u32 },
    /// The negated branch of the decision at the given depth of the decision path.
    Refutation { depth: u32 },
    Propagator(PropagatorId),
}

impl Cause {
    pub fn propagator(&self) -> Option<PropagatorId> {
        match self {
            Cause::Propagator(propagator_id) => Some(*propagator_id),
            _ => None,
        }
    }
}

/// An element of a graph variable which caused a contradiction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphElement {
    Node(usize),
    Edge(usize, usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContradictionKind {
    /// The operation would have left the domain of the variable empty.
    EmptyDomain(DomainId),
    /// The operation would have broken `kernel ⊆ envelope` for the element.
    Graph { graph: GraphId, element: GraphElement },
    /// A propagator detected a failure which is not tied to a single variable.
    Explicit,
}

/// A failed domain operation. Raised instead of performing the change, so the state is
/// unaffected by the operation which failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contradiction {
    kind: ContradictionKind,
    cause: Cause,
}

impl Contradiction {
    pub fn new(kind: ContradictionKind, cause: Cause) -> Contradiction {
        Contradiction { kind, cause }
    }

    pub fn empty_domain(domain: DomainId, cause: Cause) -> Contradiction {
        Contradiction::new(ContradictionKind::EmptyDomain(domain), cause)
    }

    pub fn kind(&self) -> ContradictionKind {
        self.kind
    }

    pub fn cause(&self) -> Cause {
        self.cause
    }

    /// The variable which failed, if the contradiction concerns a single variable.
    pub fn subject(&self) -> Option<Subject> {
        match self.kind {
            ContradictionKind::EmptyDomain(domain) => Some(Subject::Integer(domain)),
            ContradictionKind::Graph { graph, .. } => Some(Subject::Graph(graph)),
            ContradictionKind::Explicit => None,
        }
    }
}

impl Display for Contradiction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ContradictionKind::EmptyDomain(domain) => write!(f, "empty domain of {domain}")?,
            ContradictionKind::Graph {
                graph,
                element: GraphElement::Node(node),
            } => write!(f, "node {node} of {graph}")?,
            ContradictionKind::Graph {
                graph,
                element: GraphElement::Edge(from, to),
            } => write!(f, "edge ({from}, {to}) of {graph}")?,
            ContradictionKind::Explicit => write!(f, "explicit failure")?,
        }
        match self.cause {
            Cause::Root => write!(f, " at the root"),
            Cause::Decision { depth } => write!(f, " by decision {depth}"),
            Cause::Refutation { depth } => write!(f, " by refutation {depth}"),
            Cause::Propagator(propagator_id) => write!(f, " by {propagator_id}"),
        }
    }
}
