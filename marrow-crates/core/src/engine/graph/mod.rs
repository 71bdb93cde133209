//! Graph variables: a graph bracketed by an envelope of possible nodes and edges and a kernel of
//! mandatory ones.
mod graph_event;
mod graph_variable;
mod trailed_graph;

pub use graph_event::GraphEvent;
pub use graph_event::GraphEvents;
pub(crate) use graph_variable::GraphUpdate;
pub(crate) use graph_variable::GraphVariable;
pub use trailed_graph::GraphView;
pub(crate) use trailed_graph::TrailedGraph;
