use enum_map::Enum;
use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// A change to a graph variable.
#[derive(Debug, Enum, EnumSetType, Hash)]
pub enum GraphEvent {
    /// A node left the envelope.
    RemoveNode,
    /// An edge left the envelope.
    RemoveEdge,
    /// A node entered the kernel.
    EnforceNode,
    /// An edge entered the kernel.
    EnforceEdge,
}

/// A set of [`GraphEvent`]s a propagator subscribes to.
#[derive(Debug, Copy, Clone)]
pub struct GraphEvents {
    events: EnumSet<GraphEvent>,
}

impl GraphEvents {
    pub const ANY: GraphEvents = GraphEvents::new(enum_set!(
        GraphEvent::RemoveNode
            | GraphEvent::RemoveEdge
            | GraphEvent::EnforceNode
            | GraphEvent::EnforceEdge
    ));
    pub const ENVELOPE: GraphEvents =
        GraphEvents::new(enum_set!(GraphEvent::RemoveNode | GraphEvent::RemoveEdge));
    pub const KERNEL: GraphEvents =
        GraphEvents::new(enum_set!(GraphEvent::EnforceNode | GraphEvent::EnforceEdge));

    pub const fn new(events: EnumSet<GraphEvent>) -> GraphEvents {
        GraphEvents { events }
    }

    pub fn events(&self) -> EnumSet<GraphEvent> {
        self.events
    }
}
