use enum_map::Enum;
use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// A change to the domain of an integer variable.
#[derive(Debug, Enum, EnumSetType, Hash)]
pub enum DomainEvent {
    /// The domain became a single value.
    Assign,
    /// The lower bound increased.
    LowerBound,
    /// The upper bound decreased.
    UpperBound,
    /// At least one value was removed; raised by every change.
    Removal,
}

/// The set of [`DomainEvent`]s a propagator subscribes to for one variable.
#[derive(Debug, Copy, Clone)]
pub struct DomainEvents {
    events: EnumSet<DomainEvent>,
}

impl DomainEvents {
    /// Lower and upper bound changes, but not holes.
    pub const BOUNDS: DomainEvents =
        DomainEvents::new(enum_set!(DomainEvent::LowerBound | DomainEvent::UpperBound));
    /// Every change.
    pub const ANY_INT: DomainEvents = DomainEvents::new(enum_set!(
        DomainEvent::Assign
            | DomainEvent::LowerBound
            | DomainEvent::UpperBound
            | DomainEvent::Removal
    ));
    pub const LOWER_BOUND: DomainEvents = DomainEvents::new(enum_set!(DomainEvent::LowerBound));
    pub const UPPER_BOUND: DomainEvents = DomainEvents::new(enum_set!(DomainEvent::UpperBound));
    pub const ASSIGN: DomainEvents = DomainEvents::new(enum_set!(DomainEvent::Assign));
    /// No events; the variable is only part of the scope of the propagator.
    pub const NONE: DomainEvents = DomainEvents::new(EnumSet::EMPTY);

    pub const fn new(events: EnumSet<DomainEvent>) -> DomainEvents {
        DomainEvents { events }
    }

    pub fn events(&self) -> EnumSet<DomainEvent> {
        self.events
    }
}
