use time::OffsetDateTime;

/// Source of the evaluation instant used by every balance and status computation.
pub trait Clock: 'static + Sync + Send {
    fn now(&self) -> OffsetDateTime;
}

pub trait DependOnClock: 'static + Sync + Send {
    type Clock: Clock;
    fn clock(&self) -> &Self::Clock;
}
