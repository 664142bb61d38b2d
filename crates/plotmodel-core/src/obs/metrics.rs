use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for schema and instance operations.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub models: BTreeMap<String, ModelCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Declaration
    pub schemas_built: u64,
    pub schemas_registered: u64,
    pub schemas_replaced: u64,
    pub schemas_rejected: u64,

    // Instances
    pub instances_created: u64,
    pub field_sets: u64,
    pub validation_failures: u64,

    // Snapshots
    pub snapshots_taken: u64,
    pub snapshots_restored: u64,
    pub references_unresolved: u64,
}

///
/// ModelCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModelCounters {
    pub instances_created: u64,
    pub field_sets: u64,
    pub field_changes: u64,
    pub validation_failures: u64,
}

/// Point-in-time copy of the counter state.
pub type EventReport = EventState;

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow counters immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow counters mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

pub(crate) fn report() -> EventReport {
    with_state(Clone::clone)
}

pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}
