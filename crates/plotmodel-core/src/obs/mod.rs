//! Observability: runtime counters and the event sink boundary.
//!
//! Schema and instance code never touch counters directly; everything flows
//! through `SchemaEvent` and `EventSink`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, ModelCounters};
pub use sink::{EventSink, SchemaEvent, event_report, event_reset_all, with_event_sink};
