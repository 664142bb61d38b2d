//! Event sink boundary.
//!
//! This module is the only bridge between schema/instance logic and the
//! process-local counter state.
use crate::obs::metrics;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = RefCell::new(None);
}

///
/// SchemaEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SchemaEvent<'a> {
    SchemaBuilt {
        model: &'a str,
        fields: usize,
    },
    SchemaRegistered {
        model: &'a str,
        replaced: bool,
    },
    SchemaRejected {
        model: &'a str,
    },
    InstanceCreated {
        model: &'a str,
    },
    FieldSet {
        model: &'a str,
        field: &'a str,
        changed: bool,
    },
    ValidationFailed {
        model: &'a str,
        field: &'a str,
    },
    SnapshotTaken {
        model: &'a str,
        fields: usize,
    },
    SnapshotRestored {
        model: &'a str,
    },
    ReferenceUnresolved {
        model: &'a str,
    },
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: SchemaEvent<'_>);
}

///
/// GlobalEventSink
/// Default sink; folds events into the thread-local counter state.
///

pub(crate) struct GlobalEventSink;

impl EventSink for GlobalEventSink {
    fn record(&self, event: SchemaEvent<'_>) {
        metrics::with_state_mut(|m| match event {
            SchemaEvent::SchemaBuilt { .. } => {
                m.ops.schemas_built = m.ops.schemas_built.saturating_add(1);
            }
            SchemaEvent::SchemaRegistered { replaced, .. } => {
                m.ops.schemas_registered = m.ops.schemas_registered.saturating_add(1);
                if replaced {
                    m.ops.schemas_replaced = m.ops.schemas_replaced.saturating_add(1);
                }
            }
            SchemaEvent::SchemaRejected { .. } => {
                m.ops.schemas_rejected = m.ops.schemas_rejected.saturating_add(1);
            }
            SchemaEvent::InstanceCreated { model } => {
                m.ops.instances_created = m.ops.instances_created.saturating_add(1);
                let entry = m.models.entry(model.to_string()).or_default();
                entry.instances_created = entry.instances_created.saturating_add(1);
            }
            SchemaEvent::FieldSet { model, changed, .. } => {
                m.ops.field_sets = m.ops.field_sets.saturating_add(1);
                let entry = m.models.entry(model.to_string()).or_default();
                entry.field_sets = entry.field_sets.saturating_add(1);
                if changed {
                    entry.field_changes = entry.field_changes.saturating_add(1);
                }
            }
            SchemaEvent::ValidationFailed { model, .. } => {
                m.ops.validation_failures = m.ops.validation_failures.saturating_add(1);
                let entry = m.models.entry(model.to_string()).or_default();
                entry.validation_failures = entry.validation_failures.saturating_add(1);
            }
            SchemaEvent::SnapshotTaken { .. } => {
                m.ops.snapshots_taken = m.ops.snapshots_taken.saturating_add(1);
            }
            SchemaEvent::SnapshotRestored { .. } => {
                m.ops.snapshots_restored = m.ops.snapshots_restored.saturating_add(1);
            }
            SchemaEvent::ReferenceUnresolved { .. } => {
                m.ops.references_unresolved = m.ops.references_unresolved.saturating_add(1);
            }
        });
    }
}

pub(crate) fn record(event: SchemaEvent<'_>) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match override_sink {
        Some(sink) => sink.record(event),
        None => GlobalEventSink.record(event),
    }
}

/// Snapshot the current thread's counters.
#[must_use]
pub fn event_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset the current thread's counters.
pub fn event_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary sink override on this thread.
///
/// The previous sink is restored on every exit path, including unwinding.
pub fn with_event_sink<T>(sink: Rc<dyn EventSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn EventSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let previous = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = previous;
            });
        }
    }

    let previous = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(previous);

    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CaptureSink {
        events: RefCell<Vec<String>>,
    }

    impl EventSink for CaptureSink {
        fn record(&self, event: SchemaEvent<'_>) {
            self.events.borrow_mut().push(format!("{event:?}"));
        }
    }

    #[test]
    fn override_captures_and_bypasses_global_state() {
        event_reset_all();
        let capture = Rc::new(CaptureSink::default());

        with_event_sink(capture.clone(), || {
            record(SchemaEvent::InstanceCreated { model: "Grid" });
        });

        assert_eq!(capture.events.borrow().len(), 1);
        assert_eq!(event_report().ops.instances_created, 0);
    }

    #[test]
    fn override_is_restored_after_scope() {
        event_reset_all();
        let capture = Rc::new(CaptureSink::default());

        with_event_sink(capture.clone(), || {});
        record(SchemaEvent::InstanceCreated { model: "Grid" });

        assert!(capture.events.borrow().is_empty());
        let report = event_report();
        assert_eq!(report.ops.instances_created, 1);
        assert_eq!(report.models["Grid"].instances_created, 1);
    }

    #[test]
    fn field_changes_are_counted_separately_from_sets() {
        event_reset_all();

        record(SchemaEvent::FieldSet {
            model: "Grid",
            field: "dimension",
            changed: true,
        });
        record(SchemaEvent::FieldSet {
            model: "Grid",
            field: "dimension",
            changed: false,
        });

        let counters = &event_report().models["Grid"];
        assert_eq!(counters.field_sets, 2);
        assert_eq!(counters.field_changes, 1);
    }
}
