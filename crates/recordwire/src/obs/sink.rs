//! Diagnostic sink boundary.
//!
//! All recoverable marshaling anomalies flow through DiagnosticEvent and
//! DiagnosticSink; nothing in the engine writes to a logger directly. A
//! scoped thread-local override lets tests capture events.

use serde_json::Value;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn DiagnosticSink>>> = const { RefCell::new(None) };
}

///
/// DiagnosticEvent
///
/// Recoverable anomaly, carrying the owning record, field, and offending
/// value. Reporting one never aborts the operation that raised it.
///

#[derive(Clone, Debug)]
pub enum DiagnosticEvent {
    /// A fragment slot held a raw value with no usable serialization path;
    /// the field was written as `null`.
    SerializeAnomaly {
        record: &'static str,
        field: &'static str,
        value: Value,
    },
    /// An enum value failed membership under lenient strictness; the field
    /// was set to `null`.
    EnumRejected {
        record: &'static str,
        field: &'static str,
        value: Value,
    },
}

///
/// DiagnosticSink
///

pub trait DiagnosticSink {
    fn record(&self, event: &DiagnosticEvent);
}

///
/// TracingSink
///
/// Process default: emits events as WARN-level tracing output.
///

struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::SerializeAnomaly {
                record,
                field,
                value,
            } => {
                tracing::warn!(
                    record = *record,
                    field = *field,
                    value = %value,
                    "fragment value does not support serialization; wrote null"
                );
            }
            DiagnosticEvent::EnumRejected {
                record,
                field,
                value,
            } => {
                tracing::warn!(
                    record = *record,
                    field = *field,
                    value = %value,
                    "enum value rejected during lenient deserialization; set to null"
                );
            }
        }
    }
}

/// Report an event to the active sink for this thread.
pub fn report(event: &DiagnosticEvent) {
    let overridden = SINK_OVERRIDE.with(|slot| {
        if let Some(sink) = slot.borrow().as_ref() {
            sink.record(event);
            true
        } else {
            false
        }
    });
    if !overridden {
        TracingSink.record(event);
    }
}

///
/// SinkGuard
///
/// Restores the previously-installed sink on drop.
///

pub struct SinkGuard {
    previous: Option<Rc<dyn DiagnosticSink>>,
}

impl Drop for SinkGuard {
    fn drop(&mut self) {
        SINK_OVERRIDE.with(|slot| {
            *slot.borrow_mut() = self.previous.take();
        });
    }
}

/// Install a sink for the current thread until the guard drops.
#[must_use]
pub fn set_scoped_sink(sink: Rc<dyn DiagnosticSink>) -> SinkGuard {
    let previous = SINK_OVERRIDE.with(|slot| slot.borrow_mut().replace(sink));
    SinkGuard { previous }
}
