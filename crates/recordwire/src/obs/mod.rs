//! Observability boundary.
//!
//! Marshaling logic never logs directly; recoverable anomalies flow through
//! [`sink::DiagnosticSink`], with a `tracing`-backed process default and a
//! scoped override for tests.

pub mod sink;

pub use sink::{DiagnosticEvent, DiagnosticSink, report, set_scoped_sink};
