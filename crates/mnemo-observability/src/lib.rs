//! # mnemo-observability
//!
//! Structured tracing with span definitions, log events for every admission,
//! supersession, and dissolution, and degradation event tracking with alerting.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{evaluate_alerts, AlertLevel, AlertPolicy, DegradationAlert, DegradationTracker};
