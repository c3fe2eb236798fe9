//! # mnemo-decay
//!
//! Forgetting-curve stability per atom type, reconsolidation on retrieval,
//! dissolution eligibility for batch passes, threshold schedules, and
//! aggregate decay reports.

pub mod batch;
pub mod dissolution;
pub mod engine;
pub mod formula;
pub mod report;
pub mod schedule;

pub use batch::{AtomStability, DecayPass};
pub use dissolution::DissolutionDecision;
pub use engine::DecayEngine;
pub use report::{DecayReport, HistogramBucket};
pub use schedule::{DecaySchedule, ThresholdCrossing};
