//! # mnemo-engine
//!
//! The memory engine ties the store, detection, reconciliation, and decay
//! together. Every mutation of a subject runs under that subject's lock;
//! batch decay passes are started by the triggers in [`scheduling`].

pub mod engine;
pub mod locks;
pub mod outcome;
pub mod scheduling;

pub use engine::MemoryEngine;
pub use locks::SubjectLocks;
pub use outcome::AdmissionOutcome;
pub use scheduling::{CancelFlag, Debouncer, IdleHeartbeat, IntervalSweep};
