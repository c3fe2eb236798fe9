//! # mnemo-reconciliation
//!
//! Decides what happens to a candidate once detection has classified it:
//! duplicates are rejected, refinements coexist, and conflicts are settled
//! by stability with a deterministic tie-break. The result is a plan of
//! store mutations that commit together or not at all.

pub mod contest;
pub mod plan;
pub mod policy;

pub use contest::{Contender, ContestOutcome};
pub use plan::{Decision, ReconciliationPlan};
pub use policy::ReconciliationPolicy;
