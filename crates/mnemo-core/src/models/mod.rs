mod audit_entry;
mod decay_summary;
mod degradation_event;
mod detection;
mod mutation;
mod query;
mod relationship;
mod review;

pub use audit_entry::{AuditActor, AuditEntry, AuditOperation};
pub use decay_summary::{AggregateSummary, DecaySummary, UserFailure};
pub use degradation_event::DegradationEvent;
pub use detection::{ConflictMatch, DetectionReport, DetectionStage, InferenceChain};
pub use mutation::{AtomMutation, DeleteReason, MetadataUpdate};
pub use query::TripleQuery;
pub use relationship::Relationship;
pub use review::{AdmissionDecision, ReviewReason, ReviewRequest};
