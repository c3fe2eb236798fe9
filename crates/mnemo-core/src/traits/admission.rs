use crate::models::{AdmissionDecision, ReviewRequest};

/// External authority consulted for candidates flagged `needs_review`.
pub trait IAdmissionAuthority: Send + Sync {
    fn review(&self, request: &ReviewRequest) -> AdmissionDecision;
}

/// Accepts every proposed plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl IAdmissionAuthority for AcceptAll {
    fn review(&self, _request: &ReviewRequest) -> AdmissionDecision {
        AdmissionDecision::Accept
    }
}
