use serde::{Deserialize, Serialize};

use mnemo_core::models::{AdmissionDecision, AtomMutation, ReviewReason, ReviewRequest};
use mnemo_core::{Atom, Graph};

/// Where the candidate ended up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Decision {
    /// Stored in a live graph.
    Admitted { atom_id: String, graph: Graph },
    /// Already known. Only the existing atom's access metadata changes.
    Rejected { duplicate_of: String },
    /// Beaten by an existing atom. `recorded` when the candidate was kept
    /// in Historical pointing at the winner.
    Lost { winner: String, recorded: bool },
    /// Refused by the admission authority.
    Refused { reason: String },
}

impl Decision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted { .. })
    }
}

/// Mutations for one candidate plus what the authority needs to know.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationPlan {
    /// The candidate as it would be stored: graph and `refines` filled in.
    pub candidate: Atom,
    pub decision: Decision,
    /// Applied as one batch.
    pub mutations: Vec<AtomMutation>,
    pub needs_review: bool,
    pub reasons: Vec<ReviewReason>,
    /// Contests settled by the tie-break.
    pub ties: usize,
    /// Atoms superseded or discarded by this plan.
    pub losers: Vec<String>,
    /// The authority's answer, once consulted.
    pub review: Option<AdmissionDecision>,
}

impl ReconciliationPlan {
    pub(crate) fn new(candidate: Atom, decision: Decision) -> Self {
        Self {
            candidate,
            decision,
            mutations: Vec::new(),
            needs_review: false,
            reasons: Vec::new(),
            ties: 0,
            losers: Vec::new(),
            review: None,
        }
    }

    pub(crate) fn flag(&mut self, reason: ReviewReason) {
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
        self.needs_review = true;
    }

    pub fn is_noop(&self) -> bool {
        self.mutations.is_empty()
    }

    /// The request handed to the admission authority.
    pub fn review_request(&self) -> ReviewRequest {
        ReviewRequest {
            candidate: self.candidate.clone(),
            proposed_graph: self.candidate.graph,
            reasons: self.reasons.clone(),
            losers: self.losers.clone(),
        }
    }
}
