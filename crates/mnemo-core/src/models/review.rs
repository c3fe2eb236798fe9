use serde::{Deserialize, Serialize};

use crate::atom::{Atom, Graph};

/// Why a candidate's placement needs an external decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ReviewReason {
    /// Stabilities within the tie epsilon; the tie-break decided.
    StabilityTie { against: String },
    /// Effective confidence below the review floor.
    WeakEvidence { effective_confidence: f64 },
    /// A secondhand fact would supersede a substantiated one.
    SecondhandSupersession { target: String },
    /// A rule implicated an atom owned by another subject. It is left untouched.
    CrossSubject { atom_id: String, subject: String },
}

/// What the admission authority sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub candidate: Atom,
    pub proposed_graph: Graph,
    pub reasons: Vec<ReviewReason>,
    /// Ids of atoms the plan would supersede or discard.
    pub losers: Vec<String>,
}

/// The admission authority's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision")]
pub enum AdmissionDecision {
    /// Apply the plan as proposed.
    Accept,
    /// Drop the candidate and every mutation.
    Reject { reason: String },
    /// Re-plan with a different graph and/or confidence.
    Adjust {
        graph: Option<Graph>,
        confidence: Option<f64>,
    },
}
