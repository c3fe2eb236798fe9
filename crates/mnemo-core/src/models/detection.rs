use serde::{Deserialize, Serialize};

use super::{DegradationEvent, Relationship};
use crate::atom::Atom;

/// The detection stage that decided a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStage {
    /// S0: identical normalized triple.
    Duplicate,
    /// S1: contextual type with disjoint context tags.
    ContextGate,
    /// S2: opposite predicate on the same object.
    OppositePredicate,
    /// S3: exclusive predicate holding a different object.
    ExclusivePredicate,
    /// S4: one object specializes the other.
    Refinement,
    /// S5: similarity oracle.
    Semantic,
    /// S6: world-knowledge rules.
    Transitive,
    /// No stage was decisive.
    Unrelated,
}

/// Atoms that together fire a world-knowledge rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceChain {
    pub rule: String,
    /// Atom ids in rule-pattern order. Includes the candidate.
    pub atom_ids: Vec<String>,
    pub explanation: String,
}

/// One classified (existing atom, relationship) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictMatch {
    pub atom: Atom,
    pub relationship: Relationship,
    pub stage: DetectionStage,
    /// Oracle similarity, when S5 produced the verdict.
    pub similarity: Option<f64>,
    pub detail: String,
    pub chain: Option<InferenceChain>,
    /// For refinements: the candidate is the more specific atom.
    #[serde(default)]
    pub candidate_refines: bool,
}

impl ConflictMatch {
    /// Matched atom belongs to a different subject (reached through a rule chain).
    pub fn is_cross_subject(&self, subject: &str) -> bool {
        crate::atom::normalize(&self.atom.subject) != crate::atom::normalize(subject)
    }
}

/// Classification of a candidate against a snapshot, ranked most severe first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionReport {
    pub matches: Vec<ConflictMatch>,
    /// Present when S5/S6 were skipped.
    pub degradations: Vec<DegradationEvent>,
    pub skipped_stages: Vec<DetectionStage>,
}

impl DetectionReport {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    /// Most severe match, if any.
    pub fn top(&self) -> Option<&ConflictMatch> {
        self.matches.first()
    }

    pub fn with_relationship(&self, rel: Relationship) -> impl Iterator<Item = &ConflictMatch> {
        self.matches.iter().filter(move |m| m.relationship == rel)
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &ConflictMatch> {
        self.matches.iter().filter(|m| m.relationship.is_conflict())
    }

    pub fn duplicates(&self) -> impl Iterator<Item = &ConflictMatch> {
        self.with_relationship(Relationship::Duplicate)
    }

    pub fn refinements(&self) -> impl Iterator<Item = &ConflictMatch> {
        self.with_relationship(Relationship::Refinement)
    }

    /// Relationship assigned to atom `id`, if it was classified.
    pub fn relationship_of(&self, id: &str) -> Option<Relationship> {
        self.matches
            .iter()
            .find(|m| m.atom.id == id)
            .map(|m| m.relationship)
    }
}
