//! Pairwise detection stages.
//!
//! S0 through S4 are pure rule checks. A pair none of them decides is either
//! unrelated or handed to the oracle stage with the question it should answer.

pub mod context_gate;
pub mod duplicate;
pub mod exclusive;
pub mod opposite;
pub mod refinement;
pub mod semantic;

use mnemo_core::models::{DetectionStage, Relationship};
use mnemo_core::{Atom, Ontology};

/// A stage's decision for one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub relationship: Relationship,
    pub stage: DetectionStage,
    pub detail: String,
    pub candidate_refines: bool,
}

impl Verdict {
    pub(crate) fn new(relationship: Relationship, stage: DetectionStage, detail: String) -> Self {
        Self {
            relationship,
            stage,
            detail,
            candidate_refines: false,
        }
    }
}

/// What the oracle stage should decide for an undecided pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleQuestion {
    /// Same predicate, objects neither equal nor nested.
    SamePredicate { exclusive: bool },
    /// Opposite predicates, objects differ as strings.
    OppositePredicate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    Decided(Verdict),
    NeedsOracle(OracleQuestion),
    /// No shared predicate, no polarity relation, no progression.
    Unrelated,
}

/// Run S0 through S4 on one pair.
pub fn classify(candidate: &Atom, existing: &Atom, ontology: &Ontology) -> PairOutcome {
    if let Some(v) = duplicate::check(candidate, existing) {
        return PairOutcome::Decided(v);
    }

    let same_predicate = candidate.predicate == existing.predicate;
    let opposite = ontology.are_opposites(&candidate.predicate, &existing.predicate);
    let progression = ontology
        .predicate_progression(candidate.atom_type, &candidate.predicate, &existing.predicate)
        .is_some();
    if !same_predicate && !opposite && !progression {
        return PairOutcome::Unrelated;
    }

    // The gate runs before any polarity check.
    if let Some(v) = context_gate::check(candidate, existing, ontology) {
        return PairOutcome::Decided(v);
    }
    if let Some(v) = opposite::check(candidate, existing, ontology) {
        return PairOutcome::Decided(v);
    }
    if let Some(v) = exclusive::check(candidate, existing, ontology) {
        return PairOutcome::Decided(v);
    }
    if let Some(v) = refinement::check(candidate, existing, ontology) {
        return PairOutcome::Decided(v);
    }

    if same_predicate {
        PairOutcome::NeedsOracle(OracleQuestion::SamePredicate {
            exclusive: ontology.is_exclusive(candidate.atom_type, &candidate.predicate),
        })
    } else if opposite {
        PairOutcome::NeedsOracle(OracleQuestion::OppositePredicate)
    } else {
        PairOutcome::Unrelated
    }
}
