//! S1: contextual facts held in different contexts do not collide.
//! "likes coffee (work)" and "dislikes coffee (home)" can both be true.

use mnemo_core::models::{DetectionStage, Relationship};
use mnemo_core::{Atom, Ontology};

use super::Verdict;

pub fn check(candidate: &Atom, existing: &Atom, ontology: &Ontology) -> Option<Verdict> {
    if !ontology.is_contextual(candidate.atom_type) || !candidate.contexts_disjoint(existing) {
        return None;
    }
    Some(Verdict::new(
        Relationship::NoConflict,
        DetectionStage::ContextGate,
        format!(
            "contexts {:?} and {:?} do not overlap",
            candidate.contexts, existing.contexts
        ),
    ))
}
