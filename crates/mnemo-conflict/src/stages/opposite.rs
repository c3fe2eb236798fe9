//! S2: opposite predicates on the same object.

use mnemo_core::models::{DetectionStage, Relationship};
use mnemo_core::{Atom, Ontology};

use super::Verdict;

pub fn check(candidate: &Atom, existing: &Atom, ontology: &Ontology) -> Option<Verdict> {
    if !ontology.are_opposites(&candidate.predicate, &existing.predicate) {
        return None;
    }
    if candidate.normalized_object() != existing.normalized_object() {
        return None;
    }
    Some(Verdict::new(
        Relationship::DirectConflict,
        DetectionStage::OppositePredicate,
        format!(
            "'{}' contradicts '{}' on {}",
            candidate.predicate, existing.predicate, existing.object
        ),
    ))
}
