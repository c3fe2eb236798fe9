//! S3: an exclusive predicate holds one object at a time.

use std::cmp::Ordering;

use mnemo_core::models::{DetectionStage, Relationship};
use mnemo_core::{Atom, Ontology};

use super::Verdict;
use crate::specialization;

pub fn check(candidate: &Atom, existing: &Atom, ontology: &Ontology) -> Option<Verdict> {
    if candidate.predicate != existing.predicate
        || !ontology.is_exclusive(candidate.atom_type, &candidate.predicate)
    {
        return None;
    }
    if candidate.normalized_object() == existing.normalized_object() {
        return None;
    }
    // Nested objects are left for the refinement stage.
    if specialization::either_specializes(&candidate.object, &existing.object) {
        return None;
    }

    let order = ontology.object_progression(
        candidate.atom_type,
        &candidate.predicate,
        &candidate.object,
        &existing.object,
    );
    if order == Some(Ordering::Greater) {
        return Some(Verdict {
            relationship: Relationship::Refinement,
            stage: DetectionStage::ExclusivePredicate,
            detail: format!(
                "'{}' follows '{}' in the {} progression",
                candidate.object, existing.object, candidate.predicate
            ),
            candidate_refines: true,
        });
    }

    Some(Verdict::new(
        Relationship::DirectConflict,
        DetectionStage::ExclusivePredicate,
        format!(
            "'{}' is exclusive: '{}' replaces '{}'",
            candidate.predicate, candidate.object, existing.object
        ),
    ))
}
