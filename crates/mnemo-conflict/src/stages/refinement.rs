//! S4: one fact narrows another.

use std::cmp::Ordering;

use mnemo_core::models::{DetectionStage, Relationship};
use mnemo_core::{Atom, Ontology};

use super::Verdict;
use crate::specialization::is_specialization;

pub fn check(candidate: &Atom, existing: &Atom, ontology: &Ontology) -> Option<Verdict> {
    if candidate.predicate == existing.predicate {
        if is_specialization(&candidate.object, &existing.object) {
            return Some(Verdict {
                relationship: Relationship::Refinement,
                stage: DetectionStage::Refinement,
                detail: format!("'{}' narrows '{}'", candidate.object, existing.object),
                candidate_refines: true,
            });
        }
        if is_specialization(&existing.object, &candidate.object) {
            return Some(Verdict::new(
                Relationship::Refinement,
                DetectionStage::Refinement,
                format!("'{}' is already known more precisely as '{}'", candidate.object, existing.object),
            ));
        }
        return None;
    }

    if candidate.normalized_object() != existing.normalized_object() {
        return None;
    }
    let order = ontology.predicate_progression(
        candidate.atom_type,
        &candidate.predicate,
        &existing.predicate,
    );
    (order == Some(Ordering::Greater)).then(|| Verdict {
        relationship: Relationship::Refinement,
        stage: DetectionStage::Refinement,
        detail: format!(
            "'{}' advances '{}' on {}",
            candidate.predicate, existing.predicate, candidate.object
        ),
        candidate_refines: true,
    })
}
