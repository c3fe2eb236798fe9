//! Immutable per-type policy: allowed predicates, decay rates, exclusivity,
//! contextuality, confidence bounds, opposites, and progressions.
//!
//! Built once and shared as `Arc<Ontology>`.

mod opposites;
mod rules;
mod standard;

use std::cmp::Ordering;
use std::collections::BTreeMap;

pub use opposites::OppositeIndex;
pub use rules::{Progression, ProgressionKind, TypeRules};

use crate::atom::{normalize, AtomType, NewAtom};
use crate::errors::ValidationError;

#[derive(Debug, Clone)]
pub struct Ontology {
    rules: BTreeMap<AtomType, TypeRules>,
    opposites: OppositeIndex,
}

impl Ontology {
    /// The built-in table covering all 11 atom types.
    pub fn standard() -> Self {
        Self::from_parts(
            standard::standard_rules(),
            OppositeIndex::from_pairs(standard::OPPOSITE_PAIRS),
        )
    }

    /// Build an ontology from custom rules. Types missing from `rules`
    /// fall back to an empty, never-decaying rule set that rejects every predicate.
    pub fn from_parts(rules: Vec<TypeRules>, opposites: OppositeIndex) -> Self {
        let mut table: BTreeMap<AtomType, TypeRules> =
            rules.into_iter().map(|r| (r.atom_type, r)).collect();
        for t in AtomType::ALL {
            table.entry(t).or_insert_with(|| TypeRules::new(t, 0.0));
        }
        Self {
            rules: table,
            opposites,
        }
    }

    pub fn rules(&self, atom_type: AtomType) -> &TypeRules {
        // from_parts fills every type, so the lookup always succeeds.
        &self.rules[&atom_type]
    }

    pub fn decay_rate(&self, atom_type: AtomType) -> f64 {
        self.rules(atom_type).decay_rate
    }

    pub fn is_contextual(&self, atom_type: AtomType) -> bool {
        self.rules(atom_type).contextual
    }

    pub fn is_exclusive(&self, atom_type: AtomType, predicate: &str) -> bool {
        self.rules(atom_type).is_exclusive(predicate)
    }

    pub fn confidence_bounds(&self, atom_type: AtomType) -> (f64, f64) {
        let r = self.rules(atom_type);
        (r.confidence_min, r.confidence_max)
    }

    pub fn opposites(&self, predicate: &str) -> impl Iterator<Item = &str> {
        self.opposites.opposites(predicate)
    }

    pub fn are_opposites(&self, a: &str, b: &str) -> bool {
        self.opposites.are_opposites(a, b)
    }

    /// First non-legacy type whose allowed set contains `predicate`.
    pub fn type_for_predicate(&self, predicate: &str) -> Option<AtomType> {
        let predicate = normalize(predicate);
        AtomType::ALL
            .iter()
            .copied()
            .filter(|t| !t.is_legacy())
            .find(|t| self.rules(*t).allows(&predicate))
    }

    /// Ordering of the candidate object relative to the existing one when
    /// both are stages of an object progression for `predicate`.
    pub fn object_progression(
        &self,
        atom_type: AtomType,
        predicate: &str,
        candidate: &str,
        existing: &str,
    ) -> Option<Ordering> {
        self.rules(atom_type)
            .progressions
            .iter()
            .filter(|p| matches!(&p.kind, ProgressionKind::Object { predicate: target } if target == predicate))
            .find_map(|p| p.compare(candidate, existing))
    }

    /// Ordering of the candidate predicate relative to the existing one when
    /// both are stages of a predicate progression.
    pub fn predicate_progression(
        &self,
        atom_type: AtomType,
        candidate: &str,
        existing: &str,
    ) -> Option<Ordering> {
        self.rules(atom_type)
            .progressions
            .iter()
            .filter(|p| p.kind == ProgressionKind::Predicate)
            .find_map(|p| p.compare(candidate, existing))
    }

    /// Check predicate membership and confidence bounds for a candidate.
    pub fn validate(&self, candidate: &NewAtom) -> Result<(), ValidationError> {
        for (field, value) in [
            ("subject", &candidate.subject),
            ("predicate", &candidate.predicate),
            ("object", &candidate.object),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField { field });
            }
        }

        let rules = self.rules(candidate.atom_type);
        let predicate = normalize(&candidate.predicate);
        if !rules.allows(&predicate) {
            return Err(ValidationError::PredicateNotAllowed {
                predicate,
                atom_type: candidate.atom_type.to_string(),
            });
        }

        let c = candidate.confidence;
        if c.is_nan() || c < rules.confidence_min || c > rules.confidence_max {
            return Err(ValidationError::ConfidenceOutOfBounds {
                value: c,
                min: rules.confidence_min,
                max: rules.confidence_max,
                atom_type: candidate.atom_type.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Ontology {
    fn default() -> Self {
        Self::standard()
    }
}
