use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::atom::{normalize, AtomType};

/// Static policy for one atom type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRules {
    pub atom_type: AtomType,
    pub allowed_predicates: BTreeSet<String>,
    /// Decay rate per hour (scaled by confidence in the stability curve). 0 = never decays.
    pub decay_rate: f64,
    /// Default exclusivity for predicates of this type.
    pub exclusive: bool,
    /// Predicates whose exclusivity is the opposite of the type default.
    pub exclusivity_exceptions: BTreeSet<String>,
    /// Contradictory predicates may coexist when context tags differ.
    pub contextual: bool,
    /// Facts that describe a point or span in time.
    pub temporal: bool,
    pub immutable: bool,
    pub confidence_min: f64,
    pub confidence_max: f64,
    pub progressions: Vec<Progression>,
}

impl TypeRules {
    pub(crate) fn new(atom_type: AtomType, decay_rate: f64) -> Self {
        Self {
            atom_type,
            allowed_predicates: BTreeSet::new(),
            decay_rate,
            exclusive: false,
            exclusivity_exceptions: BTreeSet::new(),
            contextual: false,
            temporal: false,
            immutable: false,
            confidence_min: 0.0,
            confidence_max: 1.0,
            progressions: Vec::new(),
        }
    }

    pub(crate) fn predicates(mut self, predicates: &[&str]) -> Self {
        self.allowed_predicates
            .extend(predicates.iter().map(|p| p.to_string()));
        self
    }

    pub(crate) fn exclusive(mut self, except: &[&str]) -> Self {
        self.exclusive = true;
        self.exclusivity_exceptions
            .extend(except.iter().map(|p| p.to_string()));
        self
    }

    pub(crate) fn exclusive_only(mut self, predicates: &[&str]) -> Self {
        self.exclusive = false;
        self.exclusivity_exceptions
            .extend(predicates.iter().map(|p| p.to_string()));
        self
    }

    pub(crate) fn contextual(mut self) -> Self {
        self.contextual = true;
        self
    }

    pub(crate) fn temporal(mut self) -> Self {
        self.temporal = true;
        self
    }

    pub(crate) fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    pub(crate) fn bounds(mut self, min: f64, max: f64) -> Self {
        self.confidence_min = min;
        self.confidence_max = max;
        self
    }

    pub(crate) fn progression(mut self, progression: Progression) -> Self {
        self.progressions.push(progression);
        self
    }

    pub fn allows(&self, predicate: &str) -> bool {
        self.allowed_predicates.contains(predicate)
    }

    pub fn is_exclusive(&self, predicate: &str) -> bool {
        self.exclusive != self.exclusivity_exceptions.contains(predicate)
    }
}

/// What a progression orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ProgressionKind {
    /// Predicates ordered by growing mastery, object unchanged.
    Predicate,
    /// Object values of one predicate.
    Object { predicate: String },
}

/// An ordered sequence of stages. Moving forward is an upgrade, not a contradiction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    pub name: String,
    pub kind: ProgressionKind,
    pub steps: Vec<String>,
}

impl Progression {
    pub(crate) fn of_predicates(name: &str, steps: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: ProgressionKind::Predicate,
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub(crate) fn of_objects(name: &str, predicate: &str, steps: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: ProgressionKind::Object {
                predicate: predicate.to_string(),
            },
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Position of `value` in the sequence. Spaces and underscores are equivalent.
    pub fn position(&self, value: &str) -> Option<usize> {
        let key = step_key(value);
        self.steps.iter().position(|s| step_key(s) == key)
    }

    /// Ordering of `candidate` relative to `existing`, if both are stages of this progression.
    pub fn compare(&self, candidate: &str, existing: &str) -> Option<Ordering> {
        Some(self.position(candidate)?.cmp(&self.position(existing)?))
    }
}

fn step_key(value: &str) -> String {
    normalize(value).replace([' ', '-'], "_").replace('\'', "")
}
