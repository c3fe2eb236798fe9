use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{normalize, triple_hash, AtomType, Confidence, Graph, Provenance};
use crate::errors::ValidationError;
use crate::ontology::Ontology;

/// A stored subject-predicate-object fact with lifecycle metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// UUID v4.
    pub id: String,
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub atom_type: AtomType,
    pub confidence: Confidence,
    pub graph: Graph,
    /// Context tags ("work", "relaxing"). Ordered for deterministic comparison.
    pub contexts: BTreeSet<String>,
    pub first_observed: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
    pub access_count: u64,
    /// User whose conversation produced the fact.
    pub source_user: String,
    /// Who holds the belief. Differs from `source_user` for reported facts.
    pub belief_holder: String,
    /// 0 = stated directly, each hop of reporting adds one.
    pub epistemic_distance: u32,
    pub provenance: Provenance,
    /// Set exactly once, when the atom moves to Historical.
    pub superseded_by: Option<String>,
    /// The more general atom this one specializes.
    pub refines: Option<String>,
    /// blake3 of the normalized triple.
    pub triple_hash: String,
}

impl Atom {
    /// Validate `candidate` against the ontology and build a new atom placed in `graph`.
    /// No atom exists unless validation passes.
    pub fn admit(
        candidate: NewAtom,
        ontology: &Ontology,
        graph: Graph,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        ontology.validate(&candidate)?;
        let observed = candidate.observed_at.unwrap_or(now);
        let belief_holder = candidate
            .belief_holder
            .unwrap_or_else(|| candidate.source_user.clone());
        let hash = triple_hash(&candidate.subject, &candidate.predicate, &candidate.object);
        Ok(Self {
            id: candidate
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            subject: candidate.subject.trim().to_string(),
            predicate: normalize(&candidate.predicate),
            object: candidate.object.trim().to_string(),
            atom_type: candidate.atom_type,
            confidence: Confidence::new(candidate.confidence),
            graph,
            contexts: candidate.contexts.iter().map(|c| normalize(c)).collect(),
            first_observed: observed,
            last_accessed: observed,
            access_count: 0,
            source_user: candidate.source_user,
            belief_holder,
            epistemic_distance: candidate.epistemic_distance,
            provenance: candidate.provenance,
            superseded_by: None,
            refines: None,
            triple_hash: hash,
        })
    }

    pub fn is_live(&self) -> bool {
        self.graph.is_live()
    }

    pub fn normalized_subject(&self) -> String {
        normalize(&self.subject)
    }

    pub fn normalized_object(&self) -> String {
        normalize(&self.object)
    }

    /// Same subject, predicate, and object after normalization.
    pub fn same_triple(&self, other: &Atom) -> bool {
        self.triple_hash == other.triple_hash
    }

    /// Confidence discounted by epistemic distance.
    pub fn effective_confidence(&self, discount: f64) -> Confidence {
        self.confidence.discounted(self.epistemic_distance, discount)
    }

    /// Context sets differ only when both are non-empty and share nothing.
    pub fn contexts_disjoint(&self, other: &Atom) -> bool {
        !self.contexts.is_empty()
            && !other.contexts.is_empty()
            && self.contexts.is_disjoint(&other.contexts)
    }

    /// Hours between `last_accessed` and `now`. Future timestamps count as zero.
    pub fn hours_since_access(&self, now: DateTime<Utc>) -> f64 {
        let secs = (now - self.last_accessed).num_milliseconds() as f64 / 1000.0;
        (secs / 3600.0).max(0.0)
    }

    /// "subject predicate object" for logs and chain descriptions.
    pub fn triple_label(&self) -> String {
        format!("({}, {}, {})", self.subject, self.predicate, self.object)
    }
}

/// A typed candidate fact as produced by an extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAtom {
    /// Preassigned id, mostly for fixtures. A fresh UUID is used otherwise.
    #[serde(default)]
    pub id: Option<String>,
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub atom_type: AtomType,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub contexts: BTreeSet<String>,
    #[serde(default)]
    pub source_user: String,
    #[serde(default)]
    pub belief_holder: Option<String>,
    #[serde(default)]
    pub epistemic_distance: u32,
    #[serde(default)]
    pub provenance: Provenance,
    /// When the fact was observed. Admission time is used otherwise.
    #[serde(default)]
    pub observed_at: Option<DateTime<Utc>>,
}

fn default_confidence() -> f64 {
    crate::constants::PROVISIONAL_CONFIDENCE
}

impl NewAtom {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
        atom_type: AtomType,
    ) -> Self {
        let subject = subject.into();
        Self {
            id: None,
            source_user: subject.clone(),
            subject,
            predicate: predicate.into(),
            object: object.into(),
            atom_type,
            confidence: default_confidence(),
            contexts: BTreeSet::new(),
            belief_holder: None,
            epistemic_distance: 0,
            provenance: Provenance::UserStated,
            observed_at: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_contexts<I, S>(mut self, contexts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contexts = contexts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_source(mut self, source_user: impl Into<String>) -> Self {
        self.source_user = source_user.into();
        self
    }

    /// Mark the fact as reported secondhand by `holder`, `distance` hops away.
    pub fn reported_by(mut self, holder: impl Into<String>, distance: u32) -> Self {
        self.belief_holder = Some(holder.into());
        self.epistemic_distance = distance;
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn observed_at(mut self, at: DateTime<Utc>) -> Self {
        self.observed_at = Some(at);
        self
    }
}
