use chrono::{DateTime, Utc};

use crate::atom::Atom;
use crate::models::MetadataUpdate;

/// Stability and reconsolidation calculations.
pub trait IDecayEngine: Send + Sync {
    /// Current retrieval strength in [0.0, 1.0].
    fn stability(&self, atom: &Atom, now: DateTime<Utc>) -> f64;

    /// Metadata update for a retrieval with the given boost. Pure.
    fn reconsolidate(&self, atom: &Atom, boost: f64, now: DateTime<Utc>) -> MetadataUpdate;

    /// Whether a batch pass should dissolve the atom.
    fn should_dissolve(&self, atom: &Atom, now: DateTime<Utc>) -> bool;
}
