use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::atom::{Atom, Graph};

/// Fields a metadata update may touch. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataUpdate {
    pub confidence: Option<f64>,
    pub last_accessed: Option<DateTime<Utc>>,
    pub access_count: Option<u64>,
}

impl MetadataUpdate {
    pub fn is_empty(&self) -> bool {
        self.confidence.is_none() && self.last_accessed.is_none() && self.access_count.is_none()
    }

    /// Apply the update in place.
    pub fn apply_to(&self, atom: &mut Atom) {
        if let Some(c) = self.confidence {
            atom.confidence = c.into();
        }
        if let Some(t) = self.last_accessed {
            atom.last_accessed = t;
        }
        if let Some(n) = self.access_count {
            atom.access_count = n;
        }
    }
}

/// Why an atom was physically removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DeleteReason {
    /// Unsubstantiated atom decayed below the dissolution threshold.
    Dissolved { stability: f64 },
    /// Unsubstantiated atom lost a conflict to `winner`.
    LostConflict { winner: String },
    /// Explicit removal by an operator.
    Manual { note: String },
}

/// One step of an atomic mutation batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum AtomMutation {
    Insert(Atom),
    MoveGraph {
        id: String,
        to: Graph,
        superseded_by: Option<String>,
    },
    UpdateMetadata {
        id: String,
        update: MetadataUpdate,
    },
    Delete {
        id: String,
        reason: DeleteReason,
    },
}

impl AtomMutation {
    /// Id of the atom the mutation targets.
    pub fn atom_id(&self) -> &str {
        match self {
            Self::Insert(atom) => &atom.id,
            Self::MoveGraph { id, .. } | Self::UpdateMetadata { id, .. } | Self::Delete { id, .. } => id,
        }
    }
}
