use serde::{Deserialize, Serialize};
use std::fmt;

/// How a candidate relates to one existing atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Duplicate,
    Refinement,
    DirectConflict,
    SemanticConflict,
    TransitiveConflict,
    NoConflict,
}

impl Relationship {
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DirectConflict | Self::SemanticConflict | Self::TransitiveConflict
        )
    }

    /// Lower ranks sort first in a detection report.
    pub fn rank(&self) -> u8 {
        match self {
            Self::DirectConflict => 0,
            Self::SemanticConflict => 1,
            Self::TransitiveConflict => 2,
            Self::Duplicate => 3,
            Self::Refinement => 4,
            Self::NoConflict => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::Refinement => "refinement",
            Self::DirectConflict => "direct_conflict",
            Self::SemanticConflict => "semantic_conflict",
            Self::TransitiveConflict => "transitive_conflict",
            Self::NoConflict => "no_conflict",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
