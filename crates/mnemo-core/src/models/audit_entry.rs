use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An entry in the append-only audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub atom_id: String,
    pub operation: AuditOperation,
    /// JSON details about the operation (reason, winner, stability).
    pub details: serde_json::Value,
    pub actor: AuditActor,
    pub timestamp: DateTime<Utc>,
}

/// Operations tracked in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOperation {
    Create,
    Update,
    Promote,
    Supersede,
    Dissolve,
    Discard,
    Delete,
}

impl AuditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Promote => "promote",
            Self::Supersede => "supersede",
            Self::Dissolve => "dissolve",
            Self::Discard => "discard",
            Self::Delete => "delete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        [
            Self::Create,
            Self::Update,
            Self::Promote,
            Self::Supersede,
            Self::Dissolve,
            Self::Discard,
            Self::Delete,
        ]
        .into_iter()
        .find(|op| op.as_str() == s)
    }

    /// Operations that remove an atom from the live graphs.
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            Self::Supersede | Self::Dissolve | Self::Discard | Self::Delete
        )
    }
}

/// Who performed the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditActor {
    System,
    User,
    Reconciliation,
    Decay,
    Admission,
}

impl AuditActor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Reconciliation => "reconciliation",
            Self::Decay => "decay",
            Self::Admission => "admission",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        [
            Self::System,
            Self::User,
            Self::Reconciliation,
            Self::Decay,
            Self::Admission,
        ]
        .into_iter()
        .find(|a| a.as_str() == s)
    }
}
