use serde::{Deserialize, Serialize};

/// Where a fact came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Stated directly by the user.
    #[default]
    UserStated,
    /// Derived by the system from other facts.
    Inferred,
    /// Stated by the user as a correction of an earlier fact.
    Corrected,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserStated => "user_stated",
            Self::Inferred => "inferred",
            Self::Corrected => "corrected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user_stated" => Some(Self::UserStated),
            "inferred" => Some(Self::Inferred),
            "corrected" => Some(Self::Corrected),
            _ => None,
        }
    }
}
