use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The lifecycle graph an atom lives in. Every atom is in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Graph {
    /// Provisional facts. Decay and may be dissolved.
    Unsubstantiated,
    /// Verified facts. Never deleted, only superseded.
    Substantiated,
    /// Superseded facts. Immutable.
    Historical,
}

impl Graph {
    pub const ALL: [Graph; 3] = [Self::Unsubstantiated, Self::Substantiated, Self::Historical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unsubstantiated => "unsubstantiated",
            Self::Substantiated => "substantiated",
            Self::Historical => "historical",
        }
    }

    /// Live atoms take part in conflict detection and retrieval.
    pub fn is_live(&self) -> bool {
        !matches!(self, Self::Historical)
    }

    /// Promotion (Unsubstantiated → Substantiated) and supersession
    /// (Substantiated → Historical) are the only legal moves.
    pub fn can_transition_to(&self, to: Graph) -> bool {
        matches!(
            (self, to),
            (Self::Unsubstantiated, Self::Substantiated) | (Self::Substantiated, Self::Historical)
        )
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Graph {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| format!("unknown graph: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_promotion_and_supersession_are_legal() {
        use Graph::*;
        assert!(Unsubstantiated.can_transition_to(Substantiated));
        assert!(Substantiated.can_transition_to(Historical));
        assert!(!Unsubstantiated.can_transition_to(Historical));
        assert!(!Historical.can_transition_to(Substantiated));
        assert!(!Historical.can_transition_to(Unsubstantiated));
        assert!(!Substantiated.can_transition_to(Unsubstantiated));
        for g in Graph::ALL {
            assert!(!g.can_transition_to(g));
        }
    }
}
