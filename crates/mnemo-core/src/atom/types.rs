use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The 11 semantic categories an atom can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtomType {
    /// Identity facts: name, age, diet, allergies.
    Entity,
    /// Organizational ties: employer, school, residence.
    Affiliation,
    /// Interpersonal relationships.
    Social,
    Preference,
    Belief,
    Skill,
    Event,
    /// Transient conditions such as mood or availability.
    State,
    /// Speculative facts, confidence capped below certainty.
    Hypothesis,
    /// Facts that never decay.
    Invariant,
    /// Legacy catch-all kept for stored data from before the typed ontology.
    Relation,
}

impl AtomType {
    pub const COUNT: usize = 11;

    pub const ALL: [AtomType; 11] = [
        Self::Entity,
        Self::Affiliation,
        Self::Social,
        Self::Preference,
        Self::Belief,
        Self::Skill,
        Self::Event,
        Self::State,
        Self::Hypothesis,
        Self::Invariant,
        Self::Relation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Affiliation => "affiliation",
            Self::Social => "social",
            Self::Preference => "preference",
            Self::Belief => "belief",
            Self::Skill => "skill",
            Self::Event => "event",
            Self::State => "state",
            Self::Hypothesis => "hypothesis",
            Self::Invariant => "invariant",
            Self::Relation => "relation",
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Relation)
    }
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AtomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        // "identity" is the older name for entity facts.
        if needle == "identity" {
            return Ok(Self::Entity);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| format!("unknown atom type: {s}"))
    }
}
