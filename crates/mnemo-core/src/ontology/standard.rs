//! The built-in type table.

use super::rules::{Progression, TypeRules};
use crate::atom::AtomType;

pub(crate) const ENTITY_PREDICATES: &[&str] = &[
    "is",
    "is_named",
    "named",
    "age",
    "born_in",
    "born_on",
    "gender",
    "nationality",
    "speaks",
    "has",
    "located_in",
    "is_vegetarian",
    "is_vegan",
    "allergic_to",
    "education_level",
];

pub(crate) const AFFILIATION_PREDICATES: &[&str] = &[
    "works_at",
    "works_for",
    "employed_by",
    "studies_at",
    "member_of",
    "part_of",
    "works_in",
    "lives_in",
    "career_level",
];

pub(crate) const SOCIAL_PREDICATES: &[&str] = &[
    "knows",
    "friends_with",
    "colleagues_with",
    "reports_to",
    "manages",
    "mentors",
    "works_with",
];

pub(crate) const PREFERENCE_PREDICATES: &[&str] = &[
    "likes",
    "dislikes",
    "loves",
    "hates",
    "prefers",
    "avoids",
    "wants",
    "enjoys",
    "neutral",
    "liked_past",
    "prefers_over",
    "eats",
    "drinks",
];

pub(crate) const BELIEF_PREDICATES: &[&str] = &[
    "thinks",
    "believes",
    "assumes",
    "expects",
    "trusts",
    "distrusts",
    "doubts",
    "supports",
    "opposes",
    "agrees",
    "disagrees",
    "accepts",
    "rejects",
];

pub(crate) const SKILL_PREDICATES: &[&str] = &[
    "can_do",
    "learning",
    "started_learning",
    "proficient_in",
    "expert_at",
    "mastered",
    "uses",
    "does",
    "drives",
    "will_learn",
    "skill_level",
];

pub(crate) const EVENT_PREDICATES: &[&str] = &[
    "completed",
    "started",
    "finished",
    "failed",
    "attempted",
    "decided",
    "happened",
    "studied",
];

pub(crate) const STATE_PREDICATES: &[&str] = &[
    "currently",
    "temporarily",
    "status_is",
    "mood_is",
    "feeling",
    "current_mood",
    "status",
    "condition",
];

pub(crate) const HYPOTHESIS_PREDICATES: &[&str] = &[
    "might_be",
    "might_like",
    "could_be",
    "possibly",
    "suspects",
    "hypothesizes",
];

pub(crate) const INVARIANT_PREDICATES: &[&str] = &[
    "always",
    "never",
    "must",
    "requires",
    "is_defined_as",
];

/// Generic predicates only the legacy relation type accepts.
pub(crate) const RELATION_PREDICATES: &[&str] = &["related_to", "associated_with", "has_property"];

/// Pairs of opposing predicates. Lookups are bidirectional.
pub(crate) const OPPOSITE_PAIRS: &[(&str, &str)] = &[
    ("likes", "dislikes"),
    ("likes", "hates"),
    ("loves", "hates"),
    ("loves", "dislikes"),
    ("enjoys", "dislikes"),
    ("enjoys", "hates"),
    ("prefers", "avoids"),
    ("wants", "avoids"),
    ("trusts", "distrusts"),
    ("believes", "doubts"),
    ("supports", "opposes"),
    ("agrees", "disagrees"),
    ("accepts", "rejects"),
];

pub(crate) fn standard_rules() -> Vec<TypeRules> {
    vec![
        TypeRules::new(AtomType::Entity, 0.01)
            .predicates(ENTITY_PREDICATES)
            .exclusive(&["has", "speaks", "nationality", "allergic_to"])
            .progression(Progression::of_objects(
                "education",
                "education_level",
                &["high_school", "associate", "bachelors", "masters", "phd"],
            )),
        TypeRules::new(AtomType::Affiliation, 0.03)
            .predicates(AFFILIATION_PREDICATES)
            .exclusive(&["member_of", "part_of", "works_in"])
            .progression(Progression::of_objects(
                "career",
                "career_level",
                &["intern", "junior", "mid", "senior", "staff", "principal"],
            )),
        TypeRules::new(AtomType::Social, 0.05).predicates(SOCIAL_PREDICATES),
        TypeRules::new(AtomType::Preference, 0.08)
            .predicates(PREFERENCE_PREDICATES)
            .contextual(),
        TypeRules::new(AtomType::Belief, 0.10)
            .predicates(BELIEF_PREDICATES)
            .contextual(),
        TypeRules::new(AtomType::Skill, 0.02)
            .predicates(SKILL_PREDICATES)
            .exclusive_only(&["skill_level"])
            .progression(Progression::of_predicates(
                "mastery",
                &["learning", "proficient_in", "expert_at", "mastered"],
            ))
            .progression(Progression::of_objects(
                "skill_level",
                "skill_level",
                &["beginner", "intermediate", "advanced", "expert"],
            )),
        TypeRules::new(AtomType::Event, 0.06)
            .predicates(EVENT_PREDICATES)
            .temporal(),
        TypeRules::new(AtomType::State, 0.50)
            .predicates(STATE_PREDICATES)
            .exclusive(&["currently", "temporarily", "feeling"])
            .contextual()
            .temporal(),
        TypeRules::new(AtomType::Hypothesis, 0.15)
            .predicates(HYPOTHESIS_PREDICATES)
            .bounds(0.0, 0.8),
        TypeRules::new(AtomType::Invariant, 0.0)
            .predicates(INVARIANT_PREDICATES)
            .immutable()
            .bounds(0.9, 1.0),
        relation_rules(),
    ]
}

/// The legacy type accepts every known predicate and is never exclusive.
fn relation_rules() -> TypeRules {
    let all: &[&[&str]] = &[
        ENTITY_PREDICATES,
        AFFILIATION_PREDICATES,
        SOCIAL_PREDICATES,
        PREFERENCE_PREDICATES,
        BELIEF_PREDICATES,
        SKILL_PREDICATES,
        EVENT_PREDICATES,
        STATE_PREDICATES,
        HYPOTHESIS_PREDICATES,
        INVARIANT_PREDICATES,
        RELATION_PREDICATES,
    ];
    all.iter()
        .fold(TypeRules::new(AtomType::Relation, 0.05), |rules, preds| {
            rules.predicates(preds)
        })
}
