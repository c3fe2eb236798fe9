use std::sync::Arc;

use chrono::Utc;
use mnemo_conflict::{ConflictDetector, LexicalSimilarity, SubjectSnapshot};
use mnemo_core::config::DetectionConfig;
use mnemo_core::models::{DetectionReport, Relationship};
use mnemo_core::{Atom, AtomType, Graph, NewAtom, Ontology};
use proptest::prelude::*;

const PREDICATES: [(AtomType, &str); 8] = [
    (AtomType::Preference, "likes"),
    (AtomType::Preference, "dislikes"),
    (AtomType::Preference, "hates"),
    (AtomType::Preference, "eats"),
    (AtomType::Affiliation, "works_at"),
    (AtomType::Affiliation, "lives_in"),
    (AtomType::Entity, "is"),
    (AtomType::Skill, "skill_level"),
];

const OBJECTS: [&str; 8] = [
    "python",
    "Python 3",
    "steak",
    "vegetarian",
    "Acme",
    "Berlin",
    "advanced",
    "beginner",
];

fn make_atom(pred: usize, obj: usize, conf: f64) -> Atom {
    let (t, p) = PREDICATES[pred % PREDICATES.len()];
    Atom::admit(
        NewAtom::new("u1", p, OBJECTS[obj % OBJECTS.len()], t).with_confidence(conf),
        &Ontology::standard(),
        Graph::Unsubstantiated,
        Utc::now(),
    )
    .unwrap()
}

fn detect(candidate: &Atom, snapshot: &SubjectSnapshot) -> DetectionReport {
    let detector = ConflictDetector::new(Arc::new(Ontology::standard()), DetectionConfig::default())
        .with_oracle(Arc::new(LexicalSimilarity));
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(detector.detect(candidate, snapshot))
}

fn summary(report: &DetectionReport) -> Vec<(String, Relationship)> {
    report
        .matches
        .iter()
        .map(|m| (m.atom.id.clone(), m.relationship))
        .collect()
}

fn arb_snapshot() -> impl Strategy<Value = Vec<(usize, usize, f64)>> {
    prop::collection::vec((0usize..8, 0usize..8, 0.1f64..0.95), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn matches_are_sorted_by_severity(rows in arb_snapshot(), pred in 0usize..8, obj in 0usize..8) {
        let atoms: Vec<Atom> = rows.iter().map(|&(p, o, c)| make_atom(p, o, c)).collect();
        let candidate = make_atom(pred, obj, 0.5);
        let report = detect(&candidate, &SubjectSnapshot::from_atoms("u1", atoms, Vec::new()));
        for pair in report.matches.windows(2) {
            prop_assert!(pair[0].relationship.rank() <= pair[1].relationship.rank());
        }
    }

    #[test]
    fn detection_is_repeatable(rows in arb_snapshot(), pred in 0usize..8, obj in 0usize..8) {
        let atoms: Vec<Atom> = rows.iter().map(|&(p, o, c)| make_atom(p, o, c)).collect();
        let candidate = make_atom(pred, obj, 0.5);
        let snapshot = SubjectSnapshot::from_atoms("u1", atoms, Vec::new());
        prop_assert_eq!(summary(&detect(&candidate, &snapshot)), summary(&detect(&candidate, &snapshot)));
    }

    #[test]
    fn each_atom_is_classified_at_most_once(rows in arb_snapshot(), pred in 0usize..8, obj in 0usize..8) {
        let atoms: Vec<Atom> = rows.iter().map(|&(p, o, c)| make_atom(p, o, c)).collect();
        let candidate = make_atom(pred, obj, 0.5);
        let report = detect(&candidate, &SubjectSnapshot::from_atoms("u1", atoms, Vec::new()));
        let mut ids: Vec<&str> = report.matches.iter().map(|m| m.atom.id.as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), before);
    }

    #[test]
    fn same_triple_is_always_a_duplicate(pred in 0usize..8, obj in 0usize..8, conf in 0.1f64..0.95) {
        let existing = make_atom(pred, obj, conf);
        let candidate = make_atom(pred, obj, 0.5);
        let report = detect(&candidate, &SubjectSnapshot::from_atoms("u1", vec![existing], Vec::new()));
        prop_assert_eq!(report.top().map(|m| m.relationship), Some(Relationship::Duplicate));
    }

    #[test]
    fn lexical_score_is_symmetric_and_bounded(a in "[a-z ]{0,24}", b in "[a-z ]{0,24}") {
        let ab = LexicalSimilarity::score(&a, &b);
        let ba = LexicalSimilarity::score(&b, &a);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert!((ab - ba).abs() < 1e-12);
    }
}
