use chrono::{Duration, Utc};
use mnemo_core::traits::IDecayEngine;
use mnemo_core::{Atom, AtomType, Graph, NewAtom, Ontology};
use mnemo_decay::DecayEngine;
use proptest::prelude::*;

const TYPED: [(AtomType, &str); 6] = [
    (AtomType::Entity, "named"),
    (AtomType::Affiliation, "works_at"),
    (AtomType::Preference, "likes"),
    (AtomType::Belief, "believes"),
    (AtomType::State, "feeling"),
    (AtomType::Skill, "uses"),
];

fn make_atom(kind: usize, confidence: f64, graph: Graph) -> Atom {
    let (t, p) = TYPED[kind % TYPED.len()];
    Atom::admit(
        NewAtom::new("u1", p, "x", t).with_confidence(confidence),
        &Ontology::standard(),
        graph,
        Utc::now(),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn stability_always_bounded(kind in 0usize..6, conf in 0.0f64..=1.0, hours in 0i64..100_000) {
        let engine = DecayEngine::standard();
        let atom = make_atom(kind, conf, Graph::Unsubstantiated);
        let s = engine.stability(&atom, atom.last_accessed + Duration::hours(hours));
        prop_assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn stability_never_increases_without_access(kind in 0usize..6, conf in 0.01f64..=1.0, a in 0i64..5_000, b in 0i64..5_000) {
        let engine = DecayEngine::standard();
        let atom = make_atom(kind, conf, Graph::Unsubstantiated);
        let (early, late) = (a.min(b), a.max(b));
        let s_early = engine.stability(&atom, atom.last_accessed + Duration::hours(early));
        let s_late = engine.stability(&atom, atom.last_accessed + Duration::hours(late));
        prop_assert!(s_late <= s_early + f64::EPSILON);
    }

    #[test]
    fn reconsolidation_monotone_and_bounded(kind in 0usize..6, conf in 0.0f64..=1.0, boost in 0.1f64..3.0) {
        let engine = DecayEngine::standard();
        let atom = make_atom(kind, conf, Graph::Substantiated);
        let update = engine.reconsolidate(&atom, boost, Utc::now());
        let next = update.confidence.unwrap();
        prop_assert!(next >= atom.confidence.value());
        prop_assert!(next <= 1.0);
        prop_assert_eq!(update.access_count, Some(atom.access_count + 1));
    }

    #[test]
    fn substantiated_atoms_never_dissolve(kind in 0usize..6, conf in 0.0f64..=1.0, hours in 0i64..1_000_000) {
        let engine = DecayEngine::standard();
        let atom = make_atom(kind, conf, Graph::Substantiated);
        prop_assert!(!engine.should_dissolve(&atom, atom.last_accessed + Duration::hours(hours)));
    }
}
