//! Contract tests run against both atom stores.

use chrono::{Duration, Utc};
use mnemo_core::errors::{MnemoError, StorageError};
use mnemo_core::models::{
    AtomMutation, AuditActor, AuditOperation, DeleteReason, MetadataUpdate, TripleQuery,
};
use mnemo_core::traits::IAtomStore;
use mnemo_core::{Atom, AtomType, Graph, NewAtom, Ontology};
use mnemo_storage::{InMemoryAtomStore, SqliteAtomStore};

fn make_atom(subject: &str, predicate: &str, object: &str, t: AtomType, graph: Graph) -> Atom {
    Atom::admit(
        NewAtom::new(subject, predicate, object, t).with_confidence(0.7),
        &Ontology::standard(),
        graph,
        Utc::now(),
    )
    .unwrap()
}

fn stores() -> Vec<(&'static str, Box<dyn IAtomStore>)> {
    vec![
        ("memory", Box::new(InMemoryAtomStore::new())),
        ("sqlite", Box::new(SqliteAtomStore::open_in_memory().unwrap())),
    ]
}

#[test]
fn insert_then_find_by_triple_and_subject() {
    for (name, store) in stores() {
        let a = make_atom("u1", "likes", "Python", AtomType::Preference, Graph::Unsubstantiated);
        store.insert(&a).unwrap();

        let found = store
            .find_by_triple(&TripleQuery::subject("U1").predicate("likes").object(" python"))
            .unwrap();
        assert_eq!(found.len(), 1, "{name}: triple lookup is case-insensitive");
        assert_eq!(found[0], a, "{name}: round trip preserves every field");

        let by_graph = store
            .find_by_subject("u1", Some(Graph::Substantiated))
            .unwrap();
        assert!(by_graph.is_empty(), "{name}: graph filter applies");
        assert_eq!(store.subjects().unwrap(), vec!["u1".to_string()], "{name}");
    }
}

#[test]
fn live_duplicate_triple_is_refused() {
    for (name, store) in stores() {
        let a = make_atom("u1", "likes", "jazz", AtomType::Preference, Graph::Unsubstantiated);
        let b = make_atom("u1", "likes", "Jazz", AtomType::Preference, Graph::Substantiated);
        store.insert(&a).unwrap();
        let err = store.insert(&b).unwrap_err();
        assert!(
            matches!(err, MnemoError::StorageError(StorageError::DuplicateLiveTriple { .. })),
            "{name}: got {err}"
        );
    }
}

#[test]
fn supersession_moves_to_historical_with_pointer() {
    for (name, store) in stores() {
        let old = make_atom("u1", "works_at", "Google", AtomType::Affiliation, Graph::Substantiated);
        let new = make_atom("u1", "works_at", "Anthropic", AtomType::Affiliation, Graph::Substantiated);
        store
            .apply(
                &[AtomMutation::Insert(old.clone())],
                AuditActor::Reconciliation,
            )
            .unwrap();
        store
            .apply(
                &[
                    AtomMutation::Insert(new.clone()),
                    AtomMutation::MoveGraph {
                        id: old.id.clone(),
                        to: Graph::Historical,
                        superseded_by: Some(new.id.clone()),
                    },
                ],
                AuditActor::Reconciliation,
            )
            .unwrap();

        let archived = store.get(&old.id).unwrap().unwrap();
        assert_eq!(archived.graph, Graph::Historical, "{name}");
        assert_eq!(archived.superseded_by.as_deref(), Some(new.id.as_str()), "{name}");

        let counts = store.count_by_graph(Some("u1")).unwrap();
        assert_eq!(counts[&Graph::Historical], 1, "{name}");
        assert_eq!(counts[&Graph::Substantiated], 1, "{name}");
        assert_eq!(counts[&Graph::Unsubstantiated], 0, "{name}");

        let audit = store.audit_entries(Some(&old.id)).unwrap();
        assert_eq!(audit.last().unwrap().operation, AuditOperation::Supersede, "{name}");
        assert_eq!(audit.last().unwrap().actor, AuditActor::Reconciliation, "{name}");
    }
}

#[test]
fn historical_atoms_reject_every_mutation() {
    for (name, store) in stores() {
        let old = make_atom("u1", "works_at", "Google", AtomType::Affiliation, Graph::Substantiated);
        store.insert(&old).unwrap();
        store
            .move_graph(&old.id, Graph::Historical, Some("winner"))
            .unwrap();

        let update = MetadataUpdate {
            confidence: Some(0.99),
            ..MetadataUpdate::default()
        };
        for result in [
            store.update_metadata(&old.id, &update),
            store.move_graph(&old.id, Graph::Substantiated, None),
            store.delete(
                &old.id,
                DeleteReason::Manual {
                    note: "cleanup".into(),
                },
            ),
        ] {
            assert!(
                matches!(
                    result,
                    Err(MnemoError::StorageError(StorageError::HistoricalImmutable { .. }))
                ),
                "{name}: historical atom must be immutable"
            );
        }
        assert_eq!(store.get(&old.id).unwrap().unwrap().confidence.value(), 0.7, "{name}");
    }
}

#[test]
fn archival_requires_pointer_and_legal_transition() {
    for (name, store) in stores() {
        let a = make_atom("u1", "likes", "tea", AtomType::Preference, Graph::Unsubstantiated);
        let b = make_atom("u1", "likes", "coffee", AtomType::Preference, Graph::Substantiated);
        store.insert(&a).unwrap();
        store.insert(&b).unwrap();

        assert!(
            matches!(
                store.move_graph(&a.id, Graph::Historical, Some("x")),
                Err(MnemoError::StorageError(StorageError::IllegalTransition { .. }))
            ),
            "{name}: unsubstantiated atoms are never archived"
        );
        assert!(
            matches!(
                store.move_graph(&b.id, Graph::Historical, None),
                Err(MnemoError::StorageError(StorageError::MissingSupersessionPointer { .. }))
            ),
            "{name}: archival needs a pointer"
        );
        store.move_graph(&a.id, Graph::Substantiated, None).unwrap();
        assert_eq!(store.get(&a.id).unwrap().unwrap().graph, Graph::Substantiated, "{name}");
    }
}

#[test]
fn substantiated_atoms_are_never_deleted() {
    for (name, store) in stores() {
        let a = make_atom("u1", "likes", "tea", AtomType::Preference, Graph::Substantiated);
        store.insert(&a).unwrap();
        let err = store
            .delete(&a.id, DeleteReason::Dissolved { stability: 0.01 })
            .unwrap_err();
        assert!(
            matches!(err, MnemoError::StorageError(StorageError::SubstantiatedDeletion { .. })),
            "{name}: got {err}"
        );
        assert!(store.get(&a.id).unwrap().is_some(), "{name}");
    }
}

#[test]
fn failed_batch_rolls_back_completely() {
    for (name, store) in stores() {
        let keep = make_atom("u1", "likes", "tea", AtomType::Preference, Graph::Unsubstantiated);
        store.insert(&keep).unwrap();
        let audit_before = store.audit_entries(None).unwrap().len();

        let fresh = make_atom("u1", "likes", "coffee", AtomType::Preference, Graph::Unsubstantiated);
        let result = store.apply(
            &[
                AtomMutation::Insert(fresh.clone()),
                AtomMutation::Delete {
                    id: keep.id.clone(),
                    reason: DeleteReason::Dissolved { stability: 0.05 },
                },
                AtomMutation::UpdateMetadata {
                    id: "missing".into(),
                    update: MetadataUpdate::default(),
                },
            ],
            AuditActor::Decay,
        );
        assert!(
            matches!(result, Err(MnemoError::AtomNotFound { .. })),
            "{name}: batch fails on the missing atom"
        );
        assert!(store.get(&fresh.id).unwrap().is_none(), "{name}: insert undone");
        assert!(store.get(&keep.id).unwrap().is_some(), "{name}: delete undone");
        assert_eq!(
            store.audit_entries(None).unwrap().len(),
            audit_before,
            "{name}: no audit entries from a failed batch"
        );
    }
}

#[test]
fn dissolution_is_audited_with_reason() {
    for (name, store) in stores() {
        let a = make_atom("u1", "mood_is", "tired", AtomType::State, Graph::Unsubstantiated);
        store.insert(&a).unwrap();
        store
            .apply(
                &[AtomMutation::Delete {
                    id: a.id.clone(),
                    reason: DeleteReason::Dissolved { stability: 0.02 },
                }],
                AuditActor::Decay,
            )
            .unwrap();
        assert!(store.get(&a.id).unwrap().is_none(), "{name}");

        let audit = store.audit_entries(Some(&a.id)).unwrap();
        let last = audit.last().unwrap();
        assert_eq!(last.operation, AuditOperation::Dissolve, "{name}");
        assert_eq!(last.details["reason"]["kind"], "dissolved", "{name}");
        assert_eq!(last.details["reason"]["stability"], 0.02, "{name}");
    }
}

#[test]
fn metadata_update_touches_only_given_fields() {
    for (name, store) in stores() {
        let a = make_atom("u1", "likes", "tea", AtomType::Preference, Graph::Unsubstantiated);
        store.insert(&a).unwrap();
        let later = a.last_accessed + Duration::hours(3);
        store
            .update_metadata(
                &a.id,
                &MetadataUpdate {
                    last_accessed: Some(later),
                    access_count: Some(4),
                    ..MetadataUpdate::default()
                },
            )
            .unwrap();
        let got = store.get(&a.id).unwrap().unwrap();
        assert_eq!(got.confidence, a.confidence, "{name}");
        assert_eq!(got.access_count, 4, "{name}");
        assert_eq!(got.last_accessed, later, "{name}");
    }
}

#[test]
fn losing_candidate_may_enter_historical_directly() {
    for (name, store) in stores() {
        let mut loser = make_atom("u1", "works_at", "Initech", AtomType::Affiliation, Graph::Historical);
        assert!(store.insert(&loser).is_err(), "{name}: pointer required");
        loser.superseded_by = Some("winner-id".into());
        store.insert(&loser).unwrap();
        let audit = store.audit_entries(Some(&loser.id)).unwrap();
        assert_eq!(audit[0].operation, AuditOperation::Supersede, "{name}");
    }
}
