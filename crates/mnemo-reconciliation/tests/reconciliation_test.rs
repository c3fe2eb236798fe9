use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mnemo_core::config::ReconciliationConfig;
use mnemo_core::models::{
    AdmissionDecision, AtomMutation, AuditActor, ConflictMatch, DeleteReason, DetectionReport,
    DetectionStage, Relationship, ReviewReason, ReviewRequest,
};
use mnemo_core::traits::{IAdmissionAuthority, IAtomStore};
use mnemo_core::{Atom, AtomType, Graph, NewAtom, Ontology};
use mnemo_decay::DecayEngine;
use mnemo_reconciliation::{Decision, ReconciliationPolicy};
use mnemo_storage::InMemoryAtomStore;

// ── Helpers ───────────────────────────────────────────────────────────────

fn policy() -> ReconciliationPolicy {
    ReconciliationPolicy::new(
        Arc::new(Ontology::standard()),
        Arc::new(DecayEngine::standard()),
        ReconciliationConfig::default(),
    )
}

fn make_atom(
    id: &str,
    predicate: &str,
    object: &str,
    confidence: f64,
    graph: Graph,
    observed: DateTime<Utc>,
) -> Atom {
    let mut atom = Atom::admit(
        NewAtom::new("u1", predicate, object, AtomType::Preference)
            .with_id(id)
            .with_confidence(confidence)
            .observed_at(observed),
        &Ontology::standard(),
        Graph::Unsubstantiated,
        observed,
    )
    .unwrap();
    atom.graph = graph;
    atom
}

fn matched(atom: &Atom, relationship: Relationship) -> ConflictMatch {
    ConflictMatch {
        atom: atom.clone(),
        relationship,
        stage: DetectionStage::OppositePredicate,
        similarity: None,
        detail: String::new(),
        chain: None,
        candidate_refines: false,
    }
}

fn report(matches: Vec<ConflictMatch>) -> DetectionReport {
    DetectionReport {
        matches,
        ..DetectionReport::default()
    }
}

struct Fixed(AdmissionDecision);

impl IAdmissionAuthority for Fixed {
    fn review(&self, _request: &ReviewRequest) -> AdmissionDecision {
        self.0.clone()
    }
}

struct NeverAsked;

impl IAdmissionAuthority for NeverAsked {
    fn review(&self, request: &ReviewRequest) -> AdmissionDecision {
        panic!("unexpected review for {:?}", request.reasons);
    }
}

// ── Admission ─────────────────────────────────────────────────────────────

#[test]
fn unmatched_candidate_is_admitted_by_confidence() {
    let now = Utc::now();
    let provisional = make_atom("c1", "likes", "tea", 0.6, Graph::Unsubstantiated, now);
    let plan = policy().plan(&provisional, &report(vec![]), now);
    assert_eq!(
        plan.decision,
        Decision::Admitted {
            atom_id: "c1".into(),
            graph: Graph::Unsubstantiated
        }
    );
    assert_eq!(plan.mutations, vec![AtomMutation::Insert(plan.candidate.clone())]);
    assert!(!plan.needs_review);

    let confident = make_atom("c2", "likes", "tea", 0.95, Graph::Unsubstantiated, now);
    let plan = policy().plan(&confident, &report(vec![]), now);
    assert_eq!(plan.candidate.graph, Graph::Substantiated);
}

#[test]
fn secondhand_reports_are_discounted_before_auto_substantiation() {
    let now = Utc::now();
    let mut candidate = make_atom("c1", "likes", "tea", 0.95, Graph::Unsubstantiated, now);
    candidate.epistemic_distance = 1;
    let plan = policy().plan(&candidate, &report(vec![]), now);
    assert_eq!(plan.candidate.graph, Graph::Unsubstantiated);
    assert!(plan
        .reasons
        .iter()
        .any(|r| matches!(r, ReviewReason::WeakEvidence { .. })));
}

#[test]
fn duplicate_only_touches_access_metadata() {
    let now = Utc::now();
    let existing = make_atom(
        "e1",
        "likes",
        "Python",
        0.7,
        Graph::Substantiated,
        now - Duration::hours(10),
    );
    let candidate = make_atom("c1", "likes", "python", 0.9, Graph::Unsubstantiated, now);
    let plan = policy().plan(
        &candidate,
        &report(vec![matched(&existing, Relationship::Duplicate)]),
        now,
    );

    assert_eq!(
        plan.decision,
        Decision::Rejected {
            duplicate_of: "e1".into()
        }
    );
    match plan.mutations.as_slice() {
        [AtomMutation::UpdateMetadata { id, update }] => {
            assert_eq!(id, "e1");
            assert_eq!(update.confidence, None);
            assert_eq!(update.last_accessed, Some(now));
            assert_eq!(update.access_count, Some(1));
        }
        other => panic!("unexpected mutations {other:?}"),
    }
}

#[test]
fn refinement_points_at_the_general_atom() {
    let now = Utc::now();
    let general = make_atom("e1", "likes", "Python", 0.7, Graph::Unsubstantiated, now);
    let candidate = make_atom("c1", "likes", "Python 3.12", 0.7, Graph::Unsubstantiated, now);
    let mut refinement = matched(&general, Relationship::Refinement);
    refinement.candidate_refines = true;

    let plan = policy().plan(&candidate, &report(vec![refinement.clone()]), now);
    assert!(plan.decision.is_admitted());
    assert_eq!(plan.candidate.refines.as_deref(), Some("e1"));
    assert_eq!(plan.mutations.len(), 1);

    refinement.candidate_refines = false;
    let plan = policy().plan(&candidate, &report(vec![refinement]), now);
    assert_eq!(plan.candidate.refines, None);
}

// ── Conflicts ─────────────────────────────────────────────────────────────

#[test]
fn stale_substantiated_loser_moves_to_historical() {
    let now = Utc::now();
    let store = InMemoryAtomStore::new();
    let existing = make_atom(
        "e1",
        "likes",
        "Python",
        0.8,
        Graph::Substantiated,
        now - Duration::hours(500),
    );
    store.insert(&existing).unwrap();
    let candidate = make_atom("c1", "dislikes", "Python", 0.8, Graph::Unsubstantiated, now);

    let plan = policy().plan(
        &candidate,
        &report(vec![matched(&existing, Relationship::DirectConflict)]),
        now,
    );
    assert!(plan.decision.is_admitted());
    assert_eq!(plan.losers, vec!["e1".to_string()]);
    assert_eq!(plan.ties, 0);
    store.apply(&plan.mutations, AuditActor::Reconciliation).unwrap();

    let loser = store.get("e1").unwrap().unwrap();
    assert_eq!(loser.graph, Graph::Historical);
    assert_eq!(loser.superseded_by.as_deref(), Some("c1"));
    assert!(store.get("c1").unwrap().unwrap().is_live());
}

#[test]
fn unsubstantiated_loser_is_deleted() {
    let now = Utc::now();
    let existing = make_atom(
        "e1",
        "likes",
        "Google",
        0.5,
        Graph::Unsubstantiated,
        now - Duration::hours(200),
    );
    let candidate = make_atom("c1", "likes", "Anthropic", 0.5, Graph::Unsubstantiated, now);
    let plan = policy().plan(
        &candidate,
        &report(vec![matched(&existing, Relationship::SemanticConflict)]),
        now,
    );
    assert!(plan.mutations.contains(&AtomMutation::Delete {
        id: "e1".into(),
        reason: DeleteReason::LostConflict {
            winner: "c1".into()
        },
    }));
}

#[test]
fn losing_substantiated_candidate_is_recorded_in_historical() {
    let now = Utc::now();
    let store = InMemoryAtomStore::new();
    let existing = make_atom("e1", "likes", "Python", 0.8, Graph::Substantiated, now);
    store.insert(&existing).unwrap();
    let candidate = make_atom(
        "c1",
        "dislikes",
        "Python",
        0.95,
        Graph::Unsubstantiated,
        now - Duration::hours(100),
    );

    let plan = policy().plan(
        &candidate,
        &report(vec![matched(&existing, Relationship::DirectConflict)]),
        now,
    );
    assert_eq!(
        plan.decision,
        Decision::Lost {
            winner: "e1".into(),
            recorded: true
        }
    );
    store.apply(&plan.mutations, AuditActor::Reconciliation).unwrap();
    let recorded = store.get("c1").unwrap().unwrap();
    assert_eq!(recorded.graph, Graph::Historical);
    assert_eq!(recorded.superseded_by.as_deref(), Some("e1"));
    assert_eq!(store.get("e1").unwrap().unwrap().graph, Graph::Substantiated);
}

#[test]
fn losing_provisional_candidate_is_never_stored() {
    let now = Utc::now();
    let existing = make_atom("e1", "likes", "Python", 0.8, Graph::Substantiated, now);
    let candidate = make_atom(
        "c1",
        "dislikes",
        "Python",
        0.6,
        Graph::Unsubstantiated,
        now - Duration::hours(100),
    );
    let plan = policy().plan(
        &candidate,
        &report(vec![matched(&existing, Relationship::DirectConflict)]),
        now,
    );
    assert!(plan.is_noop());
    assert!(matches!(plan.decision, Decision::Lost { recorded: false, .. }));
}

#[test]
fn candidate_must_beat_every_conflict() {
    let now = Utc::now();
    let stale = make_atom(
        "e1",
        "likes",
        "Python",
        0.5,
        Graph::Unsubstantiated,
        now - Duration::hours(300),
    );
    let fresh = make_atom("e2", "loves", "Python", 0.8, Graph::Substantiated, now);
    let candidate = make_atom(
        "c1",
        "hates",
        "Python",
        0.6,
        Graph::Unsubstantiated,
        now - Duration::hours(2),
    );
    let plan = policy().plan(
        &candidate,
        &report(vec![
            matched(&stale, Relationship::DirectConflict),
            matched(&fresh, Relationship::DirectConflict),
        ]),
        now,
    );
    assert!(matches!(&plan.decision, Decision::Lost { winner, .. } if winner == "e2"));
    assert!(plan.is_noop(), "beaten atoms stay put when the candidate loses");
}

#[test]
fn stability_ties_break_deterministically_and_ask_for_review() {
    let now = Utc::now();
    let existing = make_atom("a", "likes", "Python", 0.7, Graph::Unsubstantiated, now);
    let candidate = make_atom("b", "dislikes", "Python", 0.7, Graph::Unsubstantiated, now);
    let conflicts = report(vec![matched(&existing, Relationship::DirectConflict)]);

    let first = policy().plan(&candidate, &conflicts, now);
    let second = policy().plan(&candidate, &conflicts, now);
    assert_eq!(first.decision, second.decision);
    assert!(matches!(&first.decision, Decision::Lost { winner, .. } if winner == "a"));
    assert_eq!(first.ties, 1);
    assert!(first.needs_review);
    assert!(first.reasons.contains(&ReviewReason::StabilityTie {
        against: "a".into()
    }));
}

#[test]
fn substantiated_wins_a_stability_tie() {
    let now = Utc::now();
    let existing = make_atom("a", "likes", "Python", 0.5, Graph::Unsubstantiated, now);
    let candidate = make_atom("b", "dislikes", "Python", 0.95, Graph::Unsubstantiated, now);
    let plan = policy().plan(
        &candidate,
        &report(vec![matched(&existing, Relationship::DirectConflict)]),
        now,
    );
    assert!(plan.decision.is_admitted());
    assert_eq!(plan.ties, 1);
}

#[test]
fn secondhand_supersession_needs_review() {
    let now = Utc::now();
    let existing = make_atom(
        "e1",
        "likes",
        "Python",
        0.9,
        Graph::Substantiated,
        now - Duration::hours(400),
    );
    let mut candidate = make_atom("c1", "dislikes", "Python", 0.9, Graph::Unsubstantiated, now);
    candidate.belief_holder = "u2".into();
    candidate.epistemic_distance = 1;
    let plan = policy().plan(
        &candidate,
        &report(vec![matched(&existing, Relationship::DirectConflict)]),
        now,
    );
    assert!(plan.needs_review);
    assert!(plan.reasons.contains(&ReviewReason::SecondhandSupersession {
        target: "e1".into()
    }));
}

#[test]
fn cross_subject_atoms_are_reported_not_mutated() {
    let now = Utc::now();
    let mut foreign = make_atom(
        "x1",
        "likes",
        "Python",
        0.5,
        Graph::Unsubstantiated,
        now - Duration::hours(300),
    );
    foreign.subject = "boss".into();
    let candidate = make_atom("c1", "dislikes", "Python", 0.7, Graph::Unsubstantiated, now);
    let plan = policy().plan(
        &candidate,
        &report(vec![matched(&foreign, Relationship::TransitiveConflict)]),
        now,
    );
    assert!(plan.decision.is_admitted());
    assert!(plan.mutations.iter().all(|m| m.atom_id() != "x1"));
    assert!(plan.reasons.contains(&ReviewReason::CrossSubject {
        atom_id: "x1".into(),
        subject: "boss".into()
    }));
}

// ── Admission authority ───────────────────────────────────────────────────

#[test]
fn unflagged_plans_skip_the_authority() {
    let now = Utc::now();
    let candidate = make_atom("c1", "likes", "tea", 0.6, Graph::Unsubstantiated, now);
    let plan = policy().resolve(&candidate, &report(vec![]), &NeverAsked, now);
    assert!(plan.decision.is_admitted());
    assert_eq!(plan.review, None);
}

#[test]
fn authority_accept_keeps_the_plan() {
    let now = Utc::now();
    let candidate = make_atom("c1", "likes", "tea", 0.3, Graph::Unsubstantiated, now);
    let authority = Fixed(AdmissionDecision::Accept);
    let plan = policy().resolve(&candidate, &report(vec![]), &authority, now);
    assert!(plan.decision.is_admitted());
    assert_eq!(plan.mutations.len(), 1);
    assert_eq!(plan.review, Some(AdmissionDecision::Accept));
}

#[test]
fn authority_reject_drops_every_mutation() {
    let now = Utc::now();
    let existing = make_atom(
        "e1",
        "likes",
        "tea",
        0.8,
        Graph::Substantiated,
        now - Duration::hours(500),
    );
    let candidate = make_atom("c1", "dislikes", "tea", 0.3, Graph::Unsubstantiated, now);
    let authority = Fixed(AdmissionDecision::Reject {
        reason: "unreliable source".into(),
    });
    let plan = policy().resolve(
        &candidate,
        &report(vec![matched(&existing, Relationship::DirectConflict)]),
        &authority,
        now,
    );
    assert_eq!(
        plan.decision,
        Decision::Refused {
            reason: "unreliable source".into()
        }
    );
    assert!(plan.is_noop());
}

#[test]
fn authority_adjust_replans_with_new_graph_and_clamped_confidence() {
    let now = Utc::now();
    let candidate = make_atom("c1", "likes", "tea", 0.3, Graph::Unsubstantiated, now);
    let authority = Fixed(AdmissionDecision::Adjust {
        graph: Some(Graph::Substantiated),
        confidence: Some(1.7),
    });
    let plan = policy().resolve(&candidate, &report(vec![]), &authority, now);
    assert_eq!(plan.candidate.graph, Graph::Substantiated);
    assert_eq!(plan.candidate.confidence.value(), 1.0);
    assert!(!plan.needs_review);
    assert!(matches!(plan.review, Some(AdmissionDecision::Adjust { .. })));

    let historical = Fixed(AdmissionDecision::Adjust {
        graph: Some(Graph::Historical),
        confidence: None,
    });
    let plan = policy().resolve(&candidate, &report(vec![]), &historical, now);
    assert_eq!(plan.candidate.graph, Graph::Unsubstantiated);
}
