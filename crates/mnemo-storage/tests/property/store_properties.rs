//! Property tests: random mutation sequences keep graph membership consistent.

use chrono::Utc;
use mnemo_core::models::{AtomMutation, AuditActor, DeleteReason};
use mnemo_core::traits::IAtomStore;
use mnemo_core::{Atom, AtomType, Graph, NewAtom, Ontology};
use mnemo_storage::InMemoryAtomStore;
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Insert(usize, bool),
    Promote(usize),
    Archive(usize, usize),
    Dissolve(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..6, any::<bool>()).prop_map(|(o, s)| Op::Insert(o, s)),
        (0usize..12).prop_map(Op::Promote),
        (0usize..12, 0usize..12).prop_map(|(a, b)| Op::Archive(a, b)),
        (0usize..12).prop_map(Op::Dissolve),
    ]
}

const OBJECTS: [&str; 6] = ["tea", "coffee", "jazz", "rock", "chess", "go"];

proptest! {
    #[test]
    fn every_atom_in_exactly_one_graph_and_no_live_twins(ops in prop::collection::vec(op(), 1..40)) {
        let ontology = Ontology::standard();
        let store = InMemoryAtomStore::new();
        let mut ids: Vec<String> = Vec::new();

        for op in ops {
            let mutation = match op {
                Op::Insert(o, substantiated) => {
                    let graph = if substantiated { Graph::Substantiated } else { Graph::Unsubstantiated };
                    let atom = Atom::admit(
                        NewAtom::new("u1", "likes", OBJECTS[o], AtomType::Preference),
                        &ontology,
                        graph,
                        Utc::now(),
                    ).unwrap();
                    ids.push(atom.id.clone());
                    AtomMutation::Insert(atom)
                }
                Op::Promote(i) if !ids.is_empty() => AtomMutation::MoveGraph {
                    id: ids[i % ids.len()].clone(),
                    to: Graph::Substantiated,
                    superseded_by: None,
                },
                Op::Archive(i, w) if !ids.is_empty() => AtomMutation::MoveGraph {
                    id: ids[i % ids.len()].clone(),
                    to: Graph::Historical,
                    superseded_by: Some(ids[w % ids.len()].clone()),
                },
                Op::Dissolve(i) if !ids.is_empty() => AtomMutation::Delete {
                    id: ids[i % ids.len()].clone(),
                    reason: DeleteReason::Dissolved { stability: 0.01 },
                },
                _ => continue,
            };
            // Illegal steps are refused; the invariants must hold either way.
            let _ = store.apply(&[mutation], AuditActor::System);

            let all = store.find_by_subject("u1", None).unwrap();
            let counts = store.count_by_graph(None).unwrap();
            prop_assert_eq!(counts.values().sum::<usize>(), all.len());

            let mut live = HashSet::new();
            for atom in all.iter().filter(|a| a.is_live()) {
                prop_assert!(live.insert(atom.triple_hash.clone()), "two live copies of {}", atom.triple_label());
            }
            for atom in all.iter().filter(|a| a.graph == Graph::Historical) {
                prop_assert!(atom.superseded_by.is_some());
            }
        }
    }
}
