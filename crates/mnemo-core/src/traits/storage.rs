use std::collections::BTreeMap;
use std::sync::Arc;

use crate::atom::{Atom, Graph};
use crate::errors::MnemoResult;
use crate::models::{AtomMutation, AuditActor, AuditEntry, DeleteReason, MetadataUpdate, TripleQuery};

/// Keyed atom storage partitioned into the three lifecycle graphs.
///
/// Every mutation goes through `apply`, which commits the whole batch and its
/// audit entries or nothing. Historical atoms reject every mutation.
pub trait IAtomStore: Send + Sync {
    // --- Reads ---
    fn get(&self, id: &str) -> MnemoResult<Option<Atom>>;
    fn find_by_triple(&self, query: &TripleQuery) -> MnemoResult<Vec<Atom>>;
    /// All atoms for `subject`, optionally restricted to one graph.
    fn find_by_subject(&self, subject: &str, graph: Option<Graph>) -> MnemoResult<Vec<Atom>>;
    /// Distinct subjects with at least one atom.
    fn subjects(&self) -> MnemoResult<Vec<String>>;
    fn count_by_graph(&self, subject: Option<&str>) -> MnemoResult<BTreeMap<Graph, usize>>;
    fn audit_entries(&self, atom_id: Option<&str>) -> MnemoResult<Vec<AuditEntry>>;

    // --- Writes ---
    fn apply(&self, mutations: &[AtomMutation], actor: AuditActor) -> MnemoResult<()>;

    fn insert(&self, atom: &Atom) -> MnemoResult<()> {
        self.apply(&[AtomMutation::Insert(atom.clone())], AuditActor::System)
    }

    fn move_graph(&self, id: &str, to: Graph, superseded_by: Option<&str>) -> MnemoResult<()> {
        self.apply(
            &[AtomMutation::MoveGraph {
                id: id.to_string(),
                to,
                superseded_by: superseded_by.map(str::to_string),
            }],
            AuditActor::System,
        )
    }

    fn update_metadata(&self, id: &str, update: &MetadataUpdate) -> MnemoResult<()> {
        self.apply(
            &[AtomMutation::UpdateMetadata {
                id: id.to_string(),
                update: update.clone(),
            }],
            AuditActor::System,
        )
    }

    fn delete(&self, id: &str, reason: DeleteReason) -> MnemoResult<()> {
        self.apply(
            &[AtomMutation::Delete {
                id: id.to_string(),
                reason,
            }],
            AuditActor::System,
        )
    }

    /// Unsubstantiated and Substantiated atoms for `subject`.
    fn find_live_by_subject(&self, subject: &str) -> MnemoResult<Vec<Atom>> {
        Ok(self
            .find_by_subject(subject, None)?
            .into_iter()
            .filter(Atom::is_live)
            .collect())
    }
}

impl<T: IAtomStore + ?Sized> IAtomStore for Arc<T> {
    fn get(&self, id: &str) -> MnemoResult<Option<Atom>> {
        (**self).get(id)
    }
    fn find_by_triple(&self, query: &TripleQuery) -> MnemoResult<Vec<Atom>> {
        (**self).find_by_triple(query)
    }
    fn find_by_subject(&self, subject: &str, graph: Option<Graph>) -> MnemoResult<Vec<Atom>> {
        (**self).find_by_subject(subject, graph)
    }
    fn subjects(&self) -> MnemoResult<Vec<String>> {
        (**self).subjects()
    }
    fn count_by_graph(&self, subject: Option<&str>) -> MnemoResult<BTreeMap<Graph, usize>> {
        (**self).count_by_graph(subject)
    }
    fn audit_entries(&self, atom_id: Option<&str>) -> MnemoResult<Vec<AuditEntry>> {
        (**self).audit_entries(atom_id)
    }
    fn apply(&self, mutations: &[AtomMutation], actor: AuditActor) -> MnemoResult<()> {
        (**self).apply(mutations, actor)
    }
}
