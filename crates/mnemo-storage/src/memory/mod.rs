//! In-process atom store.

mod index;

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use mnemo_core::errors::{MnemoResult, StorageError};
use mnemo_core::models::{AtomMutation, AuditActor, AuditEntry, TripleQuery};
use mnemo_core::traits::IAtomStore;
use mnemo_core::{Atom, Graph};

use crate::rules;
use index::AtomIndex;

#[derive(Debug, Default)]
struct Inner {
    index: AtomIndex,
    audit: Vec<AuditEntry>,
}

/// Step needed to reverse one applied mutation.
enum Undo {
    Remove(String),
    Restore(Atom),
}

/// Indexed in-memory store. A single lock covers the atoms, every index,
/// and the audit log, so readers never see a half-applied batch.
#[derive(Debug, Default)]
pub struct InMemoryAtomStore {
    inner: RwLock<Inner>,
}

impl InMemoryAtomStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> MnemoResult<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|e| {
            StorageError::LockPoisoned {
                details: e.to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> MnemoResult<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|e| {
            StorageError::LockPoisoned {
                details: e.to_string(),
            }
            .into()
        })
    }

    pub fn len(&self) -> MnemoResult<usize> {
        Ok(self.read()?.index.values().count())
    }

    pub fn is_empty(&self) -> MnemoResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn sorted(mut atoms: Vec<Atom>) -> Vec<Atom> {
    atoms.sort_by(|a, b| {
        a.first_observed
            .cmp(&b.first_observed)
            .then_with(|| a.id.cmp(&b.id))
    });
    atoms
}

impl IAtomStore for InMemoryAtomStore {
    fn get(&self, id: &str) -> MnemoResult<Option<Atom>> {
        Ok(self.read()?.index.get(id).cloned())
    }

    fn find_by_triple(&self, query: &TripleQuery) -> MnemoResult<Vec<Atom>> {
        let inner = self.read()?;
        Ok(sorted(
            inner
                .index
                .subject_ids(&query.subject)
                .filter(|a| query.matches(a))
                .cloned()
                .collect(),
        ))
    }

    fn find_by_subject(&self, subject: &str, graph: Option<Graph>) -> MnemoResult<Vec<Atom>> {
        let inner = self.read()?;
        Ok(sorted(
            inner
                .index
                .subject_ids(subject)
                .filter(|a| graph.map_or(true, |g| a.graph == g))
                .cloned()
                .collect(),
        ))
    }

    fn subjects(&self) -> MnemoResult<Vec<String>> {
        Ok(self.read()?.index.subjects())
    }

    fn count_by_graph(&self, subject: Option<&str>) -> MnemoResult<BTreeMap<Graph, usize>> {
        let inner = self.read()?;
        let mut counts: BTreeMap<Graph, usize> = Graph::ALL.iter().map(|g| (*g, 0)).collect();
        match subject {
            Some(s) => {
                for atom in inner.index.subject_ids(s) {
                    *counts.entry(atom.graph).or_default() += 1;
                }
            }
            None => {
                for g in Graph::ALL {
                    counts.insert(g, inner.index.graph_len(g));
                }
            }
        }
        Ok(counts)
    }

    fn audit_entries(&self, atom_id: Option<&str>) -> MnemoResult<Vec<AuditEntry>> {
        let inner = self.read()?;
        Ok(inner
            .audit
            .iter()
            .filter(|e| atom_id.map_or(true, |id| e.atom_id == id))
            .cloned()
            .collect())
    }

    fn apply(&self, mutations: &[AtomMutation], actor: AuditActor) -> MnemoResult<()> {
        let mut inner = self.write()?;
        let now = Utc::now();
        let mut undo: Vec<Undo> = Vec::with_capacity(mutations.len());
        let mut staged_audit = Vec::with_capacity(mutations.len());

        for mutation in mutations {
            let id = mutation.atom_id().to_string();
            let current = inner.index.get(&id).cloned();
            let twin = match mutation {
                AtomMutation::Insert(atom) => inner
                    .index
                    .live_twin(&atom.triple_hash, &atom.id)
                    .map(str::to_string),
                _ => None,
            };

            if let Err(e) = rules::check_mutation(mutation, current.as_ref(), twin.as_deref()) {
                // Roll back everything applied so far, newest first.
                for step in undo.into_iter().rev() {
                    match step {
                        Undo::Remove(id) => {
                            inner.index.take(&id);
                        }
                        Undo::Restore(atom) => {
                            inner.index.put(atom);
                        }
                    }
                }
                tracing::warn!(atom_id = %id, error = %e, "mutation batch rolled back");
                return Err(e);
            }

            let (operation, details) = rules::audit_record(mutation, current.as_ref());
            staged_audit.push(AuditEntry {
                atom_id: id.clone(),
                operation,
                details,
                actor,
                timestamp: now,
            });

            match rules::mutated(mutation, current.as_ref()) {
                Some(next) => {
                    inner.index.put(next);
                }
                None => {
                    inner.index.take(&id);
                }
            }
            undo.push(match current {
                Some(prior) => Undo::Restore(prior),
                None => Undo::Remove(id),
            });
        }

        inner.audit.extend(staged_audit);
        Ok(())
    }
}
