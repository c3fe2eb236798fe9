//! Atom map plus the indexes kept in step with it.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use mnemo_core::atom::normalize;
use mnemo_core::{Atom, Graph};

#[derive(Debug, Default)]
pub(crate) struct AtomIndex {
    atoms: HashMap<String, Atom>,
    by_subject: HashMap<String, BTreeSet<String>>,
    by_graph: BTreeMap<Graph, BTreeSet<String>>,
    /// triple hash → id of the live atom holding it.
    live_triples: HashMap<String, String>,
}

impl AtomIndex {
    pub(crate) fn get(&self, id: &str) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub(crate) fn live_twin(&self, hash: &str, excluding: &str) -> Option<&str> {
        self.live_triples
            .get(hash)
            .map(String::as_str)
            .filter(|id| *id != excluding)
    }

    pub(crate) fn subject_ids(&self, subject: &str) -> impl Iterator<Item = &Atom> {
        self.by_subject
            .get(&normalize(subject))
            .into_iter()
            .flatten()
            .filter_map(|id| self.atoms.get(id))
    }

    pub(crate) fn graph_len(&self, graph: Graph) -> usize {
        self.by_graph.get(&graph).map_or(0, BTreeSet::len)
    }

    pub(crate) fn subjects(&self) -> Vec<String> {
        let mut seen = BTreeMap::new();
        for atom in self.atoms.values() {
            seen.entry(normalize(&atom.subject))
                .or_insert_with(|| atom.subject.clone());
        }
        seen.into_values().collect()
    }

    /// Store `atom`, replacing any previous version with the same id.
    /// Returns the previous version.
    pub(crate) fn put(&mut self, atom: Atom) -> Option<Atom> {
        let previous = self.take(&atom.id);
        self.by_subject
            .entry(normalize(&atom.subject))
            .or_default()
            .insert(atom.id.clone());
        self.by_graph
            .entry(atom.graph)
            .or_default()
            .insert(atom.id.clone());
        if atom.is_live() {
            self.live_triples
                .insert(atom.triple_hash.clone(), atom.id.clone());
        }
        self.atoms.insert(atom.id.clone(), atom);
        previous
    }

    /// Remove atom `id` from the map and every index.
    pub(crate) fn take(&mut self, id: &str) -> Option<Atom> {
        let atom = self.atoms.remove(id)?;
        let subject_key = normalize(&atom.subject);
        if let Some(ids) = self.by_subject.get_mut(&subject_key) {
            ids.remove(id);
            if ids.is_empty() {
                self.by_subject.remove(&subject_key);
            }
        }
        if let Some(ids) = self.by_graph.get_mut(&atom.graph) {
            ids.remove(id);
        }
        if self.live_triples.get(&atom.triple_hash).map(String::as_str) == Some(id) {
            self.live_triples.remove(&atom.triple_hash);
        }
        Some(atom)
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.values()
    }
}
