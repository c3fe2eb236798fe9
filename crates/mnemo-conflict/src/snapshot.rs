use std::collections::BTreeSet;

use mnemo_core::atom::normalize;
use mnemo_core::errors::MnemoResult;
use mnemo_core::traits::IAtomStore;
use mnemo_core::Atom;

/// Read set for one detection: the subject's live atoms plus the live atoms
/// of entities those atoms point at, for multi-hop rules.
#[derive(Debug, Clone, Default)]
pub struct SubjectSnapshot {
    pub subject: String,
    /// Live atoms whose subject is `subject`.
    pub atoms: Vec<Atom>,
    /// Live atoms of other subjects reachable through objects.
    pub related: Vec<Atom>,
}

impl SubjectSnapshot {
    pub fn from_atoms(subject: impl Into<String>, atoms: Vec<Atom>, related: Vec<Atom>) -> Self {
        Self {
            subject: subject.into(),
            atoms,
            related,
        }
    }

    /// Load the snapshot for `candidate`, following objects up to `hops` levels.
    /// The candidate's own object seeds the walk.
    pub fn load(store: &dyn IAtomStore, candidate: &Atom, hops: usize) -> MnemoResult<Self> {
        let subject_key = normalize(&candidate.subject);
        let atoms = store.find_live_by_subject(&candidate.subject)?;

        let mut visited: BTreeSet<String> = BTreeSet::from([subject_key]);
        let mut frontier: BTreeSet<String> = atoms
            .iter()
            .chain(std::iter::once(candidate))
            .map(Atom::normalized_object)
            .collect();
        let mut related = Vec::new();

        for _ in 0..hops {
            let mut next = BTreeSet::new();
            for entity in frontier {
                if !visited.insert(entity.clone()) {
                    continue;
                }
                for atom in store.find_live_by_subject(&entity)? {
                    next.insert(atom.normalized_object());
                    related.push(atom);
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        Ok(Self {
            subject: candidate.subject.clone(),
            atoms,
            related,
        })
    }

    pub fn len(&self) -> usize {
        self.atoms.len() + self.related.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every atom in the snapshot, subject atoms first.
    pub fn all(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().chain(self.related.iter())
    }
}
