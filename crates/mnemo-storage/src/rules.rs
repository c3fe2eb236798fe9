//! Mutation legality and audit records shared by every store.

use mnemo_core::errors::{MnemoError, MnemoResult, StorageError};
use mnemo_core::models::{AtomMutation, AuditOperation, DeleteReason};
use mnemo_core::{Atom, Graph};
use serde_json::json;

/// Check `mutation` against the current state of its target.
///
/// `current` is the stored atom with the mutation's id. `live_twin` is the id of
/// another live atom holding the same triple, if any.
pub fn check_mutation(
    mutation: &AtomMutation,
    current: Option<&Atom>,
    live_twin: Option<&str>,
) -> MnemoResult<()> {
    match mutation {
        AtomMutation::Insert(atom) => {
            if current.is_some() {
                return Err(StorageError::DuplicateId {
                    id: atom.id.clone(),
                }
                .into());
            }
            if atom.graph == Graph::Historical && atom.superseded_by.is_none() {
                return Err(StorageError::MissingSupersessionPointer {
                    id: atom.id.clone(),
                }
                .into());
            }
            if atom.is_live() {
                if let Some(existing_id) = live_twin {
                    return Err(StorageError::DuplicateLiveTriple {
                        existing_id: existing_id.to_string(),
                    }
                    .into());
                }
            }
            Ok(())
        }
        AtomMutation::MoveGraph {
            id,
            to,
            superseded_by,
        } => {
            let atom = existing(id, current)?;
            guard_historical(atom)?;
            if !atom.graph.can_transition_to(*to) {
                return Err(StorageError::IllegalTransition {
                    id: id.clone(),
                    from: atom.graph.to_string(),
                    to: to.to_string(),
                }
                .into());
            }
            if *to == Graph::Historical && superseded_by.is_none() {
                return Err(StorageError::MissingSupersessionPointer { id: id.clone() }.into());
            }
            Ok(())
        }
        AtomMutation::UpdateMetadata { id, .. } => {
            let atom = existing(id, current)?;
            guard_historical(atom)
        }
        AtomMutation::Delete { id, .. } => {
            let atom = existing(id, current)?;
            guard_historical(atom)?;
            if atom.graph == Graph::Substantiated {
                return Err(StorageError::SubstantiatedDeletion { id: id.clone() }.into());
            }
            Ok(())
        }
    }
}

fn existing<'a>(id: &str, current: Option<&'a Atom>) -> MnemoResult<&'a Atom> {
    current.ok_or_else(|| MnemoError::AtomNotFound { id: id.to_string() })
}

fn guard_historical(atom: &Atom) -> MnemoResult<()> {
    if atom.graph == Graph::Historical {
        return Err(StorageError::HistoricalImmutable {
            id: atom.id.clone(),
        }
        .into());
    }
    Ok(())
}

/// Apply a checked mutation to an atom value. Returns `None` for deletions.
pub fn mutated(mutation: &AtomMutation, current: Option<&Atom>) -> Option<Atom> {
    match mutation {
        AtomMutation::Insert(atom) => Some(atom.clone()),
        AtomMutation::MoveGraph {
            to, superseded_by, ..
        } => current.map(|atom| {
            let mut next = atom.clone();
            next.graph = *to;
            if *to == Graph::Historical {
                next.superseded_by = superseded_by.clone();
            }
            next
        }),
        AtomMutation::UpdateMetadata { update, .. } => current.map(|atom| {
            let mut next = atom.clone();
            update.apply_to(&mut next);
            next
        }),
        AtomMutation::Delete { .. } => None,
    }
}

/// Audit operation and details for a checked mutation.
pub fn audit_record(
    mutation: &AtomMutation,
    current: Option<&Atom>,
) -> (AuditOperation, serde_json::Value) {
    match mutation {
        AtomMutation::Insert(atom) if atom.graph == Graph::Historical => (
            AuditOperation::Supersede,
            json!({
                "graph": atom.graph,
                "superseded_by": atom.superseded_by,
                "triple": atom.triple_label(),
                "recorded_directly": true,
            }),
        ),
        AtomMutation::Insert(atom) => (
            AuditOperation::Create,
            json!({
                "graph": atom.graph,
                "atom_type": atom.atom_type,
                "triple": atom.triple_label(),
                "confidence": atom.confidence.value(),
                "refines": atom.refines,
            }),
        ),
        AtomMutation::MoveGraph {
            to, superseded_by, ..
        } => {
            let op = if *to == Graph::Historical {
                AuditOperation::Supersede
            } else {
                AuditOperation::Promote
            };
            (
                op,
                json!({
                    "from": current.map(|a| a.graph),
                    "to": to,
                    "superseded_by": superseded_by,
                }),
            )
        }
        AtomMutation::UpdateMetadata { update, .. } => (
            AuditOperation::Update,
            json!({
                "confidence": update.confidence,
                "last_accessed": update.last_accessed,
                "access_count": update.access_count,
            }),
        ),
        AtomMutation::Delete { reason, .. } => {
            let op = match reason {
                DeleteReason::Dissolved { .. } => AuditOperation::Dissolve,
                DeleteReason::LostConflict { .. } => AuditOperation::Discard,
                DeleteReason::Manual { .. } => AuditOperation::Delete,
            };
            let mut details = json!({ "reason": reason });
            if let Some(atom) = current {
                details["triple"] = json!(atom.triple_label());
                details["graph"] = json!(atom.graph);
            }
            (op, details)
        }
    }
}
