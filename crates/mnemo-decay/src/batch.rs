//! Bulk stability for sweeps and reports.

use mnemo_core::models::AtomMutation;
use mnemo_core::{AtomType, Graph};
use serde::{Deserialize, Serialize};

/// One atom's stability at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomStability {
    pub atom_id: String,
    pub subject: String,
    pub atom_type: AtomType,
    pub graph: Graph,
    pub stability: f64,
}

/// Mutations for one user's batch pass: dissolutions and automatic
/// reconsolidations, to be applied as one atomic batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecayPass {
    pub mutations: Vec<AtomMutation>,
    pub dissolved: Vec<String>,
    pub reconsolidated: Vec<String>,
}

impl DecayPass {
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

/// Weakest first, ties by id.
pub(crate) fn sort_weakest_first(results: &mut [AtomStability]) {
    results.sort_by(|a, b| {
        a.stability
            .total_cmp(&b.stability)
            .then_with(|| a.atom_id.cmp(&b.atom_id))
    });
}
