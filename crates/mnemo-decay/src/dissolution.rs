use mnemo_core::{Atom, Graph};
use serde::{Deserialize, Serialize};

/// Dissolution check with the numbers behind it, for audit details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DissolutionDecision {
    pub atom_id: String,
    pub should_dissolve: bool,
    pub stability: f64,
    pub threshold: f64,
    pub reason: String,
}

/// Only Unsubstantiated atoms dissolve. Substantiated atoms are superseded,
/// never deleted, however weak they get.
pub fn evaluate(atom: &Atom, stability: f64, threshold: f64) -> DissolutionDecision {
    let (should_dissolve, reason) = match atom.graph {
        Graph::Unsubstantiated if stability < threshold => (
            true,
            format!(
                "stability {stability:.3} below threshold {threshold:.3} for type {}",
                atom.atom_type
            ),
        ),
        Graph::Unsubstantiated => (false, "stability above threshold".to_string()),
        Graph::Substantiated => (false, "substantiated atoms never dissolve".to_string()),
        Graph::Historical => (false, "historical atoms are immutable".to_string()),
    };
    DissolutionDecision {
        atom_id: atom.id.clone(),
        should_dissolve,
        stability,
        threshold,
        reason,
    }
}
