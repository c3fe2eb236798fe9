//! S0: the same fact, modulo case and whitespace.

use mnemo_core::models::{DetectionStage, Relationship};
use mnemo_core::Atom;

use super::Verdict;

pub fn check(candidate: &Atom, existing: &Atom) -> Option<Verdict> {
    (candidate.triple_hash == existing.triple_hash).then(|| {
        Verdict::new(
            Relationship::Duplicate,
            DetectionStage::Duplicate,
            format!("{} already known", existing.triple_label()),
        )
    })
}
