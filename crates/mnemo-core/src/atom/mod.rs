mod base;
mod confidence;
mod graph;
mod normalize;
mod provenance;
mod types;

pub use base::{Atom, NewAtom};
pub use confidence::Confidence;
pub use graph::Graph;
pub use normalize::{normalize, triple_hash};
pub use provenance::Provenance;
pub use types::AtomType;
