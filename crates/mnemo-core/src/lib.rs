//! # mnemo-core
//!
//! Foundation crate for the Mnemo fact memory.
//! Defines the atom model, the ontology, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod atom;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod ontology;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use atom::{Atom, AtomType, Confidence, Graph, NewAtom, Provenance};
pub use config::MnemoConfig;
pub use errors::{MnemoError, MnemoResult};
pub use ontology::Ontology;
