/// Atom invariants violated at construction time. The atom is never stored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("predicate '{predicate}' is not allowed for atom type {atom_type}")]
    PredicateNotAllowed { predicate: String, atom_type: String },

    #[error("confidence {value} outside [{min}, {max}] for atom type {atom_type}")]
    ConfidenceOutOfBounds {
        value: f64,
        min: f64,
        max: f64,
        atom_type: String,
    },

    #[error("field '{field}' must not be empty")]
    EmptyField { field: &'static str },
}
