use serde::{Deserialize, Serialize};

use crate::atom::{normalize, Atom, Graph};

/// Triple lookup. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripleQuery {
    pub subject: String,
    pub predicate: Option<String>,
    pub object: Option<String>,
    pub graph: Option<Graph>,
    /// Drop atoms whose current stability is below this. Stores do not
    /// evaluate it; the engine filters after the lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stability: Option<f64>,
}

impl TripleQuery {
    pub fn subject(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }

    pub fn predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }

    pub fn graph(mut self, graph: Graph) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn min_stability(mut self, floor: f64) -> Self {
        self.min_stability = Some(floor);
        self
    }

    /// Case- and whitespace-insensitive match.
    pub fn matches(&self, atom: &Atom) -> bool {
        normalize(&atom.subject) == normalize(&self.subject)
            && self
                .predicate
                .as_deref()
                .map_or(true, |p| normalize(p) == atom.predicate)
            && self
                .object
                .as_deref()
                .map_or(true, |o| normalize(o) == normalize(&atom.object))
            && self.graph.map_or(true, |g| g == atom.graph)
    }
}
