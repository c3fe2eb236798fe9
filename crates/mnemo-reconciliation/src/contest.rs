//! Pairwise contest between the candidate and one conflicting atom.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use mnemo_core::{Atom, Graph};

/// Everything the tie-break looks at, computed once per atom.
#[derive(Debug, Clone)]
pub struct Contender<'a> {
    pub atom: &'a Atom,
    pub graph: Graph,
    pub stability: f64,
    pub effective_confidence: f64,
}

impl<'a> Contender<'a> {
    pub fn new(atom: &'a Atom, graph: Graph, stability: f64, effective_confidence: f64) -> Self {
        Self {
            atom,
            graph,
            stability,
            effective_confidence,
        }
    }

    fn first_observed(&self) -> DateTime<Utc> {
        self.atom.first_observed
    }
}

/// Result of one contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContestOutcome {
    /// `Greater` when the first contender wins.
    pub ordering: Ordering,
    /// Stabilities were within epsilon and the tie-break decided.
    pub tied: bool,
}

impl ContestOutcome {
    pub fn first_wins(&self) -> bool {
        self.ordering == Ordering::Greater
    }
}

/// Higher stability wins. Within `epsilon`: Substantiated, then higher
/// effective confidence, then earlier first observation, then smaller id.
pub fn contest(a: &Contender<'_>, b: &Contender<'_>, epsilon: f64) -> ContestOutcome {
    if (a.stability - b.stability).abs() > epsilon {
        return ContestOutcome {
            ordering: a.stability.total_cmp(&b.stability),
            tied: false,
        };
    }
    ContestOutcome {
        ordering: tie_break(a, b),
        tied: true,
    }
}

fn tie_break(a: &Contender<'_>, b: &Contender<'_>) -> Ordering {
    let substantiated = |c: &Contender<'_>| c.graph == Graph::Substantiated;
    substantiated(a)
        .cmp(&substantiated(b))
        .then_with(|| a.effective_confidence.total_cmp(&b.effective_confidence))
        .then_with(|| b.first_observed().cmp(&a.first_observed()))
        .then_with(|| b.atom.id.cmp(&a.atom.id))
}
