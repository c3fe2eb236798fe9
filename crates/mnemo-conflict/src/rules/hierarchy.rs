//! Reporting lines must not loop back on themselves.

use std::collections::BTreeMap;

use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};

use mnemo_core::atom::normalize;
use mnemo_core::constants::MAX_RULE_HOPS;
use mnemo_core::Atom;

use super::{owned_strings, RuleFiring, WorldRule};

/// Edges point from report to manager: `a reports_to b` is a→b and
/// `b manages a` is a→b. A candidate edge that closes a cycle fires.
#[derive(Debug, Clone)]
pub struct ReportingCycle {
    name: String,
    upward: Vec<String>,
    downward: Vec<String>,
}

impl ReportingCycle {
    pub fn standard() -> Self {
        Self::new("reporting_cycle", &["reports_to"], &["manages"])
    }

    pub fn new(name: impl Into<String>, upward: &[&str], downward: &[&str]) -> Self {
        Self {
            name: name.into(),
            upward: owned_strings(upward),
            downward: owned_strings(downward),
        }
    }

    fn edge(&self, atom: &Atom) -> Option<(String, String)> {
        if self.upward.contains(&atom.predicate) {
            Some((atom.normalized_subject(), atom.normalized_object()))
        } else if self.downward.contains(&atom.predicate) {
            Some((atom.normalized_object(), atom.normalized_subject()))
        } else {
            None
        }
    }
}

#[derive(Default)]
struct Hierarchy<'a> {
    graph: DiGraph<String, &'a Atom>,
    nodes: BTreeMap<String, NodeIndex>,
}

impl<'a> Hierarchy<'a> {
    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(ix) = self.nodes.get(name) {
            return *ix;
        }
        let ix = self.graph.add_node(name.to_string());
        self.nodes.insert(name.to_string(), ix);
        ix
    }

    /// Atoms along the shortest path `from` → `to`.
    fn path(&self, from: &str, to: &str) -> Option<Vec<&'a Atom>> {
        let (start, goal) = (*self.nodes.get(from)?, *self.nodes.get(to)?);
        let (_, nodes) = astar(&self.graph, start, |n| n == goal, |_| 1usize, |_| 0)?;
        nodes
            .windows(2)
            .map(|w| {
                self.graph
                    .find_edge(w[0], w[1])
                    .and_then(|e| self.graph.edge_weight(e).copied())
            })
            .collect()
    }
}

impl WorldRule for ReportingCycle {
    fn name(&self) -> &str {
        &self.name
    }

    fn fire(&self, candidate: &Atom, facts: &[&Atom]) -> Vec<RuleFiring> {
        let Some((from, to)) = self.edge(candidate) else {
            return Vec::new();
        };
        if from == to {
            return Vec::new();
        }

        let mut hierarchy = Hierarchy::default();
        for atom in facts.iter().copied() {
            if let Some((a, b)) = self.edge(atom) {
                let (na, nb) = (hierarchy.node(&a), hierarchy.node(&b));
                hierarchy.graph.add_edge(na, nb, atom);
            }
        }

        // The candidate closes a cycle when its target already reaches its source.
        let Some(path) = hierarchy.path(&to, &from) else {
            return Vec::new();
        };
        if path.is_empty() || path.len() > MAX_RULE_HOPS {
            return Vec::new();
        }

        let mut atoms = vec![candidate.clone()];
        atoms.extend(path.into_iter().cloned());
        let names: Vec<String> = atoms.iter().map(|a| a.triple_label()).collect();
        vec![RuleFiring {
            rule: self.name.clone(),
            explanation: format!(
                "reporting cycle {} -> {}: {}",
                normalize(&from),
                normalize(&to),
                names.join(", ")
            ),
            atoms,
        }]
    }
}
