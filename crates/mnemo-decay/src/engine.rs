use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use mnemo_core::config::DecayConfig;
use mnemo_core::models::{AtomMutation, DeleteReason, MetadataUpdate};
use mnemo_core::traits::IDecayEngine;
use mnemo_core::{Atom, Graph, Ontology};

use crate::batch::{self, AtomStability, DecayPass};
use crate::dissolution::{self, DissolutionDecision};
use crate::formula;
use crate::report::{self, DecayReport};
use crate::schedule::{self, DecaySchedule, ThresholdCrossing};

/// Decay engine: per-type forgetting curve, reconsolidation, dissolution.
///
/// Pure with respect to the store. Callers turn the results into mutations.
pub struct DecayEngine {
    ontology: Arc<Ontology>,
    config: DecayConfig,
}

impl DecayEngine {
    pub fn new(ontology: Arc<Ontology>, config: DecayConfig) -> Self {
        Self { ontology, config }
    }

    /// Standard ontology with default configuration.
    pub fn standard() -> Self {
        Self::new(Arc::new(Ontology::standard()), DecayConfig::default())
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    fn strength(&self, atom: &Atom) -> Option<f64> {
        formula::strength_hours(
            self.ontology.decay_rate(atom.atom_type),
            atom.confidence.value(),
            self.config.strength_scale_hours,
        )
    }

    /// Dissolution check with its inputs, for audit details.
    pub fn evaluate_dissolution(&self, atom: &Atom, now: DateTime<Utc>) -> DissolutionDecision {
        dissolution::evaluate(
            atom,
            self.stability(atom, now),
            self.config.dissolution_threshold,
        )
    }

    /// When the atom crosses each configured threshold, from its last access.
    pub fn decay_schedule(&self, atom: &Atom) -> DecaySchedule {
        let strength = self.strength(atom);
        let crossings = self
            .config
            .schedule_thresholds
            .iter()
            .map(|&threshold| {
                let hours = strength.map(|s| formula::hours_to_threshold(s, threshold));
                ThresholdCrossing {
                    threshold,
                    hours_after_access: hours,
                    at: hours.and_then(|h| schedule::add_hours(atom.last_accessed, h)),
                }
            })
            .collect();
        DecaySchedule {
            atom_id: atom.id.clone(),
            strength_hours: strength,
            crossings,
        }
    }

    /// Hours until a batch pass may dissolve the atom. Zero when it already may.
    /// `None` for atoms that never dissolve (live Substantiated, Historical,
    /// non-decaying types).
    pub fn time_to_dissolution(&self, atom: &Atom, now: DateTime<Utc>) -> Option<f64> {
        if atom.graph != Graph::Unsubstantiated {
            return None;
        }
        let strength = self.strength(atom)?;
        let total = formula::hours_to_threshold(strength, self.config.dissolution_threshold);
        Some((total - atom.hours_since_access(now)).max(0.0))
    }

    /// Stability for every atom, weakest first.
    pub fn batch_stability(&self, atoms: &[Atom], now: DateTime<Utc>) -> Vec<AtomStability> {
        let mut results: Vec<AtomStability> = atoms
            .par_iter()
            .map(|atom| AtomStability {
                atom_id: atom.id.clone(),
                subject: atom.subject.clone(),
                atom_type: atom.atom_type,
                graph: atom.graph,
                stability: self.stability(atom, now),
            })
            .collect();
        batch::sort_weakest_first(&mut results);
        results
    }

    /// Substantiated atoms whose stability fell below `threshold`, weakest first.
    pub fn weak_atoms(&self, atoms: &[Atom], threshold: f64, now: DateTime<Utc>) -> Vec<AtomStability> {
        self.batch_stability(atoms, now)
            .into_iter()
            .filter(|s| s.graph == Graph::Substantiated && s.stability < threshold)
            .collect()
    }

    /// Unsubstantiated atoms that become dissolvable within `hours`.
    pub fn at_risk(&self, atoms: &[Atom], hours: f64, now: DateTime<Utc>) -> Vec<AtomStability> {
        let ids: std::collections::HashSet<&str> = atoms
            .iter()
            .filter(|a| {
                self.time_to_dissolution(a, now)
                    .is_some_and(|remaining| remaining <= hours)
            })
            .map(|a| a.id.as_str())
            .collect();
        self.batch_stability(atoms, now)
            .into_iter()
            .filter(|s| ids.contains(s.atom_id.as_str()))
            .collect()
    }

    pub fn report(&self, atoms: &[Atom], now: DateTime<Utc>) -> DecayReport {
        let stabilities = self.batch_stability(atoms, now);
        report::build(
            &stabilities,
            &report::Thresholds {
                at_risk: self.config.at_risk_threshold,
                weak: self.config.weak_memory_threshold,
                dissolution: self.config.dissolution_threshold,
            },
            now,
        )
    }

    /// Plan one user's batch pass over `atoms`: dissolve eligible
    /// Unsubstantiated atoms, give weak Substantiated atoms the automatic boost.
    pub fn plan_pass(&self, atoms: &[Atom], now: DateTime<Utc>) -> DecayPass {
        let mut pass = DecayPass::default();
        for s in self.batch_stability(atoms, now) {
            match s.graph {
                Graph::Unsubstantiated if s.stability < self.config.dissolution_threshold => {
                    pass.mutations.push(AtomMutation::Delete {
                        id: s.atom_id.clone(),
                        reason: DeleteReason::Dissolved {
                            stability: s.stability,
                        },
                    });
                    pass.dissolved.push(s.atom_id);
                }
                Graph::Substantiated if s.stability < self.config.weak_memory_threshold => {
                    let Some(atom) = atoms.iter().find(|a| a.id == s.atom_id) else {
                        continue;
                    };
                    let update = self.reconsolidate(atom, self.config.automatic_boost, now);
                    if update.is_empty() {
                        continue;
                    }
                    pass.mutations.push(AtomMutation::UpdateMetadata {
                        id: s.atom_id.clone(),
                        update,
                    });
                    pass.reconsolidated.push(s.atom_id);
                }
                _ => {}
            }
        }
        tracing::debug!(
            dissolved = pass.dissolved.len(),
            reconsolidated = pass.reconsolidated.len(),
            "decay pass planned"
        );
        pass
    }
}

impl Default for DecayEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl IDecayEngine for DecayEngine {
    fn stability(&self, atom: &Atom, now: DateTime<Utc>) -> f64 {
        formula::stability(
            self.ontology.decay_rate(atom.atom_type),
            atom.confidence.value(),
            self.config.strength_scale_hours,
            atom.hours_since_access(now),
        )
    }

    fn reconsolidate(&self, atom: &Atom, boost: f64, now: DateTime<Utc>) -> MetadataUpdate {
        if atom.graph == Graph::Historical {
            return MetadataUpdate::default();
        }
        let (_, max) = self.ontology.confidence_bounds(atom.atom_type);
        MetadataUpdate {
            confidence: Some(atom.confidence.boosted(boost, max).value()),
            last_accessed: Some(now.max(atom.last_accessed)),
            access_count: Some(atom.access_count.saturating_add(1)),
        }
    }

    fn should_dissolve(&self, atom: &Atom, now: DateTime<Utc>) -> bool {
        atom.graph == Graph::Unsubstantiated
            && self.stability(atom, now) < self.config.dissolution_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mnemo_core::{AtomType, NewAtom};

    fn atom(t: AtomType, predicate: &str, confidence: f64, graph: Graph) -> Atom {
        Atom::admit(
            NewAtom::new("u1", predicate, "x", t).with_confidence(confidence),
            &Ontology::standard(),
            graph,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn reconsolidation_respects_type_ceiling() {
        let engine = DecayEngine::standard();
        let a = atom(AtomType::Hypothesis, "suspects", 0.7, Graph::Unsubstantiated);
        let update = engine.reconsolidate(&a, 1.5, Utc::now());
        assert_eq!(update.confidence, Some(0.8));
    }

    #[test]
    fn historical_atoms_are_left_alone() {
        let engine = DecayEngine::standard();
        let mut a = atom(AtomType::Preference, "likes", 0.5, Graph::Substantiated);
        a.graph = Graph::Historical;
        assert!(engine.reconsolidate(&a, 1.5, Utc::now()).is_empty());
        assert!(!engine.should_dissolve(&a, Utc::now() + Duration::days(365)));
    }

    #[test]
    fn dissolution_window_shrinks_with_time() {
        let engine = DecayEngine::standard();
        let a = atom(AtomType::State, "feeling", 0.8, Graph::Unsubstantiated);
        let now = a.last_accessed;
        let full = engine.time_to_dissolution(&a, now).unwrap();
        let later = engine.time_to_dissolution(&a, now + Duration::hours(10)).unwrap();
        assert!((full - later - 10.0).abs() < 1e-6);
        assert_eq!(
            engine.time_to_dissolution(&a, now + Duration::days(30)),
            Some(0.0)
        );
    }
}
