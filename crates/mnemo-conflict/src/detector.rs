use std::cmp::Ordering;
use std::sync::Arc;

use tracing::Instrument;

use mnemo_core::config::DetectionConfig;
use mnemo_core::models::{
    ConflictMatch, DegradationEvent, DetectionReport, DetectionStage, InferenceChain, Relationship,
};
use mnemo_core::traits::ISimilarityOracle;
use mnemo_core::{Atom, Ontology};
use mnemo_observability::tracing_setup::events;
use mnemo_observability::DegradationTracker;

use crate::oracle::OracleGate;
use crate::rules::WorldRuleSet;
use crate::snapshot::SubjectSnapshot;
use crate::stages::{self, semantic, OracleQuestion, PairOutcome, Verdict};

/// Component name used in degradation events.
pub const COMPONENT: &str = "conflict_detection";
const FALLBACK: &str = "rule stages S0-S4 only";

/// Runs the detection stages for a candidate against a snapshot.
///
/// Detection never writes: the same candidate and snapshot always produce
/// the same report, whatever the cache holds.
pub struct ConflictDetector {
    ontology: Arc<Ontology>,
    config: DetectionConfig,
    oracle: OracleGate,
    rules: WorldRuleSet,
    tracker: Option<Arc<DegradationTracker>>,
}

impl ConflictDetector {
    /// Detector with the standard world rules and no oracle.
    pub fn new(ontology: Arc<Ontology>, config: DetectionConfig) -> Self {
        let oracle = OracleGate::new(None, &config);
        Self {
            ontology,
            config,
            oracle,
            rules: WorldRuleSet::standard(),
            tracker: None,
        }
    }

    pub fn with_oracle(mut self, oracle: Arc<dyn ISimilarityOracle>) -> Self {
        self.oracle = OracleGate::new(Some(oracle), &self.config);
        self
    }

    pub fn with_rules(mut self, rules: WorldRuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_tracker(mut self, tracker: Arc<DegradationTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn ontology(&self) -> &Arc<Ontology> {
        &self.ontology
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn rules(&self) -> &WorldRuleSet {
        &self.rules
    }

    pub fn oracle(&self) -> &OracleGate {
        &self.oracle
    }

    /// Classify `candidate` against every atom in `snapshot`.
    pub async fn detect(&self, candidate: &Atom, snapshot: &SubjectSnapshot) -> DetectionReport {
        let span = mnemo_observability::detection_span!(candidate.subject, snapshot.len());
        self.run(candidate, snapshot).instrument(span).await
    }

    async fn run(&self, candidate: &Atom, snapshot: &SubjectSnapshot) -> DetectionReport {
        let mut report = DetectionReport::default();
        let mut pending: Vec<(&Atom, OracleQuestion)> = Vec::new();

        for existing in &snapshot.atoms {
            if existing.id == candidate.id || !existing.is_live() {
                continue;
            }
            match stages::classify(candidate, existing, &self.ontology) {
                PairOutcome::Decided(verdict) => {
                    report.matches.push(to_match(existing, verdict, None, None));
                }
                PairOutcome::NeedsOracle(question) => pending.push((existing, question)),
                PairOutcome::Unrelated => {}
            }
        }

        let needs_oracle = !pending.is_empty() || !self.rules.is_empty();
        let mut oracle_ok = true;
        if needs_oracle && !self.oracle.is_configured() {
            self.degrade(&mut report, "no similarity oracle configured");
            oracle_ok = false;
        }

        if oracle_ok && !pending.is_empty() {
            match self.semantic_stage(candidate, &pending).await {
                Ok(found) => {
                    report.matches.extend(found);
                    if let Some(tracker) = &self.tracker {
                        tracker.mark_recovered(COMPONENT);
                    }
                }
                Err(failure) => {
                    self.degrade(&mut report, &failure);
                    oracle_ok = false;
                }
            }
        }

        if oracle_ok {
            self.transitive_stage(candidate, snapshot, &mut report);
        }

        report.matches.sort_by(rank_order);
        log_conflicts(candidate, &report);
        report
    }

    /// S5. All pairs or none: a failure part way through discards the stage.
    async fn semantic_stage(
        &self,
        candidate: &Atom,
        pending: &[(&Atom, OracleQuestion)],
    ) -> Result<Vec<ConflictMatch>, String> {
        let mut found = Vec::with_capacity(pending.len());
        for (existing, question) in pending {
            let score = self
                .oracle
                .similarity(&candidate.object, &existing.object)
                .await
                .map_err(|e| e.to_string())?;
            let verdict = semantic::decide(*question, score, &self.config);
            found.push(to_match(existing, verdict, Some(score), None));
        }
        Ok(found)
    }

    /// S6. Every chain atom not already classified becomes a transitive conflict.
    fn transitive_stage(
        &self,
        candidate: &Atom,
        snapshot: &SubjectSnapshot,
        report: &mut DetectionReport,
    ) {
        let facts: Vec<&Atom> = snapshot
            .all()
            .filter(|a| a.id != candidate.id && a.is_live())
            .collect();
        for firing in self.rules.evaluate(candidate, &facts) {
            let chain = firing.chain();
            for atom in firing.atoms.iter().filter(|a| a.id != candidate.id) {
                if report.matches.iter().any(|m| m.atom.id == atom.id) {
                    continue;
                }
                let verdict = Verdict::new(
                    Relationship::TransitiveConflict,
                    DetectionStage::Transitive,
                    firing.explanation.clone(),
                );
                report
                    .matches
                    .push(to_match(atom, verdict, None, Some(chain.clone())));
            }
        }
    }

    fn degrade(&self, report: &mut DetectionReport, failure: &str) {
        let event = DegradationEvent::now(COMPONENT, failure, FALLBACK);
        match &self.tracker {
            Some(tracker) => tracker.record(event.clone()),
            None => events::degradation_triggered(COMPONENT, failure, FALLBACK),
        }
        report.degradations.push(event);
        report.skipped_stages = vec![DetectionStage::Semantic, DetectionStage::Transitive];
    }
}

fn to_match(
    atom: &Atom,
    verdict: Verdict,
    similarity: Option<f64>,
    chain: Option<InferenceChain>,
) -> ConflictMatch {
    ConflictMatch {
        atom: atom.clone(),
        relationship: verdict.relationship,
        stage: verdict.stage,
        similarity,
        detail: verdict.detail,
        chain,
        candidate_refines: verdict.candidate_refines,
    }
}

/// Severity, then confidence descending, then oldest, then id.
fn rank_order(a: &ConflictMatch, b: &ConflictMatch) -> Ordering {
    a.relationship
        .rank()
        .cmp(&b.relationship.rank())
        .then_with(|| {
            b.atom
                .confidence
                .value()
                .total_cmp(&a.atom.confidence.value())
        })
        .then_with(|| a.atom.first_observed.cmp(&b.atom.first_observed))
        .then_with(|| a.atom.id.cmp(&b.atom.id))
}

fn log_conflicts(candidate: &Atom, report: &DetectionReport) {
    let Some(top) = report.conflicts().next() else {
        return;
    };
    let ids: Vec<String> = report.conflicts().map(|m| m.atom.id.clone()).collect();
    events::conflict_detected(&candidate.triple_label(), &ids, top.relationship.as_str());
}
