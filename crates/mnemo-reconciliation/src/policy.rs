use std::sync::Arc;

use chrono::{DateTime, Utc};

use mnemo_core::config::ReconciliationConfig;
use mnemo_core::models::{
    AdmissionDecision, AtomMutation, ConflictMatch, DeleteReason, DetectionReport, MetadataUpdate,
    ReviewReason,
};
use mnemo_core::traits::{IAdmissionAuthority, IDecayEngine};
use mnemo_core::{Atom, Confidence, Graph, Ontology};
use mnemo_observability::tracing_setup::events;

use crate::contest::{contest, Contender};
use crate::plan::{Decision, ReconciliationPlan};

/// Turns a detection report into a mutation plan.
///
/// Planning is pure. Nothing touches the store until the caller applies
/// `plan.mutations` as one batch.
pub struct ReconciliationPolicy {
    ontology: Arc<Ontology>,
    decay: Arc<dyn IDecayEngine>,
    config: ReconciliationConfig,
}

impl ReconciliationPolicy {
    pub fn new(
        ontology: Arc<Ontology>,
        decay: Arc<dyn IDecayEngine>,
        config: ReconciliationConfig,
    ) -> Self {
        Self {
            ontology,
            decay,
            config,
        }
    }

    pub fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    fn effective_confidence(&self, atom: &Atom) -> f64 {
        atom.effective_confidence(self.config.epistemic_discount).value()
    }

    /// Substantiated when effective confidence reaches the auto-substantiate level.
    pub fn admission_graph(&self, candidate: &Atom) -> Graph {
        if self.effective_confidence(candidate) >= self.config.auto_substantiate_confidence {
            Graph::Substantiated
        } else {
            Graph::Unsubstantiated
        }
    }

    /// Plan without consulting an authority.
    pub fn plan(
        &self,
        candidate: &Atom,
        report: &DetectionReport,
        now: DateTime<Utc>,
    ) -> ReconciliationPlan {
        self.plan_in(candidate.clone(), report, now, None)
    }

    /// Plan, then hand flagged plans to `authority` and apply its answer.
    pub fn resolve(
        &self,
        candidate: &Atom,
        report: &DetectionReport,
        authority: &dyn IAdmissionAuthority,
        now: DateTime<Utc>,
    ) -> ReconciliationPlan {
        let plan = self.plan(candidate, report, now);
        if !plan.needs_review {
            return plan;
        }
        events::review_requested(&candidate.subject, plan.reasons.len());
        let decision = authority.review(&plan.review_request());
        self.apply_review(plan, report, decision, now)
    }

    /// Apply an authority decision to a flagged plan. `Adjust` re-plans once;
    /// the adjusted plan is final even if it would be flagged again.
    pub fn apply_review(
        &self,
        plan: ReconciliationPlan,
        report: &DetectionReport,
        decision: AdmissionDecision,
        now: DateTime<Utc>,
    ) -> ReconciliationPlan {
        let review = Some(decision.clone());
        match decision {
            AdmissionDecision::Accept => ReconciliationPlan { review, ..plan },
            AdmissionDecision::Reject { reason } => {
                let mut refused =
                    ReconciliationPlan::new(plan.candidate, Decision::Refused { reason });
                refused.needs_review = plan.needs_review;
                refused.reasons = plan.reasons;
                refused.ties = plan.ties;
                refused.review = review;
                refused
            }
            AdmissionDecision::Adjust { graph, confidence } => {
                let mut candidate = plan.candidate;
                if let Some(c) = confidence {
                    let rules = self.ontology.rules(candidate.atom_type);
                    candidate.confidence =
                        Confidence::new(c.clamp(rules.confidence_min, rules.confidence_max));
                }
                let mut adjusted =
                    self.plan_in(candidate, report, now, graph.filter(Graph::is_live));
                adjusted.review = review;
                adjusted
            }
        }
    }

    fn plan_in(
        &self,
        mut candidate: Atom,
        report: &DetectionReport,
        now: DateTime<Utc>,
        forced_graph: Option<Graph>,
    ) -> ReconciliationPlan {
        candidate.graph = forced_graph.unwrap_or_else(|| self.admission_graph(&candidate));
        candidate.superseded_by = None;
        candidate.refines = None;

        if let Some(duplicate) = report.duplicates().next() {
            return reject_duplicate(candidate, &duplicate.atom, now);
        }

        candidate.refines = report
            .refinements()
            .find(|m| m.candidate_refines && !m.is_cross_subject(&candidate.subject))
            .map(|m| m.atom.id.clone());

        let mut reasons = Vec::new();
        let effective = self.effective_confidence(&candidate);
        if effective < self.config.review_confidence_floor {
            reasons.push(ReviewReason::WeakEvidence {
                effective_confidence: effective,
            });
        }

        let (own, foreign): (Vec<&ConflictMatch>, Vec<&ConflictMatch>) = report
            .conflicts()
            .partition(|m| !m.is_cross_subject(&candidate.subject));
        reasons.extend(foreign.iter().map(|m| ReviewReason::CrossSubject {
            atom_id: m.atom.id.clone(),
            subject: m.atom.subject.clone(),
        }));

        let epsilon = self.config.stability_tie_epsilon;
        let challenger = Contender::new(
            &candidate,
            candidate.graph,
            self.decay.stability(&candidate, now),
            effective,
        );
        let mut ties = 0;
        let mut beaten: Vec<&Atom> = Vec::new();
        let mut strongest: Option<Contender<'_>> = None;
        for m in &own {
            let existing = Contender::new(
                &m.atom,
                m.atom.graph,
                self.decay.stability(&m.atom, now),
                self.effective_confidence(&m.atom),
            );
            let outcome = contest(&challenger, &existing, epsilon);
            if outcome.tied {
                ties += 1;
                reasons.push(ReviewReason::StabilityTie {
                    against: m.atom.id.clone(),
                });
            }
            if outcome.first_wins() {
                beaten.push(&m.atom);
            } else {
                strongest = match strongest {
                    Some(best) if !contest(&existing, &best, epsilon).first_wins() => Some(best),
                    _ => Some(existing),
                };
            }
        }

        let winner = strongest.map(|c| c.atom.id.clone());
        let (decision, mutations, losers) = match winner {
            None => {
                let mut mutations = vec![AtomMutation::Insert(candidate.clone())];
                for loser in &beaten {
                    if loser.graph == Graph::Substantiated {
                        if candidate.epistemic_distance > 0 {
                            reasons.push(ReviewReason::SecondhandSupersession {
                                target: loser.id.clone(),
                            });
                        }
                        mutations.push(AtomMutation::MoveGraph {
                            id: loser.id.clone(),
                            to: Graph::Historical,
                            superseded_by: Some(candidate.id.clone()),
                        });
                    } else {
                        mutations.push(AtomMutation::Delete {
                            id: loser.id.clone(),
                            reason: DeleteReason::LostConflict {
                                winner: candidate.id.clone(),
                            },
                        });
                    }
                }
                let losers = beaten.iter().map(|a| a.id.clone()).collect();
                let decision = Decision::Admitted {
                    atom_id: candidate.id.clone(),
                    graph: candidate.graph,
                };
                (decision, mutations, losers)
            }
            Some(winner) => {
                let recorded = candidate.graph == Graph::Substantiated;
                let mut mutations = Vec::new();
                if recorded {
                    candidate.graph = Graph::Historical;
                    candidate.superseded_by = Some(winner.clone());
                    mutations.push(AtomMutation::Insert(candidate.clone()));
                }
                (Decision::Lost { winner, recorded }, mutations, Vec::new())
            }
        };

        let mut plan = ReconciliationPlan::new(candidate, decision);
        plan.mutations = mutations;
        plan.losers = losers;
        plan.ties = ties;
        for reason in reasons {
            plan.flag(reason);
        }
        tracing::debug!(
            event = "reconciliation_planned",
            candidate = %plan.candidate.id,
            mutations = plan.mutations.len(),
            ties = plan.ties,
            needs_review = plan.needs_review,
            "reconciliation planned"
        );
        plan
    }
}

fn reject_duplicate(candidate: Atom, existing: &Atom, now: DateTime<Utc>) -> ReconciliationPlan {
    events::duplicate_rejected(&candidate.subject, &existing.id);
    let mut plan = ReconciliationPlan::new(
        candidate,
        Decision::Rejected {
            duplicate_of: existing.id.clone(),
        },
    );
    plan.mutations.push(AtomMutation::UpdateMetadata {
        id: existing.id.clone(),
        update: MetadataUpdate {
            confidence: None,
            last_accessed: Some(now.max(existing.last_accessed)),
            access_count: Some(existing.access_count.saturating_add(1)),
        },
    });
    plan
}
