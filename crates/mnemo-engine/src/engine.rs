use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::Instrument;

use mnemo_conflict::{ConflictDetector, LexicalSimilarity, SubjectSnapshot, WorldRuleSet};
use mnemo_core::models::{
    AggregateSummary, AtomMutation, AuditActor, DecaySummary, DeleteReason, TripleQuery,
    UserFailure,
};
use mnemo_core::traits::{
    AcceptAll, IAdmissionAuthority, IAtomStore, IDecayEngine, ISimilarityOracle,
};
use mnemo_core::{Atom, Graph, MnemoConfig, MnemoError, MnemoResult, NewAtom, Ontology};
use mnemo_decay::{DecayEngine, DecayReport};
use mnemo_observability::tracing_setup::events;
use mnemo_observability::DegradationTracker;
use mnemo_reconciliation::ReconciliationPolicy;
use mnemo_storage::{InMemoryAtomStore, SqliteAtomStore};

use crate::locks::SubjectLocks;
use crate::outcome::AdmissionOutcome;
use crate::scheduling::{CancelFlag, Debouncer};

/// The memory engine.
///
/// Owns the store handle, the immutable ontology, and the detection,
/// reconciliation, and decay components built from one [`MnemoConfig`].
pub struct MemoryEngine {
    store: Arc<dyn IAtomStore>,
    ontology: Arc<Ontology>,
    config: MnemoConfig,
    detector: ConflictDetector,
    policy: ReconciliationPolicy,
    decay: Arc<DecayEngine>,
    authority: Arc<dyn IAdmissionAuthority>,
    locks: SubjectLocks,
    debouncer: Debouncer,
    tracker: Arc<DegradationTracker>,
}

impl MemoryEngine {
    /// Engine over `store` with the standard ontology, the lexical oracle,
    /// the standard world rules, and an authority that accepts every plan.
    pub fn new(store: Arc<dyn IAtomStore>, config: MnemoConfig) -> Self {
        let ontology = Arc::new(Ontology::standard());
        let tracker = Arc::new(DegradationTracker::new());
        let decay = Arc::new(DecayEngine::new(ontology.clone(), config.decay.clone()));
        let detector = ConflictDetector::new(ontology.clone(), config.detection.clone())
            .with_oracle(Arc::new(LexicalSimilarity))
            .with_tracker(tracker.clone());
        let policy = ReconciliationPolicy::new(
            ontology.clone(),
            decay.clone(),
            config.reconciliation.clone(),
        );
        let debouncer = Debouncer::new(Duration::from_secs(config.triggers.debounce_secs));
        Self {
            store,
            ontology,
            config,
            detector,
            policy,
            decay,
            authority: Arc::new(AcceptAll),
            locks: SubjectLocks::new(),
            debouncer,
            tracker,
        }
    }

    /// Engine over the SQLite file named in `config.storage`.
    pub fn open(config: MnemoConfig) -> MnemoResult<Self> {
        let store = SqliteAtomStore::open(Path::new(&config.storage.db_path), &config.storage)?;
        Ok(Self::new(Arc::new(store), config))
    }

    /// Engine over a fresh in-memory store.
    pub fn in_memory(config: MnemoConfig) -> Self {
        Self::new(Arc::new(InMemoryAtomStore::new()), config)
    }

    /// Replace the similarity oracle. `None` runs detection on the rule
    /// stages only, with every detection reported as degraded.
    pub fn with_oracle(mut self, oracle: Option<Arc<dyn ISimilarityOracle>>) -> Self {
        self.detector = match oracle {
            Some(oracle) => self.detector.with_oracle(oracle),
            None => ConflictDetector::new(self.ontology.clone(), self.config.detection.clone())
                .with_rules(self.detector.rules().clone())
                .with_tracker(self.tracker.clone()),
        };
        self
    }

    pub fn with_rules(mut self, rules: WorldRuleSet) -> Self {
        self.detector = self.detector.with_rules(rules);
        self
    }

    pub fn with_authority(mut self, authority: Arc<dyn IAdmissionAuthority>) -> Self {
        self.authority = authority;
        self
    }

    pub fn store(&self) -> &Arc<dyn IAtomStore> {
        &self.store
    }

    pub fn ontology(&self) -> &Arc<Ontology> {
        &self.ontology
    }

    pub fn config(&self) -> &MnemoConfig {
        &self.config
    }

    pub fn decay(&self) -> &DecayEngine {
        &self.decay
    }

    pub fn tracker(&self) -> &Arc<DegradationTracker> {
        &self.tracker
    }

    pub fn locks(&self) -> &SubjectLocks {
        &self.locks
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    // ── Admission ────────────────────────────────────────────────────────

    pub async fn admit(&self, candidate: NewAtom) -> MnemoResult<AdmissionOutcome> {
        self.admit_at(candidate, Utc::now()).await
    }

    /// Validate, detect, reconcile, and apply as one critical section for
    /// the candidate's subject. The plan commits whole or not at all.
    pub async fn admit_at(
        &self,
        candidate: NewAtom,
        now: DateTime<Utc>,
    ) -> MnemoResult<AdmissionOutcome> {
        let span = mnemo_observability::admission_span!(candidate.subject, candidate.predicate);
        self.admit_locked(candidate, now).instrument(span).await
    }

    async fn admit_locked(
        &self,
        candidate: NewAtom,
        now: DateTime<Utc>,
    ) -> MnemoResult<AdmissionOutcome> {
        let candidate = Atom::admit(candidate, &self.ontology, Graph::Unsubstantiated, now)?;
        let _guard = self.locks.acquire(&candidate.subject).await;

        let snapshot = SubjectSnapshot::load(
            self.store.as_ref(),
            &candidate,
            self.config.detection.snapshot_hops,
        )?;
        let report = self.detector.detect(&candidate, &snapshot).await;
        let plan = self
            .policy
            .resolve(&candidate, &report, self.authority.as_ref(), now);

        if !plan.mutations.is_empty() {
            let actor = if plan.review.is_some() {
                AuditActor::Admission
            } else {
                AuditActor::Reconciliation
            };
            self.store.apply(&plan.mutations, actor)?;
            log_mutations(&plan.mutations);
        }
        Ok(AdmissionOutcome { report, plan })
    }

    // ── Retrieval ────────────────────────────────────────────────────────

    /// Live atoms matching `query`, reconsolidated as a retrieval. Atoms
    /// under `query.min_stability` are neither returned nor touched.
    pub async fn recall(&self, query: &TripleQuery) -> MnemoResult<Vec<Atom>> {
        self.recall_at(query, Utc::now()).await
    }

    pub async fn recall_at(
        &self,
        query: &TripleQuery,
        now: DateTime<Utc>,
    ) -> MnemoResult<Vec<Atom>> {
        let _guard = self.locks.acquire(&query.subject).await;
        let mut atoms: Vec<Atom> = self
            .live_at(query, now)?
            .into_iter()
            .map(|(atom, _)| atom)
            .collect();
        let boost = self.config.decay.reconsolidation_boost;

        let mut mutations = Vec::with_capacity(atoms.len());
        for atom in &mut atoms {
            let update = self.decay.reconsolidate(atom, boost, now);
            if update.is_empty() {
                continue;
            }
            update.apply_to(atom);
            mutations.push(AtomMutation::UpdateMetadata {
                id: atom.id.clone(),
                update,
            });
        }
        if !mutations.is_empty() {
            self.store.apply(&mutations, AuditActor::User)?;
        }
        Ok(atoms)
    }

    /// Live atoms matching `query`. Never mutates.
    pub fn peek(&self, query: &TripleQuery) -> MnemoResult<Vec<Atom>> {
        Ok(self
            .peek_with_stability(query, Utc::now())?
            .into_iter()
            .map(|(atom, _)| atom)
            .collect())
    }

    /// Live atoms matching `query` paired with their stability at `now`,
    /// strongest first. Never mutates.
    pub fn peek_with_stability(
        &self,
        query: &TripleQuery,
        now: DateTime<Utc>,
    ) -> MnemoResult<Vec<(Atom, f64)>> {
        let mut scored = self.live_at(query, now)?;
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(scored)
    }

    fn live_at(&self, query: &TripleQuery, now: DateTime<Utc>) -> MnemoResult<Vec<(Atom, f64)>> {
        let floor = query.min_stability.unwrap_or(0.0);
        Ok(self
            .store
            .find_by_triple(query)?
            .into_iter()
            .filter(Atom::is_live)
            .map(|atom| {
                let stability = self.decay.stability(&atom, now);
                (atom, stability)
            })
            .filter(|(_, stability)| *stability >= floor)
            .collect())
    }

    /// Decay report over `subject`'s atoms, or every atom when `None`.
    pub fn decay_report(&self, subject: Option<&str>) -> MnemoResult<DecayReport> {
        let atoms = match subject {
            Some(subject) => self.store.find_by_subject(subject, None)?,
            None => {
                let mut all = Vec::new();
                for subject in self.store.subjects()? {
                    all.extend(self.store.find_by_subject(&subject, None)?);
                }
                all
            }
        };
        Ok(self.decay.report(&atoms, Utc::now()))
    }

    // ── Batch decay ──────────────────────────────────────────────────────

    pub async fn process_decay(&self, user_id: &str) -> MnemoResult<DecaySummary> {
        self.process_decay_at(user_id, Utc::now()).await
    }

    /// Dissolve eligible unsubstantiated atoms and boost weak substantiated
    /// ones for one user, in one batch, under the user's lock.
    pub async fn process_decay_at(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> MnemoResult<DecaySummary> {
        let span = mnemo_observability::decay_span!(user_id);
        self.decay_locked(user_id, now).instrument(span).await
    }

    async fn decay_locked(&self, user_id: &str, now: DateTime<Utc>) -> MnemoResult<DecaySummary> {
        let _guard = self.locks.acquire(user_id).await;
        let started = Instant::now();
        let atoms = self.store.find_live_by_subject(user_id)?;
        let pass = self.decay.plan_pass(&atoms, now);
        if !pass.is_empty() {
            self.store.apply(&pass.mutations, AuditActor::Decay)?;
            log_mutations(&pass.mutations);
        }
        let summary = DecaySummary {
            user_id: user_id.to_string(),
            dissolved_count: pass.dissolved.len(),
            reconsolidated_count: pass.reconsolidated.len(),
            duration_ms: elapsed_ms(started),
        };
        events::decay_pass_completed(
            user_id,
            summary.dissolved_count,
            summary.reconsolidated_count,
            summary.duration_ms,
        );
        Ok(summary)
    }

    /// Run a pass only if the user has not had one inside the debounce window.
    pub async fn trigger_decay(&self, user_id: &str) -> MnemoResult<Option<DecaySummary>> {
        if !self.debouncer.should_fire(user_id) {
            tracing::debug!(event = "decay_debounced", user_id = %user_id, "decay pass skipped");
            return Ok(None);
        }
        self.process_decay(user_id).await.map(Some)
    }

    /// Pass over every subject in the store.
    pub async fn process_all_users(self: &Arc<Self>) -> MnemoResult<AggregateSummary> {
        self.sweep(&CancelFlag::new(), false).await
    }

    /// Pass over every subject, `max_parallel_users` at a time.
    ///
    /// `cancel` is checked before each user starts; users already running
    /// finish. With `debounced`, users inside the debounce window are skipped.
    pub async fn sweep(
        self: &Arc<Self>,
        cancel: &CancelFlag,
        debounced: bool,
    ) -> MnemoResult<AggregateSummary> {
        let users = self.store.subjects()?;
        let span = mnemo_observability::sweep_span!(users.len());
        self.sweep_users(users, cancel, debounced)
            .instrument(span)
            .await
    }

    async fn sweep_users(
        self: &Arc<Self>,
        users: Vec<String>,
        cancel: &CancelFlag,
        debounced: bool,
    ) -> MnemoResult<AggregateSummary> {
        let started = Instant::now();
        let permits = Arc::new(Semaphore::new(self.config.triggers.max_parallel_users.max(1)));
        let mut tasks = JoinSet::new();
        let mut summary = AggregateSummary::default();

        for user in users {
            // Wait for a slot first so a cancel raised meanwhile is seen.
            let permit = permits
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| MnemoError::TaskFailed(e.to_string()))?;
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }
            let engine = Arc::clone(self);
            tasks.spawn(async move {
                let _permit = permit;
                let result = if debounced {
                    engine.trigger_decay(&user).await
                } else {
                    engine.process_decay(&user).await.map(Some)
                };
                (user, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(Some(pass)))) => summary.absorb(&pass),
                Ok((_, Ok(None))) => {}
                Ok((user_id, Err(e))) => summary.failures.push(UserFailure {
                    user_id,
                    error: e.to_string(),
                }),
                Err(e) => summary.failures.push(UserFailure {
                    user_id: String::new(),
                    error: MnemoError::TaskFailed(e.to_string()).to_string(),
                }),
            }
        }
        summary.failures.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        summary.duration_ms = elapsed_ms(started);
        let pruned = self.locks.prune() + self.debouncer.prune();
        tracing::debug!(event = "sweep_pruned", pruned, "idle lock and debounce entries dropped");
        events::sweep_completed(
            summary.users_processed,
            summary.failures.len(),
            summary.cancelled,
            summary.duration_ms,
        );
        Ok(summary)
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn log_mutations(mutations: &[AtomMutation]) {
    for mutation in mutations {
        match mutation {
            AtomMutation::Insert(atom) if atom.is_live() => events::atom_admitted(
                &atom.id,
                &atom.subject,
                atom.atom_type.as_str(),
                atom.graph.as_str(),
            ),
            AtomMutation::Insert(atom) => {
                if let Some(winner) = &atom.superseded_by {
                    events::atom_superseded(&atom.id, winner);
                }
            }
            AtomMutation::MoveGraph {
                id,
                to: Graph::Historical,
                superseded_by: Some(winner),
            } => events::atom_superseded(id, winner),
            AtomMutation::Delete {
                id,
                reason: DeleteReason::LostConflict { winner },
            } => events::atom_discarded(id, winner),
            AtomMutation::Delete {
                id,
                reason: DeleteReason::Dissolved { stability },
            } => events::atom_dissolved(id, *stability),
            _ => {}
        }
    }
}
