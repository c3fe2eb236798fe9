//! Structured log events for key system operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a candidate admitted into a live graph.
pub fn atom_admitted(atom_id: &str, subject: &str, atom_type: &str, graph: &str) {
    tracing::info!(
        event = "atom_admitted",
        atom_id = %atom_id,
        subject = %subject,
        atom_type = %atom_type,
        graph = %graph,
        "atom admitted"
    );
}

/// Log a candidate dropped because the fact is already known.
pub fn duplicate_rejected(subject: &str, existing_id: &str) {
    tracing::debug!(
        event = "duplicate_rejected",
        subject = %subject,
        existing_id = %existing_id,
        "duplicate candidate rejected"
    );
}

/// Log a substantiated atom retired to Historical.
pub fn atom_superseded(atom_id: &str, winner_id: &str) {
    tracing::info!(
        event = "atom_superseded",
        atom_id = %atom_id,
        winner_id = %winner_id,
        "atom superseded"
    );
}

/// Log an unsubstantiated conflict loser deleted.
pub fn atom_discarded(atom_id: &str, winner_id: &str) {
    tracing::info!(
        event = "atom_discarded",
        atom_id = %atom_id,
        winner_id = %winner_id,
        "conflict loser discarded"
    );
}

/// Log a decayed atom dissolved by a batch pass.
pub fn atom_dissolved(atom_id: &str, stability: f64) {
    tracing::info!(
        event = "atom_dissolved",
        atom_id = %atom_id,
        stability = stability,
        "atom dissolved"
    );
}

/// Log a conflict found during detection.
pub fn conflict_detected(candidate: &str, atom_ids: &[String], relationship: &str) {
    tracing::warn!(
        event = "conflict_detected",
        candidate = %candidate,
        atom_ids = ?atom_ids,
        relationship = %relationship,
        "conflict detected"
    );
}

/// Log a candidate sent to the admission authority.
pub fn review_requested(subject: &str, reasons: usize) {
    tracing::info!(
        event = "review_requested",
        subject = %subject,
        reasons = reasons,
        "candidate needs review"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a per-user batch decay pass.
pub fn decay_pass_completed(user_id: &str, dissolved: usize, reconsolidated: usize, duration_ms: u64) {
    tracing::info!(
        event = "decay_pass_completed",
        user_id = %user_id,
        dissolved = dissolved,
        reconsolidated = reconsolidated,
        duration_ms = duration_ms,
        "decay pass completed"
    );
}

/// Log a sweep over all users.
pub fn sweep_completed(users: usize, failures: usize, cancelled: bool, duration_ms: u64) {
    tracing::info!(
        event = "sweep_completed",
        users = users,
        failures = failures,
        cancelled = cancelled,
        duration_ms = duration_ms,
        "decay sweep completed"
    );
}
