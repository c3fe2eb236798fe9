//! Forgetting curve.
//!
//! ```text
//! stability = exp(-Δt / S)
//! S = decay_rate × confidence × strength_scale_hours
//! ```
//!
//! Δt is hours since `last_accessed`. A zero decay rate means the atom never
//! fades; a zero strength means it is already gone.

/// Strength `S` in hours, or `None` for types that never decay.
pub fn strength_hours(decay_rate: f64, confidence: f64, scale_hours: f64) -> Option<f64> {
    if decay_rate <= 0.0 {
        return None;
    }
    Some((decay_rate * confidence * scale_hours).max(0.0))
}

/// Retrieval strength after `hours_elapsed`, clamped to [0.0, 1.0].
pub fn stability(decay_rate: f64, confidence: f64, scale_hours: f64, hours_elapsed: f64) -> f64 {
    let Some(strength) = strength_hours(decay_rate, confidence, scale_hours) else {
        return 1.0;
    };
    if strength == 0.0 {
        return 0.0;
    }
    (-hours_elapsed.max(0.0) / strength).exp().clamp(0.0, 1.0)
}

/// Hours after last access at which stability reaches `threshold`.
/// Inverts the curve: `t = -S · ln(threshold)`.
pub fn hours_to_threshold(strength: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return f64::INFINITY;
    }
    if threshold >= 1.0 {
        return 0.0;
    }
    -strength * threshold.ln()
}
