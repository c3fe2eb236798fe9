//! Span definitions per operation: admission, detection, decay, sweep.

/// Create an admission span.
#[macro_export]
macro_rules! admission_span {
    ($subject:expr, $predicate:expr) => {
        tracing::info_span!("mnemo.admission", subject = %$subject, predicate = %$predicate)
    };
}

/// Create a detection span.
#[macro_export]
macro_rules! detection_span {
    ($subject:expr, $snapshot_size:expr) => {
        tracing::debug_span!("mnemo.detection", subject = %$subject, snapshot_size = $snapshot_size)
    };
}

/// Create a decay span.
#[macro_export]
macro_rules! decay_span {
    ($user_id:expr) => {
        tracing::info_span!("mnemo.decay", user_id = %$user_id)
    };
}

/// Create a sweep span.
#[macro_export]
macro_rules! sweep_span {
    ($user_count:expr) => {
        tracing::info_span!("mnemo.sweep", user_count = $user_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const ADMISSION: &str = "mnemo.admission";
    pub const DETECTION: &str = "mnemo.detection";
    pub const DECAY: &str = "mnemo.decay";
    pub const SWEEP: &str = "mnemo.sweep";
}
