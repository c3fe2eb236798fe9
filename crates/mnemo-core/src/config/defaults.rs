// Single source of truth for all default values.

// --- Detection ---
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.9;
pub const DEFAULT_CONFLICT_THRESHOLD: f64 = 0.3;
pub const DEFAULT_OPPOSITE_MATCH_THRESHOLD: f64 = 0.7;
pub const DEFAULT_ORACLE_TIMEOUT_MS: u64 = 500;
pub const DEFAULT_SIMILARITY_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_SIMILARITY_CACHE_TTI_SECS: u64 = 3600;
pub const DEFAULT_SNAPSHOT_HOPS: usize = 2;

// --- Reconciliation ---
pub const DEFAULT_AUTO_SUBSTANTIATE_CONFIDENCE: f64 = 0.9;
pub const DEFAULT_STABILITY_TIE_EPSILON: f64 = 1e-6;
pub const DEFAULT_REVIEW_CONFIDENCE_FLOOR: f64 = 0.5;
pub const DEFAULT_EPISTEMIC_DISCOUNT: f64 = 0.5;

// --- Decay ---
pub const DEFAULT_DISSOLUTION_THRESHOLD: f64 = 0.1;
pub const DEFAULT_RECONSOLIDATION_BOOST: f64 = 1.5;
pub const DEFAULT_AUTOMATIC_BOOST: f64 = 1.2;
pub const DEFAULT_WEAK_MEMORY_THRESHOLD: f64 = 0.5;
pub const DEFAULT_AT_RISK_THRESHOLD: f64 = 0.3;
pub const DEFAULT_STRENGTH_SCALE_HOURS: f64 = 100.0;
pub const DEFAULT_SCHEDULE_THRESHOLDS: [f64; 3] = [0.9, 0.5, 0.1];

// --- Triggers ---
pub const DEFAULT_IDLE_MINUTES: u64 = 5;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 21_600; // 6 hours
pub const DEFAULT_DEBOUNCE_SECS: u64 = 60;
pub const DEFAULT_MAX_PARALLEL_USERS: usize = 4;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "mnemo.db";
pub const DEFAULT_WAL_MODE: bool = true;
pub const DEFAULT_CACHE_SIZE: i64 = -64_000; // 64 MB (negative = KB)
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
pub const DEFAULT_ALERT_BURST_COUNT: usize = 3;
pub const DEFAULT_ALERT_BURST_WINDOW_SECS: u64 = 3_600;
pub const DEFAULT_ALERT_CRITICAL_AFTER_HOURS: u64 = 24;
