/// Mnemo crate version, stamped into audit details.
pub const MNEMO_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on atoms chained together by a single world-knowledge rule.
pub const MAX_RULE_HOPS: usize = 3;

/// Confidence given to candidates whose extractor supplied none.
pub const PROVISIONAL_CONFIDENCE: f64 = 0.5;

/// Separator used when hashing a normalized triple.
pub const TRIPLE_HASH_SEPARATOR: &[u8] = b"\x1f";
