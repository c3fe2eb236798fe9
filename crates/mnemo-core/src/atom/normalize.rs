use crate::constants::TRIPLE_HASH_SEPARATOR;

/// Lowercase, trim, and collapse internal whitespace.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// blake3 hex digest of the normalized (subject, predicate, object) triple.
/// Two atoms with the same hash are the same fact.
pub fn triple_hash(subject: &str, predicate: &str, object: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(normalize(subject).as_bytes());
    hasher.update(TRIPLE_HASH_SEPARATOR);
    hasher.update(normalize(predicate).as_bytes());
    hasher.update(TRIPLE_HASH_SEPARATOR);
    hasher.update(normalize(object).as_bytes());
    hasher.finalize().to_hex().to_string()
}
