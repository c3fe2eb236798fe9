//! Token-level specialization between object strings.

use std::collections::BTreeSet;

use mnemo_core::atom::normalize;

/// Lowercased word tokens with surrounding punctuation removed.
pub fn tokens(s: &str) -> BTreeSet<String> {
    normalize(s)
        .split(' ')
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// `specific` names everything `general` does plus something more:
/// "python 3.12" specializes "Python", "senior software engineer"
/// specializes "software engineer".
pub fn is_specialization(specific: &str, general: &str) -> bool {
    let general = tokens(general);
    let specific = tokens(specific);
    !general.is_empty() && general.len() < specific.len() && general.is_subset(&specific)
}

/// Whether either object specializes the other.
pub fn either_specializes(a: &str, b: &str) -> bool {
    is_specialization(a, b) || is_specialization(b, a)
}

/// Whether `object` names `term` or contains it as a word.
pub fn mentions(object: &str, term: &str) -> bool {
    let term = tokens(term);
    !term.is_empty() && term.is_subset(&tokens(object))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_added_qualifier() {
        assert!(is_specialization("Python 3.12", "python"));
        assert!(is_specialization("senior software engineer", "Software Engineer"));
        assert!(!is_specialization("python", "Python 3.12"));
    }

    #[test]
    fn equal_or_disjoint_is_not_specialization() {
        assert!(!is_specialization("Python", "python"));
        assert!(!is_specialization("Rust", "Go"));
        assert!(!either_specializes("Google", "Anthropic"));
    }

    #[test]
    fn punctuation_is_ignored() {
        assert!(is_specialization("dark (roast) coffee", "coffee!"));
        assert!(mentions("beef burger", "Beef"));
        assert!(!mentions("beefsteak tomato", "beef"));
    }
}
