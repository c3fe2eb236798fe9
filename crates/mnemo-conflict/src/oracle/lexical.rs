//! Dependency-free similarity used when no embedding oracle is deployed.

use std::collections::BTreeSet;

use mnemo_core::atom::normalize;
use mnemo_core::errors::MnemoResult;
use mnemo_core::traits::ISimilarityOracle;

use crate::specialization::tokens;

/// Token Jaccard blended evenly with character-bigram Dice.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalSimilarity;

impl LexicalSimilarity {
    pub fn score(a: &str, b: &str) -> f64 {
        let (na, nb) = (normalize(a), normalize(b));
        if na == nb {
            return 1.0;
        }
        if na.is_empty() || nb.is_empty() {
            return 0.0;
        }
        0.5 * jaccard(&tokens(&na), &tokens(&nb)) + 0.5 * dice(&bigrams(&na), &bigrams(&nb))
    }
}

impl ISimilarityOracle for LexicalSimilarity {
    fn similarity(&self, a: &str, b: &str) -> MnemoResult<f64> {
        Ok(Self::score(a, b))
    }

    fn name(&self) -> &str {
        "lexical"
    }
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

fn bigrams(s: &str) -> Vec<(char, char)> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    let mut grams: Vec<(char, char)> = chars.windows(2).map(|w| (w[0], w[1])).collect();
    grams.sort_unstable();
    grams
}

/// Dice coefficient over bigram multisets. Inputs must be sorted.
fn dice(a: &[(char, char)], b: &[(char, char)]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let (mut i, mut j, mut shared) = (0, 0, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
        }
    }
    2.0 * shared as f64 / (a.len() + b.len()) as f64
}
