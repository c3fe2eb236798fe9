use std::collections::{BTreeMap, BTreeSet};

/// Bidirectional many-to-many opposite-predicate lookup.
#[derive(Debug, Clone, Default)]
pub struct OppositeIndex {
    map: BTreeMap<String, BTreeSet<String>>,
}

impl OppositeIndex {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut index = Self::default();
        for (a, b) in pairs {
            index.insert(a, b);
        }
        index
    }

    pub fn insert(&mut self, a: &str, b: &str) {
        self.map
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.map
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    /// All opposites of `predicate`, in sorted order.
    pub fn opposites(&self, predicate: &str) -> impl Iterator<Item = &str> {
        self.map
            .get(predicate)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn are_opposites(&self, a: &str, b: &str) -> bool {
        self.map.get(a).is_some_and(|set| set.contains(b))
    }
}
