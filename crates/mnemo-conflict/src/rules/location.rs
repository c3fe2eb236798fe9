use mnemo_core::Atom;

use super::{owned_strings, same_entity, RuleFiring, WorldRule};

/// works_at(S, Org) ∧ located_in(Org, City) ∧ lives_in(S, City′) with City ≠ City′.
#[derive(Debug, Clone)]
pub struct LocationConsistency {
    name: String,
    employment: Vec<String>,
    site: String,
    residence: String,
}

impl LocationConsistency {
    pub fn standard() -> Self {
        Self::new(
            "workplace_location",
            &["works_at", "works_for", "employed_by"],
            "located_in",
            "lives_in",
        )
    }

    pub fn new(name: impl Into<String>, employment: &[&str], site: &str, residence: &str) -> Self {
        Self {
            name: name.into(),
            employment: owned_strings(employment),
            site: site.to_string(),
            residence: residence.to_string(),
        }
    }

    fn is_employment(&self, atom: &Atom) -> bool {
        self.employment.contains(&atom.predicate)
    }

    fn firing(&self, employment: &Atom, site: &Atom, residence: &Atom) -> Option<RuleFiring> {
        let consistent = same_entity(&employment.object, &site.subject)
            && same_entity(&employment.subject, &residence.subject);
        if !consistent || same_entity(&site.object, &residence.object) {
            return None;
        }
        Some(RuleFiring {
            rule: self.name.clone(),
            atoms: vec![employment.clone(), site.clone(), residence.clone()],
            explanation: format!(
                "{} works at {} in {} but lives in {}",
                employment.subject, employment.object, site.object, residence.object
            ),
        })
    }
}

impl WorldRule for LocationConsistency {
    fn name(&self) -> &str {
        &self.name
    }

    fn fire(&self, candidate: &Atom, facts: &[&Atom]) -> Vec<RuleFiring> {
        let employments: Vec<&Atom> = facts
            .iter()
            .copied()
            .filter(|a| self.is_employment(a))
            .collect();
        let sites: Vec<&Atom> = facts
            .iter()
            .copied()
            .filter(|a| a.predicate == self.site)
            .collect();
        let residences: Vec<&Atom> = facts
            .iter()
            .copied()
            .filter(|a| a.predicate == self.residence)
            .collect();

        let mut firings = Vec::new();
        if self.is_employment(candidate) {
            for site in &sites {
                for residence in &residences {
                    firings.extend(self.firing(candidate, site, residence));
                }
            }
        } else if candidate.predicate == self.site {
            for employment in &employments {
                for residence in &residences {
                    firings.extend(self.firing(employment, candidate, residence));
                }
            }
        } else if candidate.predicate == self.residence {
            for employment in &employments {
                for site in &sites {
                    firings.extend(self.firing(employment, site, candidate));
                }
            }
        }
        firings
    }
}
