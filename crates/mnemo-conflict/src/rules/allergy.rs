use std::collections::BTreeMap;

use mnemo_core::atom::normalize;
use mnemo_core::Atom;

use super::{owned_strings, same_entity, RuleFiring, WorldRule};
use crate::specialization::mentions;

/// `allergic_to X` together with consuming X, or a member of class X.
#[derive(Debug, Clone)]
pub struct AllergenExposure {
    name: String,
    allergy_predicate: String,
    consumption: Vec<String>,
    /// Allergen class to foods that contain it.
    classes: BTreeMap<String, Vec<String>>,
}

impl AllergenExposure {
    pub fn standard() -> Self {
        Self::new("allergen_exposure", "allergic_to", &["eats", "drinks"])
            .with_class("dairy", &["milk", "cheese", "butter", "yogurt", "cream", "ice cream"])
            .with_class("nuts", &["peanut", "peanuts", "almonds", "walnuts", "cashews", "pecans"])
            .with_class("peanuts", &["peanut butter", "satay"])
            .with_class("shellfish", &["shrimp", "crab", "lobster", "prawns", "oysters"])
            .with_class("gluten", &["bread", "pasta", "wheat", "barley", "pizza"])
            .with_class("eggs", &["omelette", "mayonnaise", "meringue"])
    }

    pub fn new(name: impl Into<String>, allergy_predicate: &str, consumption: &[&str]) -> Self {
        Self {
            name: name.into(),
            allergy_predicate: allergy_predicate.to_string(),
            consumption: owned_strings(consumption),
            classes: BTreeMap::new(),
        }
    }

    pub fn with_class(mut self, allergen: &str, members: &[&str]) -> Self {
        self.classes
            .entry(normalize(allergen))
            .or_default()
            .extend(owned_strings(members));
        self
    }

    fn exposes(&self, allergen: &str, food: &str) -> bool {
        mentions(food, allergen)
            || self
                .classes
                .get(&normalize(allergen))
                .is_some_and(|members| members.iter().any(|m| mentions(food, m)))
    }

    fn firing(&self, allergy: &Atom, meal: &Atom) -> RuleFiring {
        RuleFiring {
            rule: self.name.clone(),
            atoms: vec![allergy.clone(), meal.clone()],
            explanation: format!(
                "{} is allergic to {} but {} {}",
                allergy.subject, allergy.object, meal.predicate, meal.object
            ),
        }
    }
}

impl WorldRule for AllergenExposure {
    fn name(&self) -> &str {
        &self.name
    }

    fn fire(&self, candidate: &Atom, facts: &[&Atom]) -> Vec<RuleFiring> {
        let same_subject = |a: &&&Atom| same_entity(&a.subject, &candidate.subject);
        if candidate.predicate == self.allergy_predicate {
            facts
                .iter()
                .filter(same_subject)
                .filter(|meal| self.consumption.contains(&meal.predicate))
                .filter(|meal| self.exposes(&candidate.object, &meal.object))
                .map(|meal| self.firing(candidate, meal))
                .collect()
        } else if self.consumption.contains(&candidate.predicate) {
            facts
                .iter()
                .filter(same_subject)
                .filter(|allergy| allergy.predicate == self.allergy_predicate)
                .filter(|allergy| self.exposes(&allergy.object, &candidate.object))
                .map(|allergy| self.firing(allergy, candidate))
                .collect()
        } else {
            Vec::new()
        }
    }
}
