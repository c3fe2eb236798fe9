use mnemo_core::atom::normalize;
use mnemo_core::Atom;

use super::{owned_strings, same_entity, RuleFiring, WorldRule};
use crate::specialization::mentions;

const MEAT: &[&str] = &[
    "meat", "beef", "pork", "chicken", "bacon", "steak", "lamb", "ham", "turkey", "sausage",
    "veal", "fish", "salmon", "tuna", "shrimp", "burger",
];

const ANIMAL_PRODUCTS: &[&str] = &[
    "cheese", "milk", "butter", "eggs", "egg", "honey", "yogurt", "cream", "dairy", "gelatin",
];

/// A diet that forbids consuming a set of foods.
#[derive(Debug, Clone)]
pub struct DietaryRestriction {
    name: String,
    /// (predicate, object) pairs that declare the diet.
    markers: Vec<(String, String)>,
    consumption: Vec<String>,
    forbidden: Vec<String>,
}

impl DietaryRestriction {
    pub fn new(
        name: impl Into<String>,
        markers: &[(&str, &str)],
        consumption: &[&str],
        forbidden: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            markers: markers
                .iter()
                .map(|(p, o)| (p.to_string(), normalize(o)))
                .collect(),
            consumption: owned_strings(consumption),
            forbidden: owned_strings(forbidden),
        }
    }

    pub fn vegetarian() -> Self {
        Self::new(
            "vegetarian_eats_meat",
            &[("is", "vegetarian"), ("is_vegetarian", "true"), ("is_vegetarian", "yes")],
            &["eats", "drinks"],
            MEAT,
        )
    }

    pub fn vegan() -> Self {
        let forbidden: Vec<&str> = MEAT.iter().chain(ANIMAL_PRODUCTS).copied().collect();
        Self::new(
            "vegan_eats_animal_product",
            &[("is", "vegan"), ("is_vegan", "true"), ("is_vegan", "yes")],
            &["eats", "drinks"],
            &forbidden,
        )
    }

    fn declares_diet(&self, atom: &Atom) -> bool {
        let object = atom.normalized_object();
        self.markers
            .iter()
            .any(|(p, o)| *p == atom.predicate && *o == object)
    }

    fn forbidden_food(&self, atom: &Atom) -> Option<&str> {
        if !self.consumption.contains(&atom.predicate) {
            return None;
        }
        self.forbidden
            .iter()
            .find(|food| mentions(&atom.object, food))
            .map(String::as_str)
    }

    fn firing(&self, diet: &Atom, meal: &Atom, food: &str) -> RuleFiring {
        RuleFiring {
            rule: self.name.clone(),
            atoms: vec![diet.clone(), meal.clone()],
            explanation: format!(
                "{} {} {} but {} {} ({food})",
                diet.subject, diet.predicate, diet.object, meal.predicate, meal.object
            ),
        }
    }
}

impl WorldRule for DietaryRestriction {
    fn name(&self) -> &str {
        &self.name
    }

    fn fire(&self, candidate: &Atom, facts: &[&Atom]) -> Vec<RuleFiring> {
        let same_subject = |a: &&&Atom| same_entity(&a.subject, &candidate.subject);
        if self.declares_diet(candidate) {
            facts
                .iter()
                .filter(same_subject)
                .filter_map(|meal| {
                    self.forbidden_food(meal)
                        .map(|food| self.firing(candidate, meal, food))
                })
                .collect()
        } else if let Some(food) = self.forbidden_food(candidate) {
            facts
                .iter()
                .filter(same_subject)
                .filter(|diet| self.declares_diet(diet))
                .map(|diet| self.firing(diet, candidate, food))
                .collect()
        } else {
            Vec::new()
        }
    }
}
