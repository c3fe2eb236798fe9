use chrono::Utc;
use mnemo_conflict::rules::{AllergenExposure, DietaryRestriction, LocationConsistency, ReportingCycle};
use mnemo_conflict::{RuleFiring, SubjectSnapshot, WorldRule, WorldRuleSet};
use mnemo_core::traits::IAtomStore;
use mnemo_core::{Atom, AtomType, Graph, NewAtom, Ontology};
use mnemo_storage::InMemoryAtomStore;

fn atom(subject: &str, predicate: &str, object: &str, t: AtomType) -> Atom {
    Atom::admit(
        NewAtom::new(subject, predicate, object, t),
        &Ontology::standard(),
        Graph::Unsubstantiated,
        Utc::now(),
    )
    .unwrap()
}

fn ids(firing: &RuleFiring) -> Vec<&str> {
    firing.atoms.iter().map(|a| a.id.as_str()).collect()
}

#[test]
fn vegetarian_fires_from_either_side() {
    let rule = DietaryRestriction::vegetarian();
    let diet = atom("u1", "is_vegetarian", "yes", AtomType::Entity);
    let meal = atom("u1", "eats", "bacon sandwich", AtomType::Preference);

    let from_meal = rule.fire(&meal, &[&diet]);
    assert_eq!(from_meal.len(), 1);
    assert_eq!(ids(&from_meal[0]), vec![diet.id.as_str(), meal.id.as_str()]);

    let from_diet = rule.fire(&diet, &[&meal]);
    assert_eq!(from_diet.len(), 1);
    assert_eq!(from_diet[0].chain().atom_ids, vec![diet.id.clone(), meal.id.clone()]);
}

#[test]
fn vegetarian_allows_dairy_but_vegan_does_not() {
    let cheese = atom("u1", "eats", "cheese", AtomType::Preference);
    let vegetarian = atom("u1", "is", "vegetarian", AtomType::Entity);
    let vegan = atom("u1", "is", "vegan", AtomType::Entity);

    assert!(DietaryRestriction::vegetarian().fire(&cheese, &[&vegetarian]).is_empty());
    assert_eq!(DietaryRestriction::vegan().fire(&cheese, &[&vegan]).len(), 1);
}

#[test]
fn diet_of_another_subject_is_ignored() {
    let diet = atom("u2", "is", "vegetarian", AtomType::Entity);
    let meal = atom("u1", "eats", "steak", AtomType::Preference);
    assert!(DietaryRestriction::vegetarian().fire(&meal, &[&diet]).is_empty());
}

#[test]
fn allergen_matches_direct_mention_and_class() {
    let rule = AllergenExposure::standard();
    let allergy = atom("u1", "allergic_to", "shellfish", AtomType::Entity);
    let shrimp = atom("u1", "eats", "garlic shrimp", AtomType::Preference);
    let salad = atom("u1", "eats", "green salad", AtomType::Preference);

    let firings = rule.fire(&allergy, &[&shrimp, &salad]);
    assert_eq!(firings.len(), 1);
    assert!(firings[0].contains(&shrimp.id));

    let peanut = atom("u1", "allergic_to", "peanuts", AtomType::Entity);
    let butter = atom("u1", "eats", "peanut butter", AtomType::Preference);
    assert_eq!(rule.fire(&butter, &[&peanut]).len(), 1);
}

#[test]
fn custom_allergen_class_extends_the_rule() {
    let rule = AllergenExposure::new("nightshade", "allergic_to", &["eats"])
        .with_class("nightshades", &["tomato", "eggplant"]);
    let allergy = atom("u1", "allergic_to", "nightshades", AtomType::Entity);
    let meal = atom("u1", "eats", "tomato soup", AtomType::Preference);
    assert_eq!(rule.fire(&meal, &[&allergy]).len(), 1);
}

#[test]
fn location_chain_spans_subjects() {
    let rule = LocationConsistency::standard();
    let job = atom("u1", "works_for", "Initech", AtomType::Affiliation);
    let office = atom("initech", "located_in", "Austin", AtomType::Entity);
    let home = atom("u1", "lives_in", "Boston", AtomType::Affiliation);

    for candidate in [&job, &office, &home] {
        let facts: Vec<&Atom> = [&job, &office, &home]
            .into_iter()
            .filter(|a| a.id != candidate.id)
            .collect();
        let firings = rule.fire(candidate, &facts);
        assert_eq!(firings.len(), 1, "fires when {} arrives", candidate.predicate);
        assert_eq!(
            ids(&firings[0]),
            vec![job.id.as_str(), office.id.as_str(), home.id.as_str()]
        );
    }
}

#[test]
fn location_is_quiet_without_the_middle_hop() {
    let rule = LocationConsistency::standard();
    let job = atom("u1", "works_at", "Initech", AtomType::Affiliation);
    let home = atom("u1", "lives_in", "Boston", AtomType::Affiliation);
    assert!(rule.fire(&home, &[&job]).is_empty());
}

#[test]
fn management_edges_close_reporting_loops() {
    let rule = ReportingCycle::standard();
    let reports = atom("u1", "reports_to", "bob", AtomType::Social);
    let bob_manages_carol = atom("bob", "manages", "carol", AtomType::Social);
    let candidate = atom("carol", "manages", "u1", AtomType::Social);

    // u1 -> bob and carol -> bob; the candidate adds u1 -> carol.
    assert!(rule.fire(&candidate, &[&reports, &bob_manages_carol]).is_empty());

    let closing = atom("bob", "reports_to", "u1", AtomType::Social);
    let firings = rule.fire(&closing, &[&reports, &bob_manages_carol]);
    assert_eq!(firings.len(), 1);
    assert_eq!(ids(&firings[0]), vec![closing.id.as_str(), reports.id.as_str()]);
}

#[test]
fn self_reporting_is_not_a_cycle() {
    let rule = ReportingCycle::standard();
    let odd = atom("u1", "reports_to", "u1", AtomType::Social);
    assert!(rule.fire(&odd, &[]).is_empty());
}

struct NoPetsAllowed;

impl WorldRule for NoPetsAllowed {
    fn name(&self) -> &str {
        "no_pets"
    }

    fn fire(&self, candidate: &Atom, facts: &[&Atom]) -> Vec<RuleFiring> {
        if candidate.predicate != "has" || candidate.object != "dog" {
            return Vec::new();
        }
        facts
            .iter()
            .filter(|f| f.predicate == "lives_in" && f.object == "pet-free building")
            .map(|f| RuleFiring {
                rule: self.name().to_string(),
                atoms: vec![(*f).clone(), candidate.clone()],
                explanation: "pets are not allowed".into(),
            })
            .collect()
    }
}

#[test]
fn rule_sets_accept_custom_rules() {
    let set = WorldRuleSet::standard().with_rule(NoPetsAllowed);
    assert_eq!(set.len(), 6);
    assert_eq!(set.names().last(), Some(&"no_pets"));

    let flat = atom("u1", "lives_in", "pet-free building", AtomType::Affiliation);
    let dog = atom("u1", "has", "dog", AtomType::Entity);
    let firings = set.evaluate(&dog, &[&flat]);
    assert_eq!(firings.len(), 1);
    assert_eq!(firings[0].rule, "no_pets");
}

#[test]
fn snapshot_follows_objects_to_related_subjects() {
    let store = InMemoryAtomStore::new();
    let job = atom("u1", "works_at", "Acme", AtomType::Affiliation);
    let office = atom("Acme", "located_in", "Paris", AtomType::Entity);
    let city = atom("Paris", "located_in", "France", AtomType::Entity);
    let other = atom("u2", "likes", "tea", AtomType::Preference);
    for a in [&job, &office, &city, &other] {
        store.insert(a).unwrap();
    }
    let candidate = atom("u1", "lives_in", "Berlin", AtomType::Affiliation);

    let one_hop = SubjectSnapshot::load(&store, &candidate, 1).unwrap();
    assert_eq!(one_hop.atoms.len(), 1);
    assert_eq!(one_hop.related.len(), 1);
    assert_eq!(one_hop.related[0].id, office.id);

    let two_hops = SubjectSnapshot::load(&store, &candidate, 2).unwrap();
    assert_eq!(two_hops.len(), 3);
    assert!(two_hops.all().all(|a| a.id != other.id));
}

#[test]
fn snapshot_skips_historical_atoms() {
    let store = InMemoryAtomStore::new();
    let old = atom("u1", "works_at", "Globex", AtomType::Affiliation);
    let new = atom("u1", "works_at", "Acme", AtomType::Affiliation);
    store.insert(&old).unwrap();
    store.insert(&new).unwrap();
    store
        .move_graph(&old.id, Graph::Substantiated, None)
        .unwrap();
    store
        .move_graph(&old.id, Graph::Historical, Some(&new.id))
        .unwrap();

    let candidate = atom("u1", "lives_in", "Berlin", AtomType::Affiliation);
    let snap = SubjectSnapshot::load(&store, &candidate, 0).unwrap();
    assert_eq!(snap.atoms.len(), 1);
    assert_eq!(snap.atoms[0].id, new.id);
}
