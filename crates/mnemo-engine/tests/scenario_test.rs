//! Golden admission scenarios replayed through the full engine.

use chrono::{Duration, Utc};

use mnemo_core::{Graph, MnemoConfig, NewAtom};
use mnemo_engine::MemoryEngine;
use test_fixtures::{all_scenarios, Scenario};

fn pairs(atoms: Vec<mnemo_core::Atom>) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = atoms
        .into_iter()
        .map(|a| (a.predicate, a.object))
        .collect();
    out.sort();
    out
}

fn tag<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value).unwrap() {
        serde_json::Value::String(s) => s,
        other => other["kind"].as_str().unwrap().to_string(),
    }
}

async fn replay(scenario: &Scenario) {
    let engine = MemoryEngine::in_memory(MnemoConfig::default());
    let base = Utc::now();

    for step in &scenario.existing {
        let atom: NewAtom = serde_json::from_value(step.atom.clone()).unwrap();
        engine
            .admit_at(atom, base - Duration::hours(step.age_hours))
            .await
            .unwrap_or_else(|e| panic!("{}: setup admission failed: {e}", scenario.name));
    }

    let candidate: NewAtom = serde_json::from_value(scenario.candidate.atom.clone()).unwrap();
    let outcome = engine
        .admit_at(candidate, base - Duration::hours(scenario.candidate.age_hours))
        .await
        .unwrap();

    let expected = &scenario.expected;
    let top = outcome.report.top();
    assert_eq!(
        top.map(|m| tag(&m.relationship)),
        expected.relationship,
        "{}: relationship",
        scenario.name
    );
    assert_eq!(
        top.map(|m| tag(&m.stage)),
        expected.stage,
        "{}: stage",
        scenario.name
    );
    assert_eq!(tag(outcome.decision()), expected.decision, "{}: decision", scenario.name);
    assert!(!outcome.is_degraded(), "{}: degraded", scenario.name);

    let store = engine.store();
    let mut live = expected.live.clone();
    live.sort();
    assert_eq!(
        pairs(store.find_live_by_subject("u1").unwrap()),
        live,
        "{}: live atoms",
        scenario.name
    );
    let mut historical = expected.historical.clone();
    historical.sort();
    assert_eq!(
        pairs(store.find_by_subject("u1", Some(Graph::Historical)).unwrap()),
        historical,
        "{}: historical atoms",
        scenario.name
    );
}

#[tokio::test]
async fn golden_scenarios() {
    let scenarios = all_scenarios();
    assert_eq!(scenarios.len(), 4);
    for scenario in &scenarios {
        replay(scenario).await;
    }
}

#[tokio::test]
async fn superseded_atom_points_at_its_replacement() {
    let scenario = test_fixtures::load_scenario("b_exclusive_employer");
    let engine = MemoryEngine::in_memory(MnemoConfig::default());
    let base = Utc::now();
    let old: NewAtom = serde_json::from_value(scenario.existing[0].atom.clone()).unwrap();
    engine.admit_at(old, base - Duration::hours(72)).await.unwrap();
    let new: NewAtom = serde_json::from_value(scenario.candidate.atom.clone()).unwrap();
    engine.admit_at(new, base).await.unwrap();

    let google = engine.store().get("b-google").unwrap().unwrap();
    assert_eq!(google.graph, Graph::Historical);
    assert_eq!(google.superseded_by.as_deref(), Some("b-anthropic"));
    let anthropic = engine.store().get("b-anthropic").unwrap().unwrap();
    assert_eq!(anthropic.graph, Graph::Substantiated);
}
