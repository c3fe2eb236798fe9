//! Test fixture loader for Mnemo golden scenarios.
//!
//! Scenario files live under `golden/scenarios/` in this crate. Each one is
//! a sequence of atoms admitted in order, a final candidate, and what
//! detection and reconciliation must make of it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding `golden/`, fixed at compile time so every dependent
/// crate resolves the same files.
fn fixtures_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

/// Absolute path of `relative` under the fixture root.
pub fn fixture_path(relative: &str) -> PathBuf {
    fixtures_root().join(relative)
}

pub fn fixture_exists(relative: &str) -> bool {
    fixture_path(relative).is_file()
}

/// Read and deserialize a JSON fixture. Panics with the path on failure.
pub fn load_fixture<T: DeserializeOwned>(relative: &str) -> T {
    let path = fixture_path(relative);
    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("fixture {} unreadable: {e}", path.display()));
    serde_json::from_str(&raw)
        .unwrap_or_else(|e| panic!("fixture {} is not valid: {e}", path.display()))
}

pub fn load_fixture_value(relative: &str) -> serde_json::Value {
    load_fixture(relative)
}

/// `*.json` files directly under `subdir`, in name order. Empty when the
/// directory is missing.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(fixture_path(subdir)) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// A golden admission scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    /// Admitted in order before the candidate.
    pub existing: Vec<ScenarioStep>,
    pub candidate: ScenarioStep,
    pub expected: ScenarioExpectation,
}

/// One atom to admit. `atom` is a serialized `NewAtom`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioStep {
    /// Hours before the scenario clock at which the atom is admitted.
    #[serde(default)]
    pub age_hours: i64,
    pub atom: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioExpectation {
    /// Relationship of the top-ranked match, `None` when nothing matched.
    pub relationship: Option<String>,
    pub stage: Option<String>,
    /// `kind` tag of the reconciliation decision.
    pub decision: String,
    /// `predicate object` pairs live for the subject afterwards.
    pub live: Vec<(String, String)>,
    /// `predicate object` pairs in Historical afterwards.
    #[serde(default)]
    pub historical: Vec<(String, String)>,
}

/// Load a scenario by file stem from `golden/scenarios/`.
pub fn load_scenario(name: &str) -> Scenario {
    load_fixture(&format!("golden/scenarios/{name}.json"))
}

/// Every scenario under `golden/scenarios/`.
pub fn all_scenarios() -> Vec<Scenario> {
    list_fixtures("golden/scenarios")
        .iter()
        .filter_map(|path| path.strip_prefix(fixtures_root()).ok())
        .map(|relative| load_fixture(&relative.to_string_lossy()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_dir_is_under_root() {
        assert!(fixture_path("golden/scenarios").is_dir());
    }

    #[test]
    fn all_golden_scenario_files_exist() {
        let files = [
            "golden/scenarios/a_preference_reversal.json",
            "golden/scenarios/b_exclusive_employer.json",
            "golden/scenarios/c_context_gate.json",
            "golden/scenarios/d_vegetarian_steak.json",
        ];
        for f in files {
            assert!(fixture_exists(f), "missing fixture: {f}");
        }
    }

    #[test]
    fn list_is_sorted_and_json_only() {
        let files = list_fixtures("golden/scenarios");
        assert_eq!(files.len(), 4);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn missing_subdir_lists_nothing() {
        assert!(list_fixtures("golden/nope").is_empty());
    }
}
