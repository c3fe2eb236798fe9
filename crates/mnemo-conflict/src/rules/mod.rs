//! World-knowledge rules for the transitive stage.
//!
//! A rule looks at the candidate together with the facts around its subject
//! and reports every chain of atoms, candidate included, that cannot all be
//! true at once. Rules are plain data behind one trait, so a deployment can
//! add its own with [`WorldRuleSet::with_rule`].

pub mod allergy;
pub mod dietary;
pub mod hierarchy;
pub mod location;

use std::sync::Arc;

use mnemo_core::atom::normalize;
use mnemo_core::models::InferenceChain;
use mnemo_core::Atom;

pub use allergy::AllergenExposure;
pub use dietary::DietaryRestriction;
pub use hierarchy::ReportingCycle;
pub use location::LocationConsistency;

/// Atoms that fire a rule together, in the rule's pattern order.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFiring {
    pub rule: String,
    pub atoms: Vec<Atom>,
    pub explanation: String,
}

impl RuleFiring {
    pub fn chain(&self) -> InferenceChain {
        InferenceChain {
            rule: self.rule.clone(),
            atom_ids: self.atoms.iter().map(|a| a.id.clone()).collect(),
            explanation: self.explanation.clone(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.atoms.iter().any(|a| a.id == id)
    }
}

/// One world-knowledge rule.
pub trait WorldRule: Send + Sync {
    fn name(&self) -> &str;

    /// Chains containing `candidate`. `facts` are live atoms around the
    /// candidate's subject and never include the candidate itself.
    fn fire(&self, candidate: &Atom, facts: &[&Atom]) -> Vec<RuleFiring>;
}

/// Ordered rule collection. Evaluation order is insertion order.
#[derive(Clone)]
pub struct WorldRuleSet {
    rules: Vec<Arc<dyn WorldRule>>,
}

impl WorldRuleSet {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Dietary, allergy, workplace-location, and reporting-cycle rules.
    pub fn standard() -> Self {
        Self::empty()
            .with_rule(DietaryRestriction::vegetarian())
            .with_rule(DietaryRestriction::vegan())
            .with_rule(AllergenExposure::standard())
            .with_rule(LocationConsistency::standard())
            .with_rule(ReportingCycle::standard())
    }

    pub fn with_rule(mut self, rule: impl WorldRule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn evaluate(&self, candidate: &Atom, facts: &[&Atom]) -> Vec<RuleFiring> {
        self.rules
            .iter()
            .flat_map(|rule| rule.fire(candidate, facts))
            .collect()
    }
}

impl Default for WorldRuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for WorldRuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

pub(crate) fn same_entity(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

pub(crate) fn owned_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
