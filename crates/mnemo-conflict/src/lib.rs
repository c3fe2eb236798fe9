//! # mnemo-conflict
//!
//! Classifies a candidate atom against a snapshot of what is already known
//! about its subject. Stages run in a fixed order per pair and the first
//! decisive stage wins:
//!
//! | Stage | Check | Needs oracle |
//! |---|---|---|
//! | S0 | identical normalized triple | no |
//! | S1 | contextual type, disjoint contexts | no |
//! | S2 | opposite predicate, same object | no |
//! | S3 | exclusive predicate, different object | no |
//! | S4 | object specialization, predicate progression | no |
//! | S5 | object similarity | yes |
//! | S6 | world-knowledge rules over several atoms | yes |
//!
//! Without a working oracle S5 and S6 are skipped and the report says so.

pub mod detector;
pub mod oracle;
pub mod rules;
pub mod snapshot;
pub mod specialization;
pub mod stages;

pub use detector::ConflictDetector;
pub use oracle::{LexicalSimilarity, OracleGate};
pub use rules::{RuleFiring, WorldRule, WorldRuleSet};
pub use snapshot::SubjectSnapshot;
