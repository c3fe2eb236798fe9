//! S5: similarity verdicts for pairs the rule stages left open.

use mnemo_core::config::DetectionConfig;
use mnemo_core::models::{DetectionStage, Relationship};

use super::{OracleQuestion, Verdict};

pub fn decide(question: OracleQuestion, similarity: f64, config: &DetectionConfig) -> Verdict {
    let (relationship, detail) = match question {
        OracleQuestion::SamePredicate { .. } if similarity >= config.duplicate_threshold => (
            Relationship::Duplicate,
            format!("paraphrase (similarity {similarity:.3})"),
        ),
        OracleQuestion::SamePredicate { exclusive: true }
            if similarity < config.conflict_threshold =>
        {
            (
                Relationship::SemanticConflict,
                format!("unrelated objects on an exclusive predicate (similarity {similarity:.3})"),
            )
        }
        OracleQuestion::OppositePredicate if similarity >= config.opposite_match_threshold => (
            Relationship::SemanticConflict,
            format!("opposite predicates on paraphrased objects (similarity {similarity:.3})"),
        ),
        _ => (
            Relationship::NoConflict,
            format!("similarity {similarity:.3} is not decisive"),
        ),
    };
    Verdict::new(relationship, DetectionStage::Semantic, detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_partition_same_predicate() {
        let config = DetectionConfig::default();
        let q = OracleQuestion::SamePredicate { exclusive: true };
        assert_eq!(decide(q, 0.95, &config).relationship, Relationship::Duplicate);
        assert_eq!(decide(q, 0.5, &config).relationship, Relationship::NoConflict);
        assert_eq!(decide(q, 0.1, &config).relationship, Relationship::SemanticConflict);

        let open = OracleQuestion::SamePredicate { exclusive: false };
        assert_eq!(decide(open, 0.1, &config).relationship, Relationship::NoConflict);
    }

    #[test]
    fn opposite_predicates_need_matching_objects() {
        let config = DetectionConfig::default();
        let q = OracleQuestion::OppositePredicate;
        assert_eq!(decide(q, 0.8, &config).relationship, Relationship::SemanticConflict);
        assert_eq!(decide(q, 0.4, &config).relationship, Relationship::NoConflict);
    }
}
