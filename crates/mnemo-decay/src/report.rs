use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mnemo_core::{AtomType, Graph};
use serde::{Deserialize, Serialize};

use crate::batch::AtomStability;

/// Number of equal-width stability buckets in a report.
pub const HISTOGRAM_BUCKETS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Aggregate decay health over a set of atoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayReport {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub by_graph: BTreeMap<Graph, usize>,
    pub by_type: BTreeMap<AtomType, usize>,
    pub histogram: Vec<HistogramBucket>,
    pub mean_stability: f64,
    /// Live atoms below the at-risk threshold.
    pub at_risk: usize,
    /// Substantiated atoms below the weak-memory threshold.
    pub weak: usize,
    /// Unsubstantiated atoms a batch pass would dissolve now.
    pub dissolvable: usize,
}

pub(crate) struct Thresholds {
    pub at_risk: f64,
    pub weak: f64,
    pub dissolution: f64,
}

pub(crate) fn build(
    stabilities: &[AtomStability],
    thresholds: &Thresholds,
    now: DateTime<Utc>,
) -> DecayReport {
    let mut by_graph: BTreeMap<Graph, usize> = Graph::ALL.iter().map(|g| (*g, 0)).collect();
    let mut by_type = BTreeMap::new();
    let width = 1.0 / HISTOGRAM_BUCKETS as f64;
    let mut histogram: Vec<HistogramBucket> = (0..HISTOGRAM_BUCKETS)
        .map(|i| HistogramBucket {
            lower: i as f64 * width,
            upper: (i + 1) as f64 * width,
            count: 0,
        })
        .collect();
    let (mut at_risk, mut weak, mut dissolvable) = (0, 0, 0);
    let mut sum = 0.0;

    for s in stabilities {
        *by_graph.entry(s.graph).or_default() += 1;
        *by_type.entry(s.atom_type).or_default() += 1;
        let bucket = ((s.stability / width) as usize).min(HISTOGRAM_BUCKETS - 1);
        histogram[bucket].count += 1;
        sum += s.stability;

        if s.graph.is_live() && s.stability < thresholds.at_risk {
            at_risk += 1;
        }
        match s.graph {
            Graph::Substantiated if s.stability < thresholds.weak => weak += 1,
            Graph::Unsubstantiated if s.stability < thresholds.dissolution => dissolvable += 1,
            _ => {}
        }
    }

    DecayReport {
        generated_at: now,
        total: stabilities.len(),
        by_graph,
        by_type,
        histogram,
        mean_stability: if stabilities.is_empty() {
            0.0
        } else {
            sum / stabilities.len() as f64
        },
        at_risk,
        weak,
        dissolvable,
    }
}
