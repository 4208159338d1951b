//! Bias and sentiment breakdowns for the insights view.

use super::metrics::{mean, percentage};
use crate::models::{round_to, CoreValue, NominationRecord, NominationStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Occurrences of one bias flag across all nominations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasBreakdown {
    pub flag: String,
    pub count: usize,
    /// Share of all raised flags, one decimal.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSentiment {
    pub department: String,
    pub nominations: usize,
    /// Mean sentiment, two decimals.
    pub avg_sentiment: f64,
}

/// Everything shown on the insights view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub flagged_nominations: usize,
    pub bias_breakdown: Vec<BiasBreakdown>,
    pub sentiment_by_department: Vec<DepartmentSentiment>,
    pub status_distribution: BTreeMap<NominationStatus, usize>,
    pub core_value_distribution: BTreeMap<CoreValue, usize>,
}

/// Count each bias flag, most frequent first (ties by name).
pub fn bias_breakdown(records: &[NominationRecord]) -> Vec<BiasBreakdown> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for flag in records.iter().flat_map(|r| &r.bias_flags) {
        *counts.entry(flag.as_str()).or_default() += 1;
    }

    let raised: usize = counts.values().sum();
    let mut breakdown: Vec<BiasBreakdown> = counts
        .into_iter()
        .map(|(flag, count)| BiasBreakdown {
            flag: flag.to_string(),
            count,
            share: percentage(count, raised),
        })
        .collect();

    breakdown.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.flag.cmp(&b.flag)));
    breakdown
}

/// Mean sentiment per department, sorted by department name.
pub fn sentiment_by_department(records: &[NominationRecord]) -> Vec<DepartmentSentiment> {
    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.department.as_str())
            .or_default()
            .push(record.sentiment_score);
    }

    grouped
        .into_iter()
        .map(|(department, scores)| DepartmentSentiment {
            department: department.to_string(),
            nominations: scores.len(),
            avg_sentiment: round_to(mean(scores).unwrap_or(0.0), 2),
        })
        .collect()
}

/// Nominations per status, every status present (zero when unused).
pub fn status_distribution(records: &[NominationRecord]) -> BTreeMap<NominationStatus, usize> {
    let mut dist: BTreeMap<NominationStatus, usize> =
        NominationStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for record in records {
        *dist.entry(record.status).or_default() += 1;
    }
    dist
}

/// How often each core value is credited.
pub fn core_value_distribution(records: &[NominationRecord]) -> BTreeMap<CoreValue, usize> {
    let mut dist: BTreeMap<CoreValue, usize> = CoreValue::ALL.iter().map(|v| (*v, 0)).collect();
    for value in records.iter().flat_map(|r| &r.core_values) {
        *dist.entry(*value).or_default() += 1;
    }
    dist
}

pub fn insights(records: &[NominationRecord]) -> Insights {
    Insights {
        flagged_nominations: records.iter().filter(|r| r.has_bias_issues()).count(),
        bias_breakdown: bias_breakdown(records),
        sentiment_by_department: sentiment_by_department(records),
        status_distribution: status_distribution(records),
        core_value_distribution: core_value_distribution(records),
    }
}
