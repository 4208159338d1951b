//! Dashboard metrics aggregation.
//!
//! Buckets nominations into the calendar month, quarter and year of an
//! injected `now` and computes the dashboard averages and trend series.

use crate::models::{
    round_to, BiasCheckResults, DashboardMetrics, MonthlyTrend, NominationRecord, PeriodCounts,
};
use chrono::{DateTime, Datelike, Utc};
use std::collections::HashSet;

/// Number of months in the trend series, ending at `now`'s month.
pub const TREND_MONTHS: u32 = 6;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month identified by year and zero-based month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarMonth {
    pub year: i32,
    pub month0: u32,
}

impl CalendarMonth {
    pub fn of(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month0: at.month0(),
        }
    }

    /// The month `n` months before this one.
    pub fn minus(self, n: u32) -> Self {
        let index = self.year as i64 * 12 + self.month0 as i64 - n as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month0: index.rem_euclid(12) as u32,
        }
    }

    pub fn quarter(&self) -> u32 {
        self.month0 / 3
    }

    pub fn label(&self) -> &'static str {
        MONTH_LABELS[self.month0 as usize]
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        *self == Self::of(at)
    }
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Share of `part` in `whole` as a percentage with one decimal, 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round_to(part as f64 / whole as f64 * 100.0, 1)
    }
}

/// Count nominations in the month, quarter and year containing `now`.
pub fn period_counts(records: &[NominationRecord], now: DateTime<Utc>) -> PeriodCounts {
    let current = CalendarMonth::of(now);
    let mut counts = PeriodCounts::default();

    for record in records {
        let submitted = CalendarMonth::of(record.date_submitted);
        if submitted.year != current.year {
            continue;
        }
        counts.year += 1;
        if submitted.quarter() == current.quarter() {
            counts.quarter += 1;
        }
        if submitted.month0 == current.month0 {
            counts.month += 1;
        }
    }

    counts
}

/// Flagged vs. total nominations.
pub fn bias_check(records: &[NominationRecord]) -> BiasCheckResults {
    let flagged = records.iter().filter(|r| r.has_bias_issues()).count();
    BiasCheckResults {
        total: records.len(),
        flagged,
        percentage: percentage(flagged, records.len()),
    }
}

/// Trailing trend series, oldest month first, always `TREND_MONTHS` entries.
pub fn monthly_trends(records: &[NominationRecord], now: DateTime<Utc>) -> Vec<MonthlyTrend> {
    let current = CalendarMonth::of(now);

    (0..TREND_MONTHS)
        .rev()
        .map(|back| {
            let bucket = current.minus(back);
            let scores: Vec<f64> = records
                .iter()
                .filter(|r| bucket.contains(r.date_submitted))
                .map(|r| r.sentiment_score)
                .collect();

            MonthlyTrend {
                month: bucket.label().to_string(),
                year: bucket.year,
                nominations: scores.len(),
                sentiment: mean(scores).unwrap_or(0.0),
            }
        })
        .collect()
}

/// Compute every dashboard metric for `records` as of `now`.
///
/// An empty collection yields zero counts, zero averages and six empty
/// trend buckets.
pub fn aggregate(records: &[NominationRecord], now: DateTime<Utc>) -> DashboardMetrics {
    let unique_nominees = records
        .iter()
        .map(|r| r.employee_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let avg_sentiment_score = mean(records.iter().map(|r| r.sentiment_score))
        .map(|avg| round_to(avg, 2))
        .unwrap_or(0.0);

    DashboardMetrics {
        total_nominations: period_counts(records, now),
        unique_nominees,
        avg_sentiment_score,
        bias_check_results: bias_check(records),
        monthly_trends: monthly_trends(records, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, record, with_flags, with_sentiment};
    use proptest::prelude::*;

    #[test]
    fn test_two_records_in_current_month() {
        let records = vec![
            with_sentiment(record("a", "Ann", "HR", at(2024, 1, 10)), 0.8),
            with_sentiment(record("b", "Ben", "HR", at(2024, 1, 20)), 0.6),
        ];

        let metrics = aggregate(&records, at(2024, 1, 25));
        assert_eq!(metrics.total_nominations.month, 2);
        assert_eq!(metrics.avg_sentiment_score, 0.70);
    }

    #[test]
    fn test_period_counts_require_matching_year() {
        let records = vec![
            record("a", "Ann", "HR", at(2024, 5, 3)),
            record("b", "Ben", "HR", at(2024, 4, 3)),
            record("c", "Cat", "HR", at(2024, 1, 3)),
            // Same month and quarter index, previous year.
            record("d", "Dan", "HR", at(2023, 5, 3)),
        ];

        let counts = period_counts(&records, at(2024, 5, 20));
        assert_eq!(counts.month, 1);
        assert_eq!(counts.quarter, 2);
        assert_eq!(counts.year, 3);
    }

    #[test]
    fn test_unique_nominees() {
        let records = vec![
            record("a", "Ann", "HR", at(2024, 5, 3)),
            record("b", "Ann", "HR", at(2024, 5, 4)),
            record("c", "Ben", "HR", at(2023, 1, 4)),
        ];
        assert_eq!(aggregate(&records, at(2024, 5, 20)).unique_nominees, 2);
    }

    #[test]
    fn test_bias_percentage() {
        let records = vec![
            with_flags(record("a", "Ann", "HR", at(2024, 5, 3)), &["Age bias"]),
            record("b", "Ben", "HR", at(2024, 5, 3)),
            record("c", "Cat", "HR", at(2024, 5, 3)),
        ];
        let bias = bias_check(&records);
        assert_eq!(bias.total, 3);
        assert_eq!(bias.flagged, 1);
        assert_eq!(bias.percentage, 33.3);
    }

    #[test]
    fn test_empty_input_is_zero() {
        let metrics = aggregate(&[], at(2024, 5, 20));
        assert_eq!(metrics.avg_sentiment_score, 0.0);
        assert_eq!(metrics.unique_nominees, 0);
        assert_eq!(metrics.bias_check_results.percentage, 0.0);
        assert_eq!(metrics.total_nominations, PeriodCounts::default());
        assert_eq!(metrics.monthly_trends.len(), 6);
        assert!(metrics.monthly_trends.iter().all(|t| t.nominations == 0 && t.sentiment == 0.0));
    }

    #[test]
    fn test_trends_wrap_across_year_boundary() {
        let records = vec![
            with_sentiment(record("a", "Ann", "HR", at(2023, 11, 5)), 0.4),
            with_sentiment(record("b", "Ben", "HR", at(2023, 11, 9)), 0.8),
            with_sentiment(record("c", "Cat", "HR", at(2024, 2, 1)), 0.9),
            // Outside the window.
            record("d", "Dan", "HR", at(2023, 8, 30)),
        ];

        let trends = monthly_trends(&records, at(2024, 2, 15));
        let labels: Vec<&str> = trends.iter().map(|t| t.month.as_str()).collect();
        assert_eq!(labels, vec!["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]);
        assert_eq!(trends[0].year, 2023);
        assert_eq!(trends[5].year, 2024);
        assert_eq!(trends[2].nominations, 2);
        assert!((trends[2].sentiment - 0.6).abs() < 1e-9);
        assert_eq!(trends[5].nominations, 1);
        assert_eq!(trends[3].sentiment, 0.0);
    }

    #[test]
    fn test_calendar_month_minus() {
        let jan = CalendarMonth { year: 2024, month0: 0 };
        assert_eq!(jan.minus(1), CalendarMonth { year: 2023, month0: 11 });
        assert_eq!(jan.minus(13), CalendarMonth { year: 2022, month0: 11 });
        assert_eq!(jan.minus(0), jan);
    }

    proptest! {
        #[test]
        fn prop_bias_results_consistent(flags in proptest::collection::vec(any::<bool>(), 0..80)) {
            let records: Vec<NominationRecord> = flags
                .iter()
                .enumerate()
                .map(|(i, flagged)| {
                    let r = record(&format!("r{}", i), "Ann", "HR", at(2024, 5, 1));
                    if *flagged { with_flags(r, &["Tenure bias"]) } else { r }
                })
                .collect();

            let metrics = aggregate(&records, at(2024, 5, 20));
            let bias = metrics.bias_check_results;
            prop_assert!(bias.flagged <= bias.total);
            prop_assert_eq!(bias.percentage, percentage(bias.flagged, bias.total));
            prop_assert_eq!(metrics.monthly_trends.len(), TREND_MONTHS as usize);
            prop_assert!(!metrics.avg_sentiment_score.is_nan());
        }
    }
}
