//! Search, filter, sort and paginate over the nomination collection.
//!
//! This is the query behind the nominations table. It is a pure
//! function of the record slice, the request and the injected `now`.

use crate::error::{AwardsError, Result};
use crate::models::{AwardType, NominationRecord};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default rows per page of the nominations table.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Submission-date window relative to `now`.
///
/// The window has an inclusive lower bound and no upper bound, so
/// future-dated records always pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Last7Days,
    Last30Days,
    Last3Months,
}

impl DateRange {
    /// Number of days covered by the window, `None` for `All`.
    pub fn days(&self) -> Option<i64> {
        match self {
            DateRange::All => None,
            DateRange::Last7Days => Some(7),
            DateRange::Last30Days => Some(30),
            DateRange::Last3Months => Some(90),
        }
    }

    /// Earliest accepted submission time for the window.
    pub fn start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.days().map(|days| now - Duration::days(days))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::All => "all",
            DateRange::Last7Days => "last7days",
            DateRange::Last30Days => "last30days",
            DateRange::Last3Months => "last3months",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = AwardsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "" | "all" | "none" => Ok(DateRange::All),
            "last7days" => Ok(DateRange::Last7Days),
            "last30days" => Ok(DateRange::Last30Days),
            "last3months" => Ok(DateRange::Last3Months),
            other => Err(AwardsError::invalid(format!("unknown date range '{}'", other))),
        }
    }
}

/// Categorical and date filters. Each active field is applied independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominationFilters {
    #[serde(default)]
    pub award_type: Option<AwardType>,
    /// Exact department name; an empty string is treated as unset.
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub date_range: DateRange,
}

/// A page request against the nomination collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominationQuery {
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
    /// Case-insensitive substring matched against name, title and department.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub filters: NominationFilters,
}

impl Default for NominationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
            filters: NominationFilters::default(),
        }
    }
}

impl NominationQuery {
    pub fn page(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_filters(mut self, filters: NominationFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Rejects page numbers and sizes that cannot address a slice.
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(AwardsError::invalid("page must be at least 1"));
        }
        if self.page_size == 0 {
            return Err(AwardsError::invalid("page size must be at least 1"));
        }
        Ok(())
    }
}

/// One page of results plus the unpaginated match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` rows (0 when nothing matched).
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total.div_ceil(self.page_size)
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// Returns true if `record` satisfies the search term and every active filter.
pub fn matches(
    record: &NominationRecord,
    search: Option<&str>,
    filters: &NominationFilters,
    now: DateTime<Utc>,
) -> bool {
    if let Some(term) = search.filter(|s| !s.is_empty()) {
        let term = term.to_lowercase();
        let hit = record.employee_name.to_lowercase().contains(&term)
            || record.title.to_lowercase().contains(&term)
            || record.department.to_lowercase().contains(&term);
        if !hit {
            return false;
        }
    }

    if let Some(award_type) = filters.award_type {
        if record.award_type != award_type {
            return false;
        }
    }

    if let Some(department) = filters.department.as_deref().filter(|d| !d.is_empty()) {
        if record.department != department {
            return false;
        }
    }

    if let Some(start) = filters.date_range.start(now) {
        if record.date_submitted < start {
            return false;
        }
    }

    true
}

/// Runs a page request: filter, sort newest first, then slice.
///
/// Ties on `date_submitted` keep their input order. A page past the
/// end yields an empty `data` with the correct `total`.
pub fn query(
    records: &[NominationRecord],
    request: &NominationQuery,
    now: DateTime<Utc>,
) -> Result<Page<NominationRecord>> {
    request.validate()?;

    let mut matched: Vec<&NominationRecord> = records
        .iter()
        .filter(|r| matches(r, request.search.as_deref(), &request.filters, now))
        .collect();

    // Vec::sort_by is stable
    matched.sort_by(|a, b| b.date_submitted.cmp(&a.date_submitted));

    let total = matched.len();
    let start = (request.page - 1).saturating_mul(request.page_size);
    let data: Vec<NominationRecord> = matched
        .into_iter()
        .skip(start)
        .take(request.page_size)
        .cloned()
        .collect();

    Ok(Page {
        data,
        total,
        page: request.page,
        page_size: request.page_size,
    })
}
