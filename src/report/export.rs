//! Nomination exports (CSV, JSON, Markdown).

use crate::error::{AwardsError, Result};
use crate::models::NominationRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV Spreadsheet"),
            ExportFormat::Json => write!(f, "JSON Document"),
            ExportFormat::Markdown => write!(f, "Markdown Report"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AwardsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => Err(AwardsError::invalid(format!("unknown export format '{}'", other))),
        }
    }
}

/// A rendered export ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportArtifact {
    pub filename: String,
    pub format: ExportFormat,
    pub records: usize,
    #[serde(skip)]
    pub content: String,
}

/// `nominations_export_YYYY-MM-DD.<ext>` for the date of `now`.
pub fn export_filename(format: ExportFormat, now: DateTime<Utc>) -> String {
    format!(
        "nominations_export_{}.{}",
        now.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Render every record, newest first, in the requested format.
pub fn export_nominations(
    records: &[NominationRecord],
    format: ExportFormat,
    now: DateTime<Utc>,
) -> Result<ExportArtifact> {
    let mut sorted: Vec<&NominationRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date_submitted.cmp(&a.date_submitted));

    let content = match format {
        ExportFormat::Csv => to_csv(&sorted),
        ExportFormat::Json => serde_json::to_string_pretty(&sorted)?,
        ExportFormat::Markdown => super::generator::generate_export_markdown(&sorted, now),
    };

    Ok(ExportArtifact {
        filename: export_filename(format, now),
        format,
        records: sorted.len(),
        content,
    })
}

pub const CSV_HEADER: &[&str] = &[
    "id",
    "employee_name",
    "employee_id",
    "department",
    "nominator_name",
    "award_type",
    "title",
    "core_values",
    "overall_rating",
    "sentiment_score",
    "bias_flags",
    "has_bias_issues",
    "date_submitted",
    "status",
];

fn to_csv(records: &[&NominationRecord]) -> String {
    let mut out = String::new();
    out.push_str(&CSV_HEADER.join(","));
    out.push_str("\r\n");

    for r in records {
        let core_values: Vec<&str> = r.core_values.iter().map(|v| v.label()).collect();
        let row = [
            r.id.clone(),
            r.employee_name.clone(),
            r.employee_id.clone(),
            r.department.clone(),
            r.nominator_name.clone(),
            r.award_type.as_str().to_string(),
            r.title.clone(),
            core_values.join(";"),
            r.overall_rating.to_string(),
            format!("{:.2}", r.sentiment_score),
            r.bias_flags.join(";"),
            r.has_bias_issues().to_string(),
            r.date_submitted.to_rfc3339_opts(SecondsFormat::Secs, true),
            r.status.as_str().to_string(),
        ];
        let fields: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        out.push_str(&fields.join(","));
        out.push_str("\r\n");
    }

    out
}

/// Quote a field if it contains a delimiter, quote or line break.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
