//! Data models for the nominations dashboard.
//!
//! This module contains the core data structures used throughout
//! the application for representing nominations, their evidence,
//! users and the dashboard metrics.

use crate::error::AwardsError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Award cadence a nomination is submitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AwardType {
    Monthly,
    Quarterly,
    Yearly,
}

impl AwardType {
    pub const ALL: [AwardType; 3] = [AwardType::Monthly, AwardType::Quarterly, AwardType::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            AwardType::Monthly => "monthly",
            AwardType::Quarterly => "quarterly",
            AwardType::Yearly => "yearly",
        }
    }
}

impl fmt::Display for AwardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AwardType::Monthly => write!(f, "Monthly"),
            AwardType::Quarterly => write!(f, "Quarterly"),
            AwardType::Yearly => write!(f, "Yearly"),
        }
    }
}

impl FromStr for AwardType {
    type Err = AwardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(AwardType::Monthly),
            "quarterly" => Ok(AwardType::Quarterly),
            "yearly" => Ok(AwardType::Yearly),
            other => Err(AwardsError::invalid(format!("unknown award type '{}'", other))),
        }
    }
}

/// Review status of a nomination. The only mutable part of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NominationStatus {
    Pending,
    Approved,
    Rejected,
    UnderReview,
}

impl NominationStatus {
    pub const ALL: [NominationStatus; 4] = [
        NominationStatus::Pending,
        NominationStatus::Approved,
        NominationStatus::Rejected,
        NominationStatus::UnderReview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NominationStatus::Pending => "pending",
            NominationStatus::Approved => "approved",
            NominationStatus::Rejected => "rejected",
            NominationStatus::UnderReview => "under_review",
        }
    }

    /// Returns an emoji badge for the status.
    pub fn emoji(&self) -> &'static str {
        match self {
            NominationStatus::Pending => "🟡",
            NominationStatus::Approved => "🟢",
            NominationStatus::Rejected => "🔴",
            NominationStatus::UnderReview => "🔵",
        }
    }
}

impl fmt::Display for NominationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NominationStatus::Pending => write!(f, "Pending"),
            NominationStatus::Approved => write!(f, "Approved"),
            NominationStatus::Rejected => write!(f, "Rejected"),
            NominationStatus::UnderReview => write!(f, "Under Review"),
        }
    }
}

impl FromStr for NominationStatus {
    type Err = AwardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "pending" => Ok(NominationStatus::Pending),
            "approved" => Ok(NominationStatus::Approved),
            "rejected" => Ok(NominationStatus::Rejected),
            "under_review" | "underreview" => Ok(NominationStatus::UnderReview),
            other => Err(AwardsError::invalid(format!("unknown status '{}'", other))),
        }
    }
}

/// Company core values a nominee can be credited with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreValue {
    CustomerDelight,
    Innovation,
    TeamWork,
    BeingFair,
    Ownership,
}

impl CoreValue {
    pub const ALL: [CoreValue; 5] = [
        CoreValue::CustomerDelight,
        CoreValue::Innovation,
        CoreValue::TeamWork,
        CoreValue::BeingFair,
        CoreValue::Ownership,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CoreValue::CustomerDelight => "Customer Delight",
            CoreValue::Innovation => "Innovation",
            CoreValue::TeamWork => "Team Work",
            CoreValue::BeingFair => "Being Fair",
            CoreValue::Ownership => "Ownership",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CoreValue::CustomerDelight => "Goes above and beyond to ensure customer satisfaction",
            CoreValue::Innovation => "Brings creative solutions and new ideas to challenges",
            CoreValue::TeamWork => "Collaborates effectively and supports team members",
            CoreValue::BeingFair => "Demonstrates integrity and treats everyone equitably",
            CoreValue::Ownership => "Takes responsibility and drives results proactively",
        }
    }
}

impl fmt::Display for CoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CoreValue {
    type Err = AwardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "customer_delight" => Ok(CoreValue::CustomerDelight),
            "innovation" => Ok(CoreValue::Innovation),
            "team_work" | "teamwork" => Ok(CoreValue::TeamWork),
            "being_fair" => Ok(CoreValue::BeingFair),
            "ownership" => Ok(CoreValue::Ownership),
            other => Err(AwardsError::invalid(format!("unknown core value '{}'", other))),
        }
    }
}

/// Role of a user in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Employee,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "Admin"),
            UserRole::Manager => write!(f, "Manager"),
            UserRole::Employee => write!(f, "Employee"),
        }
    }
}

/// A member of the user directory (nominee or nominator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: String,
}

/// A file attached to a nomination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportingDocument {
    pub id: String,
    pub name: String,
    /// MIME type or extension of the document.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Size in bytes.
    pub size: u64,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A chat message collected as evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub id: String,
    pub channel: String,
    pub timestamp: DateTime<Utc>,
    pub author: String,
    pub message: String,
    pub reactions: u32,
}

/// A completed ticket collected as evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraTicket {
    pub id: String,
    pub title: String,
    pub status: String,
    pub assignee: String,
    pub completed_date: DateTime<Utc>,
    pub story_points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Partial,
}

/// One day of attendance data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub hours_worked: f64,
    pub overtime: f64,
    pub status: AttendanceStatus,
}

/// Supporting data attached to a nomination. Opaque to query and metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub slack_messages: Vec<SlackMessage>,
    pub jira_tickets: Vec<JiraTicket>,
    pub attendance_data: Vec<AttendanceRecord>,
}

/// Totals shown at the top of the evidence view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSummary {
    pub slack_messages: usize,
    pub jira_tickets: usize,
    pub story_points: u32,
    pub present_days: usize,
    pub total_hours: f64,
    pub total_overtime: f64,
    /// Mean hours per attendance row, 0 when there are no rows.
    pub avg_hours_per_day: f64,
}

impl Evidence {
    /// Computes the evidence totals, rounded to one decimal.
    pub fn summary(&self) -> EvidenceSummary {
        let total_hours: f64 = self.attendance_data.iter().map(|r| r.hours_worked).sum();
        let total_overtime: f64 = self.attendance_data.iter().map(|r| r.overtime).sum();
        let avg_hours_per_day = if self.attendance_data.is_empty() {
            0.0
        } else {
            total_hours / self.attendance_data.len() as f64
        };

        EvidenceSummary {
            slack_messages: self.slack_messages.len(),
            jira_tickets: self.jira_tickets.len(),
            story_points: self.jira_tickets.iter().map(|t| t.story_points).sum(),
            present_days: self
                .attendance_data
                .iter()
                .filter(|r| r.status == AttendanceStatus::Present)
                .count(),
            total_hours: round_to(total_hours, 1),
            total_overtime: round_to(total_overtime, 1),
            avg_hours_per_day: round_to(avg_hours_per_day, 1),
        }
    }
}

/// A nomination of an employee for an award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominationRecord {
    pub id: String,
    pub employee_name: String,
    pub employee_id: String,
    pub department: String,
    pub nominator_name: String,
    pub nominator_id: String,
    pub award_type: AwardType,
    pub title: String,
    pub description: String,
    pub resource_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_aligned: Option<String>,
    pub verbiage: String,
    pub supporting_acknowledgement: String,
    pub core_values: Vec<CoreValue>,
    /// Rating in 1..=5.
    pub overall_rating: u8,
    #[serde(default)]
    pub supporting_documents: Vec<SupportingDocument>,
    /// Sentiment in [0, 1].
    pub sentiment_score: f64,
    /// Tags from the bias detector. A record has bias issues iff this is non-empty.
    pub bias_flags: Vec<String>,
    pub date_submitted: DateTime<Utc>,
    pub status: NominationStatus,
    pub evidence: Evidence,
}

impl NominationRecord {
    pub fn has_bias_issues(&self) -> bool {
        !self.bias_flags.is_empty()
    }

    /// Human label for the overall rating.
    pub fn rating_label(&self) -> &'static str {
        rating_label(self.overall_rating)
    }
}

/// Label shown next to a 1..=5 rating.
pub fn rating_label(rating: u8) -> &'static str {
    match rating {
        1 => "Poor",
        2 => "Below Average",
        3 => "Average",
        4 => "Good",
        5 => "Excellent",
        _ => "",
    }
}

/// Nomination counts for the calendar periods containing `now`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCounts {
    pub month: usize,
    pub quarter: usize,
    pub year: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BiasCheckResults {
    pub total: usize,
    pub flagged: usize,
    /// `flagged / total * 100`, one decimal; 0 for an empty collection.
    pub percentage: f64,
}

/// One month of the dashboard trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// Short month label, e.g. "Jan".
    pub month: String,
    pub year: i32,
    pub nominations: usize,
    /// Mean sentiment of the month, 0 for an empty month.
    pub sentiment: f64,
}

/// Aggregates shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_nominations: PeriodCounts,
    pub unique_nominees: usize,
    pub avg_sentiment_score: f64,
    pub bias_check_results: BiasCheckResults,
    pub monthly_trends: Vec<MonthlyTrend>,
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
