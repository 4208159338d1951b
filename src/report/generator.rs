//! Markdown and plain-text report generation.
//!
//! This module renders the dashboard, the nominations table and the
//! nomination detail view from the computed results.

use crate::analysis::Insights;
use crate::error::Result;
use crate::models::{
    CoreValue, DashboardMetrics, EvidenceSummary, NominationRecord, NominationStatus, User,
};
use crate::query::Page;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Render any result as pretty JSON.
pub fn generate_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Generate the Markdown dashboard.
pub fn generate_dashboard_markdown(
    metrics: &DashboardMetrics,
    insights: &Insights,
    now: DateTime<Utc>,
    top_departments: usize,
) -> String {
    let mut output = String::new();

    output.push_str("# Nominations Dashboard\n\n");
    output.push_str(&format!("*As of {}*\n\n", now.format("%Y-%m-%d %H:%M UTC")));

    output.push_str(&generate_key_metrics_section(metrics));
    output.push_str(&generate_trends_section(metrics));
    output.push_str("## Insights\n\n");
    output.push_str(&generate_insights_section(insights, top_departments));
    output.push_str(&generate_footer());

    output
}

/// Generate the Markdown insights page.
pub fn generate_insights_markdown(insights: &Insights, top_departments: usize) -> String {
    let mut output = String::new();

    output.push_str("# AI Insights\n\n");
    output.push_str(&format!(
        "**{}** nominations carry at least one bias flag.\n\n",
        insights.flagged_nominations
    ));
    output.push_str(&generate_insights_section(insights, top_departments));
    output.push_str(&generate_footer());

    output
}

/// Generate the key metrics section.
fn generate_key_metrics_section(metrics: &DashboardMetrics) -> String {
    let mut section = String::new();
    let totals = &metrics.total_nominations;
    let bias = &metrics.bias_check_results;

    section.push_str("## Key Metrics\n\n");
    section.push_str("| This Month | This Quarter | This Year | Unique Nominees | Avg Sentiment |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | {:.0}% |\n\n",
        totals.month,
        totals.quarter,
        totals.year,
        metrics.unique_nominees,
        metrics.avg_sentiment_score * 100.0
    ));

    section.push_str(&format!(
        "**Bias check:** {} of {} nominations flagged ({:.1}%)\n\n",
        bias.flagged, bias.total, bias.percentage
    ));

    section
}

/// Generate the six-month trend table.
fn generate_trends_section(metrics: &DashboardMetrics) -> String {
    let mut section = String::new();

    section.push_str("## Monthly Trends\n\n");
    section.push_str("| Month | Nominations | Avg Sentiment |\n");
    section.push_str("|:---|:---:|:---:|\n");
    for trend in &metrics.monthly_trends {
        section.push_str(&format!(
            "| {} {} | {} | {:.2} |\n",
            trend.month, trend.year, trend.nominations, trend.sentiment
        ));
    }
    section.push('\n');

    section
}

/// Generate the insights section (bias, departments, statuses, values).
fn generate_insights_section(insights: &Insights, top_departments: usize) -> String {
    let mut section = String::new();

    section.push_str("### Bias Detection Breakdown\n\n");
    if insights.bias_breakdown.is_empty() {
        section.push_str("No bias flags were raised.\n\n");
    } else {
        section.push_str("| Flag | Count | Share |\n");
        section.push_str("|:---|:---:|:---:|\n");
        for entry in &insights.bias_breakdown {
            section.push_str(&format!(
                "| {} | {} | {:.1}% |\n",
                entry.flag, entry.count, entry.share
            ));
        }
        section.push('\n');
    }

    if !insights.sentiment_by_department.is_empty() {
        section.push_str("### Sentiment by Department\n\n");
        section.push_str("| Department | Nominations | Avg Sentiment |\n");
        section.push_str("|:---|:---:|:---:|\n");
        for dept in insights.sentiment_by_department.iter().take(top_departments) {
            section.push_str(&format!(
                "| {} | {} | {:.2} |\n",
                dept.department, dept.nominations, dept.avg_sentiment
            ));
        }
        section.push('\n');
    }

    section.push_str("### Status\n\n");
    for (status, count) in &insights.status_distribution {
        section.push_str(&format!("- {} {}: {}\n", status.emoji(), status, count));
    }
    section.push('\n');

    section.push_str("### Core Values\n\n");
    for (value, count) in &insights.core_value_distribution {
        section.push_str(&format!("- {}: {}\n", value.label(), count));
    }
    section.push('\n');

    section
}

/// Generate a Markdown table for one page of nominations.
pub fn generate_nominations_markdown(page: &Page<NominationRecord>) -> String {
    let mut output = String::new();

    output.push_str("# Nominations\n\n");
    output.push_str(&format!(
        "*Page {} of {} ({} matching)*\n\n",
        page.page,
        page.total_pages().max(1),
        page.total
    ));

    if page.data.is_empty() {
        output.push_str("No nominations found.\n");
        return output;
    }

    output.push_str("| Employee | Department | Award | Rating | Sentiment | Bias | Status | Submitted |\n");
    output.push_str("|:---|:---|:---|:---:|:---:|:---:|:---|:---|\n");
    for r in &page.data {
        output.push_str(&format!(
            "| {} | {} | {} | {}/5 | {:.0}% | {} | {} {} | {} |\n",
            r.employee_name,
            r.department,
            r.award_type,
            r.overall_rating,
            r.sentiment_score * 100.0,
            bias_label(r),
            r.status.emoji(),
            r.status,
            r.date_submitted.format("%Y-%m-%d"),
        ));
    }

    output
}

/// Generate a plain-text table for one page of nominations.
pub fn generate_nominations_text(page: &Page<NominationRecord>) -> String {
    let mut output = String::new();

    if page.data.is_empty() {
        output.push_str("No nominations found.\n");
    } else {
        output.push_str(&format!(
            "{:<36}  {:<24}  {:<11}  {:<9}  {:>6}  {:>9}  {:<9}  {:<12}  {}\n",
            "ID", "EMPLOYEE", "DEPARTMENT", "AWARD", "RATING", "SENTIMENT", "BIAS", "STATUS", "SUBMITTED"
        ));
        for r in &page.data {
            output.push_str(&format!(
                "{:<36}  {:<24}  {:<11}  {:<9}  {:>6}  {:>8.0}%  {:<9}  {:<12}  {}\n",
                r.id,
                truncate(&r.employee_name, 24),
                truncate(&r.department, 11),
                r.award_type.as_str(),
                format!("{}/5", r.overall_rating),
                r.sentiment_score * 100.0,
                bias_label(r),
                r.status.as_str(),
                r.date_submitted.format("%Y-%m-%d"),
            ));
        }
    }

    output.push_str(&format!(
        "\nPage {} of {} ({} matching)\n",
        page.page,
        page.total_pages().max(1),
        page.total
    ));

    output
}

/// Generate the plain-text dashboard summary.
pub fn generate_dashboard_text(metrics: &DashboardMetrics) -> String {
    let mut lines = Vec::new();
    let totals = &metrics.total_nominations;
    let bias = &metrics.bias_check_results;

    lines.push(format!("This month:      {}", totals.month));
    lines.push(format!("This quarter:    {}", totals.quarter));
    lines.push(format!("This year:       {}", totals.year));
    lines.push(format!("Unique nominees: {}", metrics.unique_nominees));
    lines.push(format!("Avg sentiment:   {:.2}", metrics.avg_sentiment_score));
    lines.push(format!(
        "Bias flagged:    {}/{} ({:.1}%)",
        bias.flagged, bias.total, bias.percentage
    ));
    lines.push(String::new());
    lines.push("Monthly trends:".to_string());
    for trend in &metrics.monthly_trends {
        lines.push(format!(
            "  {} {}  {:>4} nominations  sentiment {:.2}",
            trend.month, trend.year, trend.nominations, trend.sentiment
        ));
    }

    lines.join("\n") + "\n"
}

/// Generate the plain-text insights summary.
pub fn generate_insights_text(insights: &Insights) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Flagged nominations: {}", insights.flagged_nominations));
    lines.push(String::new());
    lines.push("Bias breakdown:".to_string());
    if insights.bias_breakdown.is_empty() {
        lines.push("  none".to_string());
    }
    for entry in &insights.bias_breakdown {
        lines.push(format!("  {:<16} {:>4}  {:>5.1}%", entry.flag, entry.count, entry.share));
    }

    lines.push(String::new());
    lines.push("Sentiment by department:".to_string());
    for dept in &insights.sentiment_by_department {
        lines.push(format!(
            "  {:<12} {:>4} nominations  {:.2}",
            dept.department, dept.nominations, dept.avg_sentiment
        ));
    }

    lines.push(String::new());
    lines.push("Status:".to_string());
    for (status, count) in &insights.status_distribution {
        lines.push(format!("  {:<12} {}", status.as_str(), count));
    }

    lines.join("\n") + "\n"
}

/// Generate the Markdown detail view of a nomination.
pub fn generate_nomination_markdown(record: &NominationRecord, include_evidence: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", record.title));
    output.push_str(&format!("- **Nominee:** {} ({})\n", record.employee_name, record.department));
    output.push_str(&format!("- **Nominated by:** {}\n", record.nominator_name));
    output.push_str(&format!("- **Award:** {}\n", record.award_type));
    output.push_str(&format!(
        "- **Status:** {} {}\n",
        record.status.emoji(),
        record.status
    ));
    output.push_str(&format!(
        "- **Rating:** {}/5 ({})\n",
        record.overall_rating,
        record.rating_label()
    ));
    output.push_str(&format!(
        "- **Sentiment:** {:.0}%\n",
        record.sentiment_score * 100.0
    ));
    if let Some(ref project) = record.project_aligned {
        output.push_str(&format!("- **Project:** {}\n", project));
    }
    output.push_str(&format!(
        "- **Submitted:** {}\n",
        record.date_submitted.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!("- **Id:** `{}`\n\n", record.id));

    output.push_str(&generate_core_values_section(&record.core_values));

    if record.has_bias_issues() {
        output.push_str("## ⚠️ Bias Flags\n\n");
        for flag in &record.bias_flags {
            output.push_str(&format!("- {}\n", flag));
        }
        output.push('\n');
    }

    output.push_str("## Nomination\n\n");
    output.push_str(&record.verbiage);
    output.push_str("\n\n");

    output.push_str("## Supporting Acknowledgement\n\n");
    output.push_str(&record.supporting_acknowledgement);
    output.push_str("\n\n");

    if !record.supporting_documents.is_empty() {
        output.push_str("## Supporting Documents\n\n");
        for doc in &record.supporting_documents {
            output.push_str(&format!("- {} ({} bytes)\n", doc.name, doc.size));
        }
        output.push('\n');
    }

    if include_evidence {
        output.push_str(&generate_evidence_section(record));
    }

    output
}

fn generate_core_values_section(values: &[CoreValue]) -> String {
    let mut section = String::new();

    section.push_str("## Core Values\n\n");
    for value in values {
        section.push_str(&format!("- **{}**: {}\n", value.label(), value.description()));
    }
    section.push('\n');

    section
}

/// Generate the evidence section for a nomination.
fn generate_evidence_section(record: &NominationRecord) -> String {
    let mut section = String::new();
    let evidence = &record.evidence;
    let summary: EvidenceSummary = evidence.summary();

    section.push_str("## Evidence\n\n");
    section.push_str("| Slack Messages | Jira Tickets | Story Points | Days Present | Hours | Overtime | Avg Hours/Day |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | {:.1} | {:.1} | {:.1} |\n\n",
        summary.slack_messages,
        summary.jira_tickets,
        summary.story_points,
        summary.present_days,
        summary.total_hours,
        summary.total_overtime,
        summary.avg_hours_per_day
    ));

    if !evidence.slack_messages.is_empty() {
        section.push_str("### Slack Messages\n\n");
        for msg in &evidence.slack_messages {
            section.push_str(&format!(
                "> **{}** in {} ({}, {} reactions)\n>\n> {}\n\n",
                msg.author,
                msg.channel,
                msg.timestamp.format("%Y-%m-%d"),
                msg.reactions,
                msg.message
            ));
        }
    }

    if !evidence.jira_tickets.is_empty() {
        section.push_str("### Jira Tickets\n\n");
        section.push_str("| Ticket | Title | Status | Points | Completed |\n");
        section.push_str("|:---|:---|:---|:---:|:---|\n");
        for ticket in &evidence.jira_tickets {
            section.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                ticket.id,
                ticket.title,
                ticket.status,
                ticket.story_points,
                ticket.completed_date.format("%Y-%m-%d")
            ));
        }
        section.push('\n');
    }

    section
}

/// Generate the Markdown body of an export.
pub fn generate_export_markdown(records: &[&NominationRecord], now: DateTime<Utc>) -> String {
    let mut output = String::new();

    output.push_str("# Nominations Export\n\n");
    output.push_str(&format!(
        "- **Generated:** {}\n- **Records:** {}\n\n",
        now.format("%Y-%m-%d %H:%M UTC"),
        records.len()
    ));

    for status in NominationStatus::ALL {
        let group: Vec<&&NominationRecord> = records.iter().filter(|r| r.status == status).collect();
        if group.is_empty() {
            continue;
        }
        output.push_str(&format!("## {} {} ({})\n\n", status.emoji(), status, group.len()));
        output.push_str("| Employee | Department | Award | Sentiment | Submitted |\n");
        output.push_str("|:---|:---|:---|:---:|:---|\n");
        for r in group {
            output.push_str(&format!(
                "| {} | {} | {} | {:.2} | {} |\n",
                r.employee_name,
                r.department,
                r.award_type,
                r.sentiment_score,
                r.date_submitted.format("%Y-%m-%d")
            ));
        }
        output.push('\n');
    }

    output.push_str(&generate_footer());
    output
}

/// Generate the plain-text user directory listing.
pub fn generate_users_text(users: &[User]) -> String {
    let mut output = String::new();
    for user in users {
        output.push_str(&format!(
            "{:<36}  {:<24}  {:<9}  {:<11}  {}\n",
            user.id,
            truncate(&user.name, 24),
            user.role,
            user.department,
            user.email
        ));
    }
    output.push_str(&format!("\n{} users\n", users.len()));
    output
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Generated by awardboard*\n".to_string()
}

fn bias_label(record: &NominationRecord) -> String {
    match record.bias_flags.len() {
        0 => "-".to_string(),
        1 => "1 flag".to_string(),
        n => format!("{} flags", n),
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{aggregate, insights};
    use crate::models::{AttendanceRecord, AttendanceStatus};
    use crate::test_support::{at, record, with_flags};

    fn sample() -> Vec<NominationRecord> {
        vec![
            with_flags(record("n1", "Ann Lee", "HR", at(2024, 5, 1)), &["Age bias"]),
            record("n2", "Ben Ode", "Sales", at(2024, 5, 2)),
        ]
    }

    #[test]
    fn test_generate_dashboard_markdown() {
        let records = sample();
        let now = at(2024, 5, 20);
        let markdown =
            generate_dashboard_markdown(&aggregate(&records, now), &insights(&records), now, 6);

        assert!(markdown.contains("# Nominations Dashboard"));
        assert!(markdown.contains("## Key Metrics"));
        assert!(markdown.contains("| 2 | 2 | 2 | 2 | 50% |"));
        assert!(markdown.contains("1 of 2 nominations flagged (50.0%)"));
        assert!(markdown.contains("| Dec 2023 | 0 | 0.00 |"));
        assert!(markdown.contains("| May 2024 | 2 | 0.50 |"));
        assert!(markdown.contains("| Age bias | 1 | 100.0% |"));
    }

    #[test]
    fn test_generate_insights_markdown() {
        let markdown = generate_insights_markdown(&insights(&sample()), 1);
        assert!(markdown.contains("# AI Insights"));
        assert!(markdown.contains("**1** nominations carry"));
        assert!(markdown.contains("| HR | 1 | 0.50 |"));
        // top_departments caps the table
        assert!(!markdown.contains("| Sales |"));
        assert!(markdown.contains("- 🟡 Pending: 2"));
    }

    #[test]
    fn test_generate_nominations_tables() {
        let page = Page {
            data: sample(),
            total: 12,
            page: 1,
            page_size: 10,
        };
        let markdown = generate_nominations_markdown(&page);
        assert!(markdown.contains("*Page 1 of 2 (12 matching)*"));
        assert!(markdown.contains("| Ann Lee | HR | Monthly | 4/5 | 50% | 1 flag | 🟡 Pending | 2024-05-01 |"));

        let text = generate_nominations_text(&page);
        assert!(text.contains("EMPLOYEE"));
        assert!(text.contains("Ben Ode"));
        assert!(text.contains("Page 1 of 2 (12 matching)"));
    }

    #[test]
    fn test_empty_page() {
        let page: Page<NominationRecord> = Page {
            data: Vec::new(),
            total: 0,
            page: 3,
            page_size: 10,
        };
        assert!(generate_nominations_text(&page).contains("No nominations found."));
        assert!(generate_nominations_markdown(&page).contains("No nominations found."));
    }

    #[test]
    fn test_generate_nomination_markdown() {
        let mut r = sample().remove(0);
        r.evidence.attendance_data.push(AttendanceRecord {
            date: at(2024, 4, 30).date_naive(),
            hours_worked: 8.5,
            overtime: 0.5,
            status: AttendanceStatus::Present,
        });

        let with_evidence = generate_nomination_markdown(&r, true);
        assert!(with_evidence.contains("# Recognition for Ann Lee"));
        assert!(with_evidence.contains("Bias Flags"));
        assert!(with_evidence.contains("**Team Work**"));
        assert!(with_evidence.contains("4/5 (Good)"));
        assert!(with_evidence.contains("| 0 | 0 | 0 | 1 | 8.5 | 0.5 | 8.5 |"));

        let without = generate_nomination_markdown(&r, false);
        assert!(!without.contains("## Evidence"));
    }

    #[test]
    fn test_export_markdown_groups_by_status() {
        let mut records = sample();
        records[1].status = NominationStatus::Approved;
        let refs: Vec<&NominationRecord> = records.iter().collect();
        let markdown = generate_export_markdown(&refs, at(2024, 5, 20));
        assert!(markdown.contains("- **Records:** 2"));
        assert!(markdown.contains("Pending (1)"));
        assert!(markdown.contains("Approved (1)"));
        assert!(!markdown.contains("Rejected"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_generate_json() {
        let json = generate_json(&sample()).unwrap();
        assert!(json.contains("\"employee_name\": \"Ann Lee\""));
    }
}
