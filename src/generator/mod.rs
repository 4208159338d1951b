//! Synthetic data for seeding the nomination store.
//!
//! Everything is driven by a seeded `StdRng`, so a given seed, `now` and
//! set of counts always reproduce the same users and nominations.

mod words;

use crate::error::{AwardsError, Result};
use crate::models::{
    AttendanceRecord, AttendanceStatus, AwardType, CoreValue, Evidence, JiraTicket,
    NominationRecord, NominationStatus, SlackMessage, User, UserRole,
};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use uuid::Uuid;
use words::{COMPANIES, EMAIL_DOMAINS, FIRST_NAMES, LAST_NAMES, LOREM};

pub const DEPARTMENTS: &[&str] = &["Engineering", "Marketing", "Sales", "HR", "Finance", "Operations"];
pub const BIAS_TYPES: &[&str] = &["Gender bias", "Age bias", "Department bias", "Tenure bias"];

const SLACK_CHANNELS: &[&str] = &["#general", "#team-updates", "#kudos", "#random"];
const TICKET_STATUSES: &[&str] = &["Done", "In Progress", "Completed"];
const ATTENDANCE_WEIGHTS: &[AttendanceStatus] = &[
    AttendanceStatus::Present,
    AttendanceStatus::Present,
    AttendanceStatus::Present,
    AttendanceStatus::Partial,
    AttendanceStatus::Absent,
];
const ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Manager, UserRole::Employee];

/// Probability that a generated nomination carries bias flags.
const BIAS_PROBABILITY: f64 = 0.15;
/// Probability that a generated nomination names an aligned project.
const PROJECT_PROBABILITY: f64 = 0.6;
const ATTENDANCE_DAYS: i64 = 30;

/// Sizes and seed of a generated data set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub users: usize,
    pub nominations: usize,
    /// Nominations are dated within this many days before `now`.
    pub history_days: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            users: 50,
            nominations: 150,
            history_days: 90,
        }
    }
}

/// A user directory plus nominations drawn from it.
#[derive(Debug, Clone)]
pub struct MockDataset {
    pub users: Vec<User>,
    pub nominations: Vec<NominationRecord>,
}

/// Generate a full data set as of `now`.
pub fn generate(config: &GeneratorConfig, now: DateTime<Utc>) -> Result<MockDataset> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let users = generate_users(&mut rng, config.users);
    let nominations = generate_nominations(&mut rng, &users, config.nominations, now, config.history_days)?;

    debug!(
        "Generated {} users and {} nominations (seed {})",
        users.len(),
        nominations.len(),
        config.seed
    );

    Ok(MockDataset { users, nominations })
}

pub fn generate_users(rng: &mut StdRng, count: usize) -> Vec<User> {
    (0..count)
        .map(|_| {
            let first = pick(rng, FIRST_NAMES);
            let last = pick(rng, LAST_NAMES);
            let domain = pick(rng, EMAIL_DOMAINS);
            User {
                id: uuid(rng),
                name: format!("{} {}", first, last),
                email: format!(
                    "{}.{}{}@{}",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    rng.random_range(1..100),
                    domain
                ),
                role: *pick(rng, ROLES),
                department: pick(rng, DEPARTMENTS).to_string(),
            }
        })
        .collect()
}

/// Generate `count` nominations between distinct members of `users`.
pub fn generate_nominations(
    rng: &mut StdRng,
    users: &[User],
    count: usize,
    now: DateTime<Utc>,
    history_days: u32,
) -> Result<Vec<NominationRecord>> {
    if users.len() < 2 {
        return Err(AwardsError::invalid(
            "at least two users are needed to generate nominations",
        ));
    }
    if Duration::try_days(i64::from(history_days))
        .and_then(|window| now.checked_sub_signed(window))
        .is_none()
    {
        return Err(AwardsError::invalid(format!(
            "history_days {} reaches past the earliest representable date",
            history_days
        )));
    }

    let mut nominations = Vec::with_capacity(count);
    for _ in 0..count {
        let employee_idx = rng.random_range(0..users.len());
        // Skip over the employee so the nominator is always someone else.
        let mut nominator_idx = rng.random_range(0..users.len() - 1);
        if nominator_idx >= employee_idx {
            nominator_idx += 1;
        }
        let employee = &users[employee_idx];
        let nominator = &users[nominator_idx];

        let bias_flags = if rng.random_bool(BIAS_PROBABILITY) {
            let n = rng.random_range(1..=2);
            pick_distinct(rng, BIAS_TYPES, n)
                .into_iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            Vec::new()
        };

        let core_value_count = rng.random_range(1..=3);
        let project_aligned = rng
            .random_bool(PROJECT_PROBABILITY)
            .then(|| pick(rng, COMPANIES).to_string());

        nominations.push(NominationRecord {
            id: uuid(rng),
            employee_name: employee.name.clone(),
            employee_id: employee.id.clone(),
            department: employee.department.clone(),
            nominator_name: nominator.name.clone(),
            nominator_id: nominator.id.clone(),
            award_type: *pick(rng, &AwardType::ALL),
            title: sentence(rng, 3, 8),
            description: paragraphs(rng, 2, 4),
            resource_name: employee.name.clone(),
            project_aligned,
            verbiage: paragraphs(rng, 2, 4),
            supporting_acknowledgement: paragraphs(rng, 1, 2),
            core_values: pick_distinct(rng, &CoreValue::ALL, core_value_count),
            overall_rating: rng.random_range(3..=5),
            supporting_documents: Vec::new(),
            sentiment_score: rng.random_range(10..=100) as f64 / 100.0,
            bias_flags,
            date_submitted: recent(rng, now, history_days as i64),
            status: *pick(rng, &NominationStatus::ALL),
            evidence: generate_evidence(rng, now),
        });
    }

    Ok(nominations)
}

pub fn generate_evidence(rng: &mut StdRng, now: DateTime<Utc>) -> Evidence {
    let slack_messages = (0..rng.random_range(2..=8))
        .map(|_| SlackMessage {
            id: uuid(rng),
            channel: pick(rng, SLACK_CHANNELS).to_string(),
            timestamp: recent(rng, now, 30),
            author: full_name(rng),
            message: sentences(rng, 1, 3),
            reactions: rng.random_range(0..=15),
        })
        .collect();

    let jira_tickets = (0..rng.random_range(1..=5))
        .map(|_| JiraTicket {
            id: format!("TICKET-{}", rng.random_range(1000..=9999)),
            title: sentence(rng, 4, 10),
            status: pick(rng, TICKET_STATUSES).to_string(),
            assignee: full_name(rng),
            completed_date: recent(rng, now, 60),
            story_points: rng.random_range(1..=8),
        })
        .collect();

    let attendance_data = (0..ATTENDANCE_DAYS)
        .map(|index| AttendanceRecord {
            date: recent(rng, now, ATTENDANCE_DAYS - index).date_naive(),
            hours_worked: rng.random_range(70..=100) as f64 / 10.0,
            overtime: rng.random_range(0..=30) as f64 / 10.0,
            status: *pick(rng, ATTENDANCE_WEIGHTS),
        })
        .collect();

    Evidence {
        slack_messages,
        jira_tickets,
        attendance_data,
    }
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

fn pick_distinct<T: Copy>(rng: &mut StdRng, items: &[T], amount: usize) -> Vec<T> {
    let mut indices: Vec<usize> = rand::seq::index::sample(rng, items.len(), amount.min(items.len())).into_vec();
    indices.sort_unstable();
    indices.into_iter().map(|i| items[i]).collect()
}

fn uuid(rng: &mut StdRng) -> String {
    uuid::Builder::from_random_bytes(rng.random()).into_uuid().to_string()
}

/// A time in `[now - days, now]`.
fn recent(rng: &mut StdRng, now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    let window = Duration::days(days.max(0)).num_seconds();
    now - Duration::seconds(rng.random_range(0..=window))
}

fn full_name(rng: &mut StdRng) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

fn sentence(rng: &mut StdRng, min_words: usize, max_words: usize) -> String {
    let n = rng.random_range(min_words..=max_words);
    let words: Vec<&str> = (0..n).map(|_| *pick(rng, LOREM)).collect();
    let mut text = words.join(" ");
    if let Some(first) = text.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    text.push('.');
    text
}

fn sentences(rng: &mut StdRng, min: usize, max: usize) -> String {
    let n = rng.random_range(min..=max);
    (0..n).map(|_| sentence(rng, 5, 12)).collect::<Vec<_>>().join(" ")
}

fn paragraphs(rng: &mut StdRng, min: usize, max: usize) -> String {
    let n = rng.random_range(min..=max);
    (0..n).map(|_| sentences(rng, 3, 6)).collect::<Vec<_>>().join("\n\n")
}

/// Fresh random id for records created after seeding.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
