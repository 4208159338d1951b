//! Record builders shared by the unit tests.

use crate::models::{AwardType, CoreValue, Evidence, NominationRecord, NominationStatus};
use chrono::{DateTime, TimeZone, Utc};

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn record(id: &str, employee_name: &str, department: &str, date: DateTime<Utc>) -> NominationRecord {
    NominationRecord {
        id: id.to_string(),
        employee_name: employee_name.to_string(),
        employee_id: format!("emp-{}", employee_name.to_lowercase().replace(' ', "-")),
        department: department.to_string(),
        nominator_name: "Nora Nominator".to_string(),
        nominator_id: "nominator-1".to_string(),
        award_type: AwardType::Monthly,
        title: format!("Recognition for {}", employee_name),
        description: "Delivered consistently.".to_string(),
        resource_name: employee_name.to_string(),
        project_aligned: None,
        verbiage: "Consistently excellent delivery across the quarter.".to_string(),
        supporting_acknowledgement: "Client praised the work.".to_string(),
        core_values: vec![CoreValue::TeamWork],
        overall_rating: 4,
        supporting_documents: Vec::new(),
        sentiment_score: 0.5,
        bias_flags: Vec::new(),
        date_submitted: date,
        status: NominationStatus::Pending,
        evidence: Evidence::default(),
    }
}

pub fn with_sentiment(mut record: NominationRecord, sentiment: f64) -> NominationRecord {
    record.sentiment_score = sentiment;
    record
}

pub fn with_award(mut record: NominationRecord, award_type: AwardType) -> NominationRecord {
    record.award_type = award_type;
    record
}

pub fn with_flags(mut record: NominationRecord, flags: &[&str]) -> NominationRecord {
    record.bias_flags = flags.iter().map(|f| f.to_string()).collect();
    record
}
