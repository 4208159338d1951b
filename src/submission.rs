//! Nomination form validation and submission.

use crate::error::{AwardsError, FieldErrors, Result};
use crate::generator::new_id;
use crate::models::{
    AwardType, CoreValue, Evidence, NominationRecord, NominationStatus, SupportingDocument, User,
};
use crate::store::NominationStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Minimum length of the nomination verbiage.
pub const MIN_VERBIAGE_CHARS: usize = 50;
/// Largest accepted supporting document.
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "png", "jpg", "jpeg", "gif"];
/// Sentiment given to a submission before any scoring has run.
pub const NEUTRAL_SENTIMENT: f64 = 0.5;

/// A file offered with the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub name: String,
    pub size: u64,
}

impl DocumentUpload {
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

/// Data entered on the submit-nomination form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NominationForm {
    /// Nominee's full name, resolved against the user directory.
    pub resource_name: String,
    pub award_type: Option<AwardType>,
    /// Only required for delivery team members, so never validated.
    pub project_aligned: Option<String>,
    pub verbiage: String,
    pub supporting_acknowledgement: String,
    pub core_values: Vec<CoreValue>,
    pub overall_rating: u8,
    #[serde(default)]
    pub supporting_documents: Vec<DocumentUpload>,
}

impl NominationForm {
    /// Check every field and collect all failures.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if self.resource_name.trim().is_empty() {
            errors.push("resource_name", "Resource name is required");
        }
        if self.award_type.is_none() {
            errors.push("award_type", "Award type is required");
        }
        if self.verbiage.trim().is_empty() {
            errors.push("verbiage", "Nomination description is required");
        } else if self.verbiage.trim().chars().count() < MIN_VERBIAGE_CHARS {
            errors.push(
                "verbiage",
                format!("Please provide at least {} characters", MIN_VERBIAGE_CHARS),
            );
        }
        if self.supporting_acknowledgement.trim().is_empty() {
            errors.push("supporting_acknowledgement", "Supporting acknowledgement is required");
        }
        if self.core_values.is_empty() {
            errors.push("core_values", "Select at least one core value");
        }
        if !(1..=5).contains(&self.overall_rating) {
            errors.push("overall_rating", "Please select a rating");
        }

        for doc in &self.supporting_documents {
            match doc.extension() {
                Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => {}
                _ => errors.push(
                    "supporting_documents",
                    format!("{}: unsupported file type", doc.name),
                ),
            }
            if doc.size > MAX_DOCUMENT_BYTES {
                errors.push(
                    "supporting_documents",
                    format!("{}: larger than 10MB", doc.name),
                );
            }
        }

        errors
    }
}

fn to_document(upload: &DocumentUpload, now: DateTime<Utc>) -> SupportingDocument {
    let id = new_id();
    SupportingDocument {
        url: format!("uploads/{}/{}", id, upload.name),
        id,
        name: upload.name.clone(),
        doc_type: upload.extension().unwrap_or_default(),
        size: upload.size,
        uploaded_at: now,
    }
}

/// Validate `form`, resolve the nominee and append a pending nomination.
///
/// The nominee is looked up by name (case-insensitive) in `users`.
pub fn submit(
    store: &NominationStore,
    users: &[User],
    nominator: &User,
    form: &NominationForm,
    now: DateTime<Utc>,
) -> Result<NominationRecord> {
    form.validate().into_result()?;

    let wanted = form.resource_name.trim().to_lowercase();
    let employee = users
        .iter()
        .find(|u| u.name.to_lowercase() == wanted)
        .ok_or_else(|| AwardsError::NotFound {
            kind: "nominee",
            key: form.resource_name.trim().to_string(),
        })?;

    if employee.id == nominator.id {
        let mut errors = FieldErrors::default();
        errors.push("resource_name", "You cannot nominate yourself");
        return Err(AwardsError::Validation(errors));
    }

    let award_type = form
        .award_type
        .ok_or_else(|| AwardsError::invalid("award type missing after validation"))?;

    let mut core_values = form.core_values.clone();
    core_values.sort();
    core_values.dedup();

    let record = NominationRecord {
        id: new_id(),
        employee_name: employee.name.clone(),
        employee_id: employee.id.clone(),
        department: employee.department.clone(),
        nominator_name: nominator.name.clone(),
        nominator_id: nominator.id.clone(),
        award_type,
        title: format!("{} nomination for {}", award_type, employee.name),
        description: form.verbiage.trim().to_string(),
        resource_name: employee.name.clone(),
        project_aligned: form
            .project_aligned
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from),
        verbiage: form.verbiage.trim().to_string(),
        supporting_acknowledgement: form.supporting_acknowledgement.trim().to_string(),
        core_values,
        overall_rating: form.overall_rating,
        supporting_documents: form
            .supporting_documents
            .iter()
            .map(|d| to_document(d, now))
            .collect(),
        sentiment_score: NEUTRAL_SENTIMENT,
        bias_flags: Vec::new(),
        date_submitted: now,
        status: NominationStatus::Pending,
        evidence: Evidence::default(),
    };

    store.insert(record.clone())?;
    info!(
        "Nomination {} submitted for {} by {}",
        record.id, record.employee_name, record.nominator_name
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use crate::test_support::at;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            role: UserRole::Employee,
            department: "Engineering".to_string(),
        }
    }

    fn valid_form() -> NominationForm {
        NominationForm {
            resource_name: "grace hopper".to_string(),
            award_type: Some(AwardType::Quarterly),
            project_aligned: Some("  ".to_string()),
            verbiage: "Led the compiler migration and mentored three new engineers along the way."
                .to_string(),
            supporting_acknowledgement: "The platform team lead praised the rollout.".to_string(),
            core_values: vec![CoreValue::Ownership, CoreValue::Innovation, CoreValue::Ownership],
            overall_rating: 5,
            supporting_documents: vec![DocumentUpload {
                name: "Feedback.PDF".to_string(),
                size: 2048,
            }],
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(valid_form().validate().is_empty());
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = NominationForm::default().validate();
        for field in [
            "resource_name",
            "award_type",
            "verbiage",
            "supporting_acknowledgement",
            "core_values",
            "overall_rating",
        ] {
            assert!(errors.has(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_short_verbiage() {
        let form = NominationForm {
            verbiage: "Great job".to_string(),
            ..valid_form()
        };
        let errors = form.validate();
        assert!(errors.has("verbiage"));
        assert_eq!(errors.0.len(), 1);
    }

    #[test]
    fn test_document_rules() {
        let form = NominationForm {
            supporting_documents: vec![
                DocumentUpload {
                    name: "run.exe".to_string(),
                    size: 10,
                },
                DocumentUpload {
                    name: "huge.png".to_string(),
                    size: MAX_DOCUMENT_BYTES + 1,
                },
            ],
            ..valid_form()
        };
        let errors = form.validate();
        assert_eq!(errors.0.len(), 2);
        assert!(errors.0.iter().all(|e| e.field == "supporting_documents"));
    }

    #[test]
    fn test_submit_appends_pending_record() {
        let store = NominationStore::default();
        let users = vec![user("u1", "Grace Hopper"), user("u2", "Alan Turing")];
        let now = at(2024, 4, 2);

        let record = submit(&store, &users, &users[1], &valid_form(), now).unwrap();
        assert_eq!(record.employee_id, "u1");
        assert_eq!(record.nominator_id, "u2");
        assert_eq!(record.status, NominationStatus::Pending);
        assert_eq!(record.date_submitted, now);
        assert_eq!(record.core_values, vec![CoreValue::Innovation, CoreValue::Ownership]);
        assert_eq!(record.project_aligned, None);
        assert_eq!(record.supporting_documents[0].doc_type, "pdf");
        assert!(!record.has_bias_issues());
        assert_eq!(store.get(&record.id).unwrap(), record);
    }

    #[test]
    fn test_submit_unknown_nominee() {
        let store = NominationStore::default();
        let users = vec![user("u2", "Alan Turing")];
        let err = submit(&store, &users, &users[0], &valid_form(), at(2024, 4, 2)).unwrap_err();
        assert!(matches!(err, AwardsError::NotFound { kind: "nominee", .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_submit_rejects_self_nomination() {
        let store = NominationStore::default();
        let users = vec![user("u1", "Grace Hopper")];
        let err = submit(&store, &users, &users[0], &valid_form(), at(2024, 4, 2)).unwrap_err();
        assert!(matches!(err, AwardsError::Validation(ref e) if e.has("resource_name")));
    }

    #[test]
    fn test_invalid_form_is_not_stored() {
        let store = NominationStore::default();
        let users = vec![user("u1", "Grace Hopper"), user("u2", "Alan Turing")];
        let err = submit(&store, &users, &users[1], &NominationForm::default(), at(2024, 4, 2))
            .unwrap_err();
        assert!(matches!(err, AwardsError::Validation(_)));
        assert!(store.is_empty());
    }
}
