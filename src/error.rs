//! Error types for the nominations store and its services.

use std::fmt;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, AwardsError>;

/// Errors surfaced by store, query, submission and settings operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AwardsError {
    /// A nomination (or nominee) lookup found nothing.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// A caller passed a value outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// One or more form/settings fields failed validation.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// An export or report could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AwardsError {
    fn from(err: serde_json::Error) -> Self {
        AwardsError::Serialization(err.to_string())
    }
}

impl AwardsError {
    /// Shorthand for an unknown nomination id.
    pub fn nomination_not_found(id: impl Into<String>) -> Self {
        AwardsError::NotFound {
            kind: "nomination",
            key: id.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        AwardsError::InvalidArgument(message.into())
    }
}

/// A single failed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field failure collected during one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `field` has at least one failure.
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Converts the collection into `Ok(())` or a `Validation` error.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AwardsError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}
