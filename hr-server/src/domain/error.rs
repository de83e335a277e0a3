//! Domain error taxonomy
//!
//! Typed errors surfaced by the validation engine, the creation services
//! and the repositories. The HTTP layer maps these onto status codes in
//! `utils::error`.

use thiserror::Error;

use super::validate::ValidationReport;

/// Domain error types
#[derive(Debug, Error)]
pub enum DomainError {
    /// One or more validation violations, collected in a single pass.
    #[error("validation failed: {0}")]
    Validation(ValidationReport),

    /// A referenced natural key did not resolve.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Headcount maintenance failed after a committed employee write.
    #[error("headcount update failed for {department}: {reason}")]
    AggregateUpdate { department: String, reason: String },

    /// Store-level failure.
    #[error("database error: {0}")]
    Database(String),
}

impl DomainError {
    /// A single field-level violation, used by the wire mapper for
    /// type-shape failures.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut report = ValidationReport::default();
        report.field(field, message);
        DomainError::Validation(report)
    }

    /// Map a store error, surfacing unique-index violations as
    /// `NotUnique` so callers that raced past the pre-check still get a
    /// typed uniqueness error. Index names follow the `{table}_{field}`
    /// convention declared in `db::schema`.
    pub fn from_store(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        if message.contains("already contains") {
            if let Some(index) = message.split('`').nth(1) {
                let field = index.split_once('_').map(|(_, f)| f).unwrap_or(index);
                let mut report = ValidationReport::default();
                report.not_unique(field);
                return DomainError::Validation(report);
            }
        }
        DomainError::Database(message)
    }
}

impl From<surrealdb::Error> for DomainError {
    fn from(err: surrealdb::Error) -> Self {
        DomainError::from_store(err)
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
