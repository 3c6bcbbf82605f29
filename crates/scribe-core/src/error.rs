//! Module-level error types.

use std::fmt;

use thiserror::Error;

/// One failed validation rule, tied to the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Field-level validation failures collected over a whole draft.
///
/// Nothing is persisted while this is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Fields that failed, in the order the rules ran.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }

    /// `Ok(())` when no rule failed, the collected errors otherwise.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{} {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i64 },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A required collaborator capability or setting is missing. Raised
    /// eagerly at the point of use and never retried.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Shorthand for a single-field validation failure.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::default();
        errors.add(field, message);
        DomainError::Validation(errors)
    }
}

/// Storage-level errors, produced by port implementations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Storage connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::Internal("entity disappeared mid-operation".to_string()),
            RepoError::Connection(msg) | RepoError::Query(msg) | RepoError::Constraint(msg) => {
                DomainError::Internal(msg)
            }
        }
    }
}
