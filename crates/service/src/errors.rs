use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid {field} '{value}': expected a YYYY-MM-DD date")]
    DateParse { field: &'static str, value: String },
    #[error("not found: {0}")]
    NotFound(String),
    /// A referenced entity (`"user"` or `"course"`) does not exist.
    #[error("{0} id doesn't exist")]
    Reference(String),
    #[error("database error: {0}")]
    Store(String),
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn reference(entity: &str) -> Self { Self::Reference(entity.to_string()) }

    pub fn store(e: impl std::fmt::Display) -> Self { Self::Store(e.to_string()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::DateParse { .. } => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Reference(_) => 1004,
            ServiceError::InvalidPagination(_) => 1005,
            ServiceError::Store(_) => 1200,
        }
    }

    /// Errors the caller can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ServiceError::Store(_))
    }
}

/// Reject empty (or whitespace-only) required text.
pub(crate) fn require(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Reject text wider than its storage column.
pub(crate) fn within(field: &str, value: &str, max: usize) -> Result<(), ServiceError> {
    if value.chars().count() > max {
        return Err(ServiceError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}
