//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{AuthError, ErrorKind, TokenError};

use thiserror::Error;

/// Core domain errors
///
/// Every failure of an auth use case surfaces as one of these. Collaborator
/// failures are wrapped with the step that failed (lookup, storage, hashing,
/// notification, signing); business-rule violations bridge to [`AuthError`].
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Lookup failed: {message}")]
    Lookup { message: String },

    #[error("Storage failed: {message}")]
    Storage { message: String },

    #[error("Password hashing failed: {message}")]
    Hashing { message: String },

    #[error("Notification failed: {message}")]
    Notification { message: String },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn lookup(message: impl Into<String>) -> Self {
        DomainError::Lookup { message: message.into() }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage { message: message.into() }
    }

    pub fn hashing(message: impl Into<String>) -> Self {
        DomainError::Hashing { message: message.into() }
    }

    pub fn notification(message: impl Into<String>) -> Self {
        DomainError::Notification { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal { message: message.into() }
    }

    /// Classifies the error into the auth failure taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } => ErrorKind::Validation,
            DomainError::Lookup { .. } => ErrorKind::LookupFailure,
            DomainError::Storage { .. } => ErrorKind::StorageFailure,
            DomainError::Hashing { .. } => ErrorKind::HashingFailure,
            DomainError::Notification { .. } => ErrorKind::NotificationFailure,
            DomainError::Cancelled => ErrorKind::Cancelled,
            DomainError::Internal { .. } => ErrorKind::Internal,
            DomainError::Auth(err) => err.kind(),
            DomainError::Token(err) => err.kind(),
        }
    }

    /// Stable machine-readable code for outer layers
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::Lookup { .. } => "LOOKUP_FAILED",
            DomainError::Storage { .. } => "STORAGE_FAILED",
            DomainError::Hashing { .. } => "HASHING_FAILED",
            DomainError::Notification { .. } => "NOTIFICATION_FAILED",
            DomainError::Cancelled => "REQUEST_CANCELLED",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(err) => err.error_code(),
            DomainError::Token(err) => err.error_code(),
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        DomainError::Validation {
            message: format!("invalid fields: {}", fields.join(", ")),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
