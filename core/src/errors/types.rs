//! Error types for authentication and token operations
//!
//! Messages are stable English strings; outer layers translate them by
//! `error_code()` when presenting them to users.

use thiserror::Error;

/// Failure categories every auth error falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A repository could not answer a lookup
    LookupFailure,
    /// A login or email is already in use
    Conflict,
    /// Credentials or a reset code did not check out
    CredentialMismatch,
    /// The referenced login does not exist
    NotFound,
    /// The password service failed to hash
    HashingFailure,
    /// The token service failed to sign or validate
    SigningFailure,
    /// A repository failed to persist
    StorageFailure,
    /// A reset code could not be dispatched
    NotificationFailure,
    /// The request payload is malformed
    Validation,
    /// The caller cancelled the request
    Cancelled,
    /// Anything else
    Internal,
}

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Login already taken")]
    LoginAlreadyTaken,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Login not found")]
    LoginNotFound,

    #[error("Invalid reset code")]
    InvalidResetCode,

    #[error("Reset code expired")]
    ResetCodeExpired,

    #[error("Reset code value already in use")]
    ResetCodeCollision,

    #[error("Registration disabled")]
    RegistrationDisabled,
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::InvalidResetCode
            | AuthError::ResetCodeExpired => ErrorKind::CredentialMismatch,
            AuthError::LoginAlreadyTaken
            | AuthError::EmailAlreadyRegistered
            | AuthError::ResetCodeCollision => ErrorKind::Conflict,
            AuthError::LoginNotFound => ErrorKind::NotFound,
            AuthError::RegistrationDisabled => ErrorKind::Validation,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::LoginAlreadyTaken => "LOGIN_ALREADY_TAKEN",
            AuthError::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            AuthError::LoginNotFound => "LOGIN_NOT_FOUND",
            AuthError::InvalidResetCode => "INVALID_RESET_CODE",
            AuthError::ResetCodeExpired => "RESET_CODE_EXPIRED",
            AuthError::ResetCodeCollision => "RESET_CODE_COLLISION",
            AuthError::RegistrationDisabled => "REGISTRATION_DISABLED",
        }
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signing failed: {message}")]
    SigningFailed { message: String },

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,
}

impl TokenError {
    pub fn signing_failed(message: impl Into<String>) -> Self {
        TokenError::SigningFailed { message: message.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::SigningFailed { .. } => ErrorKind::SigningFailure,
            _ => ErrorKind::CredentialMismatch,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::SigningFailed { .. } => "TOKEN_SIGNING_FAILED",
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::InvalidClaims => "INVALID_CLAIMS",
        }
    }
}
