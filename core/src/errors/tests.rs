//! Unit tests for domain error classification

use validator::Validate;

use super::*;
use crate::domain::ResetPasswordRequest;

#[test]
fn test_collaborator_failures_map_to_kinds() {
    assert_eq!(DomainError::lookup("db down").kind(), ErrorKind::LookupFailure);
    assert_eq!(DomainError::storage("insert failed").kind(), ErrorKind::StorageFailure);
    assert_eq!(DomainError::hashing("cost too high").kind(), ErrorKind::HashingFailure);
    assert_eq!(DomainError::notification("smtp down").kind(), ErrorKind::NotificationFailure);
    assert_eq!(DomainError::Cancelled.kind(), ErrorKind::Cancelled);
}

#[test]
fn test_auth_errors_map_to_kinds() {
    let conflict: DomainError = AuthError::LoginAlreadyTaken.into();
    assert_eq!(conflict.kind(), ErrorKind::Conflict);
    assert_eq!(conflict.error_code(), "LOGIN_ALREADY_TAKEN");

    let mismatch: DomainError = AuthError::InvalidCredentials.into();
    assert_eq!(mismatch.kind(), ErrorKind::CredentialMismatch);
    assert_eq!(mismatch.to_string(), "Invalid credentials");
}

#[test]
fn test_token_signing_failure_kind() {
    let err: DomainError = TokenError::signing_failed("bad key").into();
    assert_eq!(err.kind(), ErrorKind::SigningFailure);
    assert_eq!(err.error_code(), "TOKEN_SIGNING_FAILED");
    assert!(err.to_string().contains("bad key"));
}

#[test]
fn test_validation_errors_list_fields() {
    let request = ResetPasswordRequest::new("1", "short");
    let err: DomainError = request.validate().unwrap_err().into();

    match err {
        DomainError::Validation { message } => {
            assert_eq!(message, "invalid fields: code, new_password");
        }
        other => panic!("Expected validation error, got {:?}", other),
    }
}
