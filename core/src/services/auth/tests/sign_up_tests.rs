//! Unit tests for the sign-up flow

use crate::domain::entities::{Credential, Token, TokenInfo, User, THIRTY_DAYS_IN_MINUTES};
use crate::domain::RequestContext;
use crate::errors::{AuthError, DomainError, ErrorKind, TokenError};
use crate::services::auth::AuthServiceConfig;

use super::mocks::*;

struct Setup {
    existing_credential: Scripted<Credential>,
    existing_user: Scripted<User>,
    encode_error: Option<ErrorFactory>,
    store_error: Option<ErrorFactory>,
    sign_error: Option<ErrorFactory>,
    config: AuthServiceConfig,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            existing_credential: Scripted::NotFound,
            existing_user: Scripted::NotFound,
            encode_error: None,
            store_error: None,
            sign_error: None,
            config: AuthServiceConfig::default(),
        }
    }
}

impl Setup {
    fn build(self) -> Harness {
        let log = CallLog::default();
        let mut credentials = MockCredentialRepository::new(log.clone(), self.existing_credential);
        credentials.store_error = self.store_error;
        let mut passwords = MockPasswordService::new(log.clone(), "hashed password", true);
        passwords.encode_error = self.encode_error;
        let mut tokens = MockTokenService::new(log.clone(), "valid token");
        tokens.sign_error = self.sign_error;
        Harness::new(
            log.clone(),
            credentials,
            MockUserRepository::new(log.clone(), self.existing_user),
            passwords,
            tokens,
            MockResetCodeRepository::new(log.clone()),
            MockNotifier::new(log),
            self.config,
        )
    }
}

fn new_credential() -> Credential {
    Credential::new("valid login", "valid password")
}

fn new_user() -> User {
    User {
        email: "buyer@example.com".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        phone_number: "+15550100".to_string(),
        address: "12 Market Street".to_string(),
    }
}

#[tokio::test]
async fn test_sign_up_success_returns_valid_token() {
    let h = Setup::default().build();
    let ctx = RequestContext::new();

    let token = h
        .service
        .sign_up(&ctx, &new_credential(), &new_user())
        .await
        .unwrap();

    assert_eq!(token, Token::from("valid token"));
    assert_eq!(
        h.log.calls(),
        vec![
            "credential.get_by_login",
            "user.get_by_email",
            "password.encode",
            "credential.store_with_user",
            "token.sign",
        ]
    );
}

#[tokio::test]
async fn test_sign_up_stores_hashed_password_never_plaintext() {
    let h = Setup::default().build();
    let ctx = RequestContext::new();

    h.service
        .sign_up(&ctx, &new_credential(), &new_user())
        .await
        .unwrap();

    assert_eq!(
        h.passwords.encoded.lock().unwrap().clone(),
        vec!["valid password".to_string()]
    );
    let stored = h.credentials.stored.lock().unwrap().clone();
    assert_eq!(stored.len(), 1);
    let (credential, user) = &stored[0];
    assert_eq!(credential.login, "valid login");
    assert_eq!(credential.password, "hashed password");
    assert_ne!(credential.password, "valid password");
    assert_eq!(user, &new_user());
}

#[tokio::test]
async fn test_sign_up_signs_original_login_for_thirty_days() {
    let h = Setup::default().build();
    let ctx = RequestContext::new();

    h.service
        .sign_up(&ctx, &new_credential(), &new_user())
        .await
        .unwrap();

    assert_eq!(
        h.tokens.last_signed(),
        Some((TokenInfo::new("valid login"), THIRTY_DAYS_IN_MINUTES))
    );
    assert_eq!(THIRTY_DAYS_IN_MINUTES, 43_200);
}

#[tokio::test]
async fn test_sign_up_existing_login_skips_user_lookup_hashing_and_storage() {
    let h = Setup {
        existing_credential: Scripted::Found(Credential::new("valid login", "old hash")),
        ..Setup::default()
    }
    .build();
    let ctx = RequestContext::new();

    let err = h
        .service
        .sign_up(&ctx, &new_credential(), &new_user())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Auth(AuthError::LoginAlreadyTaken)));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(h.users.lookup_count(), 0);
    assert_eq!(h.passwords.encode_count(), 0);
    assert_eq!(h.credentials.store_count(), 0);
    assert_eq!(h.tokens.sign_count(), 0);
}

#[tokio::test]
async fn test_sign_up_existing_email_never_stores() {
    let h = Setup {
        existing_user: Scripted::Found(new_user()),
        ..Setup::default()
    }
    .build();
    let ctx = RequestContext::new();

    let err = h
        .service
        .sign_up(&ctx, &new_credential(), &new_user())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Auth(AuthError::EmailAlreadyRegistered)));
    assert_eq!(
        h.users.lookups.lock().unwrap().clone(),
        vec!["buyer@example.com".to_string()]
    );
    assert_eq!(h.credentials.store_count(), 0);
    assert_eq!(h.tokens.sign_count(), 0);
}

#[tokio::test]
async fn test_sign_up_lookup_failures_are_propagated() {
    let ctx = RequestContext::new();

    let h = Setup {
        existing_credential: Scripted::Failed(|| DomainError::lookup("timeout")),
        ..Setup::default()
    }
    .build();
    let err = h
        .service
        .sign_up(&ctx, &new_credential(), &new_user())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LookupFailure);
    assert_eq!(h.users.lookup_count(), 0);

    let h = Setup {
        existing_user: Scripted::Failed(|| DomainError::lookup("timeout")),
        ..Setup::default()
    }
    .build();
    let err = h
        .service
        .sign_up(&ctx, &new_credential(), &new_user())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LookupFailure);
    assert_eq!(h.passwords.encode_count(), 0);
}

#[tokio::test]
async fn test_sign_up_hashing_failure_skips_storage() {
    let h = Setup {
        encode_error: Some(|| DomainError::hashing("cost out of range")),
        ..Setup::default()
    }
    .build();
    let ctx = RequestContext::new();

    let err = h
        .service
        .sign_up(&ctx, &new_credential(), &new_user())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HashingFailure);
    assert_eq!(h.credentials.store_count(), 0);
}

#[tokio::test]
async fn test_sign_up_storage_conflict_is_authoritative() {
    // Both pre-checks pass but the store reports a concurrent registration.
    let h = Setup {
        store_error: Some(|| AuthError::LoginAlreadyTaken.into()),
        ..Setup::default()
    }
    .build();
    let ctx = RequestContext::new();

    let err = h
        .service
        .sign_up(&ctx, &new_credential(), &new_user())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Auth(AuthError::LoginAlreadyTaken)));
    assert_eq!(h.tokens.sign_count(), 0);
}

#[tokio::test]
async fn test_sign_up_storage_failure_is_propagated() {
    let h = Setup {
        store_error: Some(|| DomainError::storage("deadlock")),
        ..Setup::default()
    }
    .build();
    let ctx = RequestContext::new();

    let err = h
        .service
        .sign_up(&ctx, &new_credential(), &new_user())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::StorageFailure);
    assert_eq!(h.tokens.sign_count(), 0);
}

#[tokio::test]
async fn test_sign_up_signing_failure_is_propagated() {
    let h = Setup {
        sign_error: Some(|| TokenError::signing_failed("key unavailable").into()),
        ..Setup::default()
    }
    .build();
    let ctx = RequestContext::new();

    let err = h
        .service
        .sign_up(&ctx, &new_credential(), &new_user())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SigningFailure);
    // The account exists even though no token came back
    assert_eq!(h.credentials.store_count(), 1);
    assert_eq!(h.tokens.sign_count(), 1);
    assert_eq!(
        h.log.calls().last().copied(),
        Some("token.sign")
    );
}

#[tokio::test]
async fn test_sign_up_rejected_when_registration_disabled() {
    let h = Setup {
        config: AuthServiceConfig {
            allow_registration: false,
            ..AuthServiceConfig::default()
        },
        ..Setup::default()
    }
    .build();
    let ctx = RequestContext::new();

    let err = h
        .service
        .sign_up(&ctx, &new_credential(), &new_user())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Auth(AuthError::RegistrationDisabled)));
    assert!(h.log.calls().is_empty());
}
