//! Unit tests for credential and user entities

use crate::domain::entities::{Credential, User};

#[test]
fn test_with_password_hash_keeps_login() {
    let credential = Credential::new("valid login", "valid password");
    let hashed = credential.with_password_hash("hashed password");

    assert_eq!(hashed.login, "valid login");
    assert_eq!(hashed.password, "hashed password");
    assert_eq!(credential.password, "valid password");
}

#[test]
fn test_debug_redacts_password() {
    let credential = Credential::new("valid login", "super secret");
    let debug = format!("{:?}", credential);

    assert!(debug.contains("valid login"));
    assert!(!debug.contains("super secret"));
}

#[test]
fn test_user_serializes_camel_case() {
    let user = User {
        email: "jane@example.com".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        phone_number: "+15550100".to_string(),
        address: "1 Main St".to_string(),
    };

    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["firstName"], "Jane");
    assert_eq!(json["phoneNumber"], "+15550100");
    assert_eq!(user.full_name(), "Jane Doe");
}

#[test]
fn test_user_with_email() {
    let user = User::with_email("user email");
    assert_eq!(user.email, "user email");
    assert!(user.first_name.is_empty());
    assert_eq!(user.full_name(), "");
}
