//! Credential entity: a login identifier paired with a password.

use serde::{Deserialize, Serialize};

/// Login/password pair
///
/// The password is plaintext when the credential arrives from a caller and a
/// hash once it has been through the password service. Repositories only ever
/// receive and return the hashed form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Unique login identifier
    pub login: String,

    /// Plaintext on input, hash at rest
    pub password: String,
}

impl Credential {
    /// Creates a new credential
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    /// Returns a copy of this credential carrying `password_hash` instead of the password
    pub fn with_password_hash(&self, password_hash: impl Into<String>) -> Self {
        Self {
            login: self.login.clone(),
            password: password_hash.into(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}
