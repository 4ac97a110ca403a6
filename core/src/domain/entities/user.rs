//! User entity representing a registered customer profile.

use serde::{Deserialize, Serialize};

/// User profile, keyed by email
///
/// Created together with a [`Credential`](super::Credential) during sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique email address
    pub email: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Contact phone number
    pub phone_number: String,

    /// Shipping address
    pub address: String,
}

impl User {
    /// Creates a user with only the email set
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
