//! Request payload for completing a forgot-password flow.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One-time code plus the new plaintext password
#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    /// Code issued by the forgot-password step
    #[validate(length(equal = 6))]
    pub code: String,

    /// New plaintext password
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,

    /// Must repeat `new_password`
    #[validate(must_match = "new_password")]
    pub confirm_password: String,
}

impl ResetPasswordRequest {
    pub fn new(code: impl Into<String>, new_password: impl Into<String>) -> Self {
        let new_password = new_password.into();
        Self {
            code: code.into(),
            confirm_password: new_password.clone(),
            new_password,
        }
    }
}

impl std::fmt::Debug for ResetPasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetPasswordRequest")
            .field("code", &"<redacted>")
            .field("new_password", &"<redacted>")
            .finish()
    }
}
