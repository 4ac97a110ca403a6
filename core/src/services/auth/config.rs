//! Configuration for the authentication service

use ecom_shared::config::AuthConfig;

use crate::domain::entities::{DEFAULT_RESET_CODE_EXPIRATION_MINUTES, THIRTY_DAYS_IN_MINUTES};

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Validity of issued tokens in minutes
    pub token_validity_minutes: i64,
    /// Whether to allow registration of new users
    pub allow_registration: bool,
    /// Minutes before a reset code expires
    pub reset_code_expiration_minutes: i64,
    /// Whether a successful password reset signs and returns a token
    pub issue_token_on_reset: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            token_validity_minutes: THIRTY_DAYS_IN_MINUTES,
            allow_registration: true,
            reset_code_expiration_minutes: DEFAULT_RESET_CODE_EXPIRATION_MINUTES,
            issue_token_on_reset: true,
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            token_validity_minutes: config.jwt.token_validity_minutes,
            allow_registration: true,
            reset_code_expiration_minutes: config.reset_code.expiration_minutes,
            issue_token_on_reset: config.reset_code.issue_token_on_reset,
        }
    }
}
