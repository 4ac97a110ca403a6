//! Authentication configuration: token signing, password hashing and password reset

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for HS256 signing
    pub secret: String,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// JWT audience claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Token validity in minutes (30 days)
    #[serde(default = "default_token_validity_minutes")]
    pub token_validity_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            issuer: default_issuer(),
            audience: default_audience(),
            token_validity_minutes: default_token_validity_minutes(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token validity in days
    pub fn with_validity_days(mut self, days: i64) -> Self {
        self.token_validity_minutes = days * 24 * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor (4..=31)
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

/// Forgot-password reset code configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResetCodeConfig {
    /// Minutes before an issued reset code expires
    #[serde(default = "default_reset_code_expiration")]
    pub expiration_minutes: i64,

    /// Whether a successful reset signs and returns a fresh token
    #[serde(default = "default_issue_token_on_reset")]
    pub issue_token_on_reset: bool,
}

impl Default for ResetCodeConfig {
    fn default() -> Self {
        Self {
            expiration_minutes: default_reset_code_expiration(),
            issue_token_on_reset: default_issue_token_on_reset(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,

    /// Password reset configuration
    #[serde(default)]
    pub reset_code: ResetCodeConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| default_issuer());
        let token_validity_minutes = std::env::var("JWT_TOKEN_VALIDITY_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_token_validity_minutes);
        let bcrypt_cost = std::env::var("PASSWORD_BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_bcrypt_cost);
        let expiration_minutes = std::env::var("RESET_CODE_EXPIRATION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_reset_code_expiration);

        Self {
            jwt: JwtConfig {
                secret,
                issuer,
                audience: default_audience(),
                token_validity_minutes,
            },
            password: PasswordConfig { bcrypt_cost },
            reset_code: ResetCodeConfig {
                expiration_minutes,
                issue_token_on_reset: default_issue_token_on_reset(),
            },
        }
    }
}

fn default_issuer() -> String {
    String::from("storefront")
}

fn default_audience() -> String {
    String::from("storefront-api")
}

fn default_token_validity_minutes() -> i64 {
    43_200
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_reset_code_expiration() -> i64 {
    15
}

fn default_issue_token_on_reset() -> bool {
    true
}
