//! Token entities for authenticated sessions.

use serde::{Deserialize, Serialize};

/// Validity window of tokens issued by login, sign-up and password reset (30 days)
pub const THIRTY_DAYS_IN_MINUTES: i64 = 43_200;

/// Payload signed into a token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Login identifier the token was issued for
    pub info: String,
}

impl TokenInfo {
    pub fn new(info: impl Into<String>) -> Self {
        Self { info: info.into() }
    }
}

/// Opaque signed token
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(pub String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token(value.to_string())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
