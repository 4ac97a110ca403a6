//! Traits for the password, token and notification collaborators of the auth use case

use async_trait::async_trait;

use crate::domain::entities::{Token, TokenInfo};
use crate::domain::RequestContext;
use crate::errors::DomainResult;

/// Trait for password hashing integration
#[async_trait]
pub trait PasswordServiceTrait: Send + Sync {
    /// Hash a plaintext password for storage
    async fn encode(&self, ctx: &RequestContext, password: &str) -> DomainResult<String>;
    /// Check a plaintext password against a stored hash
    async fn matches(&self, ctx: &RequestContext, password: &str, password_hash: &str) -> bool;
}

/// Trait for token signing integration
#[async_trait]
pub trait TokenServiceTrait: Send + Sync {
    /// Sign a token carrying `info` that stays valid for `validity_minutes`
    async fn sign(
        &self,
        ctx: &RequestContext,
        info: &TokenInfo,
        validity_minutes: i64,
    ) -> DomainResult<Token>;
    /// Verify a token and recover its payload
    async fn validate(&self, ctx: &RequestContext, token: &Token) -> DomainResult<TokenInfo>;
}

/// Trait for out-of-band delivery of password reset codes
#[async_trait]
pub trait ResetCodeNotifierTrait: Send + Sync {
    /// Deliver `code` to the owner of `login`
    async fn send_reset_code(&self, ctx: &RequestContext, login: &str, code: &str) -> DomainResult<()>;
}
