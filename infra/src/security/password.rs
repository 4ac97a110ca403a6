//! bcrypt implementation of the password service

use async_trait::async_trait;
use tracing::{debug, warn};

use ecom_core::domain::RequestContext;
use ecom_core::errors::{DomainError, DomainResult};
use ecom_core::services::PasswordServiceTrait;
use ecom_shared::config::PasswordConfig;

use crate::InfrastructureError;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Password service backed by bcrypt
///
/// Hashing runs on the blocking thread pool since a single hash at cost 12
/// takes a few hundred milliseconds.
#[derive(Debug, Clone)]
pub struct BcryptPasswordService {
    cost: u32,
}

impl BcryptPasswordService {
    /// Create a service hashing with `cost` rounds (4..=31)
    pub fn new(cost: u32) -> Result<Self, InfrastructureError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(InfrastructureError::Config(format!(
                "bcrypt cost must be between {} and {}, got {}",
                MIN_COST, MAX_COST, cost
            )));
        }
        Ok(Self { cost })
    }

    pub fn from_config(config: &PasswordConfig) -> Result<Self, InfrastructureError> {
        Self::new(config.bcrypt_cost)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

#[async_trait]
impl PasswordServiceTrait for BcryptPasswordService {
    async fn encode(&self, ctx: &RequestContext, password: &str) -> DomainResult<String> {
        ctx.ensure_active()?;

        let password = password.to_string();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::hashing(format!("Hashing task failed: {}", e)))?
            .map_err(|e| DomainError::hashing(e.to_string()))?;

        debug!(request_id = %ctx.request_id, cost, "Password hashed");
        Ok(hash)
    }

    async fn matches(&self, ctx: &RequestContext, password: &str, password_hash: &str) -> bool {
        if ctx.is_cancelled() {
            return false;
        }

        let password = password.to_string();
        let password_hash = password_hash.to_string();
        match tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash)).await {
            Ok(Ok(matched)) => matched,
            Ok(Err(e)) => {
                warn!(request_id = %ctx.request_id, error = %e, "Stored password hash is malformed");
                false
            }
            Err(e) => {
                warn!(request_id = %ctx.request_id, error = %e, "Password verification task failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecom_core::errors::ErrorKind;

    fn service() -> BcryptPasswordService {
        BcryptPasswordService::new(MIN_COST).unwrap()
    }

    #[test]
    fn test_cost_bounds() {
        assert!(BcryptPasswordService::new(3).is_err());
        assert!(BcryptPasswordService::new(32).is_err());
        assert_eq!(BcryptPasswordService::new(10).unwrap().cost(), 10);
        assert_eq!(
            BcryptPasswordService::from_config(&PasswordConfig::default()).unwrap().cost(),
            10
        );
    }

    #[tokio::test]
    async fn test_hash_is_salted_and_verifies() {
        let svc = service();
        let ctx = RequestContext::new();

        let first = svc.encode(&ctx, "valid password").await.unwrap();
        let second = svc.encode(&ctx, "valid password").await.unwrap();

        assert!(first.starts_with("$2b$04$"));
        assert_ne!(first, second);
        assert_ne!(first, "valid password");
        assert!(svc.matches(&ctx, "valid password", &first).await);
        assert!(svc.matches(&ctx, "valid password", &second).await);
        assert!(!svc.matches(&ctx, "wrong password", &first).await);
    }

    #[tokio::test]
    async fn test_malformed_hash_is_a_mismatch() {
        let svc = service();
        let ctx = RequestContext::new();

        assert!(!svc.matches(&ctx, "valid password", "not-a-bcrypt-hash").await);
        assert!(!svc.matches(&ctx, "valid password", "").await);
    }

    #[tokio::test]
    async fn test_cancelled_context() {
        let svc = service();
        let ctx = RequestContext::new();
        let hash = svc.encode(&ctx, "valid password").await.unwrap();
        ctx.cancel_token.cancel();

        let err = svc.encode(&ctx, "valid password").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert!(!svc.matches(&ctx, "valid password", &hash).await);
    }
}
