//! Redis-backed storage for password reset codes
//!
//! Codes are stored as JSON with a TTL equal to their remaining lifetime,
//! so Redis drops expired codes on its own. Key patterns:
//! - `password_reset:code:{sha256(code)}` - The serialized `ResetCode`
//! - `password_reset:used:{sha256(code)}` - Present once the code is claimed
//! - `password_reset:login:{login}` - Hash of the latest code issued for a login
//!
//! Both the code key and the claim key are written with `SET NX`, so a live
//! code value belongs to one login and can be claimed once.
//!
//! The code value never appears in a key or a log line.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};

use ecom_core::domain::entities::ResetCode;
use ecom_core::domain::value_objects::Lookup;
use ecom_core::domain::RequestContext;
use ecom_core::errors::{AuthError, DomainError, DomainResult};
use ecom_core::repositories::ResetCodeRepository;
use ecom_shared::utils::mask_login;

use crate::cache::RedisClient;

/// Reset code repository on top of `RedisClient`
#[derive(Clone)]
pub struct RedisResetCodeRepository {
    redis_client: RedisClient,
}

impl RedisResetCodeRepository {
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    /// Hash a code so it can be used in a key
    fn hash_code(code: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(code.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn format_code_key(code_hash: &str) -> String {
        format!("password_reset:code:{}", code_hash)
    }

    fn format_used_key(code_hash: &str) -> String {
        format!("password_reset:used:{}", code_hash)
    }

    fn format_login_key(login: &str) -> String {
        format!("password_reset:login:{}", login)
    }

    /// Remaining lifetime in whole seconds, never below one
    fn expiry_seconds(code: &ResetCode) -> u64 {
        code.time_until_expiration().num_seconds().max(1) as u64
    }

    fn decode(payload: &str) -> DomainResult<ResetCode> {
        serde_json::from_str(payload)
            .map_err(|e| DomainError::storage(format!("Failed to decode reset code: {}", e)))
    }

    /// Stored code for a hash, if it has not expired yet
    async fn load(&self, code_hash: &str) -> DomainResult<Option<ResetCode>> {
        match self.redis_client.get(&Self::format_code_key(code_hash)).await? {
            Some(payload) => Self::decode(&payload).map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ResetCodeRepository for RedisResetCodeRepository {
    async fn save(&self, ctx: &RequestContext, code: &ResetCode) -> DomainResult<()> {
        ctx.ensure_active()?;

        let code_hash = Self::hash_code(&code.code);
        let payload = serde_json::to_string(code)
            .map_err(|e| DomainError::storage(format!("Failed to serialize reset code: {}", e)))?;
        let expiry = Self::expiry_seconds(code);

        let stored = self
            .redis_client
            .set_nx_with_expiry(&Self::format_code_key(&code_hash), &payload, expiry)
            .await?;
        if !stored {
            debug!(request_id = %ctx.request_id, "Reset code value already held");
            return Err(AuthError::ResetCodeCollision.into());
        }

        // A claim left by an earlier holder of this value outlives it by up to a second
        self.redis_client
            .delete(&[Self::format_used_key(&code_hash).as_str()])
            .await?;
        self.redis_client
            .set_with_expiry(&Self::format_login_key(&code.login), &code_hash, expiry)
            .await?;

        info!(
            request_id = %ctx.request_id,
            login = %mask_login(&code.login),
            expires_in = expiry,
            "Reset code stored"
        );
        Ok(())
    }

    async fn find_by_code(&self, ctx: &RequestContext, code: &str) -> Lookup<ResetCode> {
        if let Err(err) = ctx.ensure_active() {
            return Lookup::Failed(err);
        }

        let code_hash = Self::hash_code(code);
        let key = Self::format_code_key(&code_hash);
        let mut reset_code = match self.redis_client.get(&key).await {
            Ok(Some(payload)) => match serde_json::from_str::<ResetCode>(&payload) {
                Ok(reset_code) => reset_code,
                Err(e) => {
                    error!(request_id = %ctx.request_id, error = %e, "Corrupt reset code entry");
                    return Lookup::Failed(DomainError::lookup(format!(
                        "Failed to decode reset code: {}",
                        e
                    )));
                }
            },
            Ok(None) => {
                debug!(request_id = %ctx.request_id, "Reset code not found (expired or never issued)");
                return Lookup::NotFound;
            }
            Err(e) => {
                return Lookup::Failed(DomainError::lookup(format!("Reset code lookup failed: {}", e)))
            }
        };

        match self.redis_client.exists(&Self::format_used_key(&code_hash)).await {
            Ok(claimed) => {
                reset_code.is_used |= claimed;
                Lookup::Found(reset_code)
            }
            Err(e) => Lookup::Failed(DomainError::lookup(format!("Reset code lookup failed: {}", e))),
        }
    }

    async fn consume(&self, ctx: &RequestContext, code: &str) -> DomainResult<ResetCode> {
        ctx.ensure_active()?;

        let code_hash = Self::hash_code(code);
        let mut reset_code = self
            .load(&code_hash)
            .await?
            .ok_or(AuthError::InvalidResetCode)?;

        if reset_code.is_used {
            return Err(AuthError::InvalidResetCode.into());
        }
        if reset_code.is_expired() {
            return Err(AuthError::ResetCodeExpired.into());
        }

        let claimed = self
            .redis_client
            .set_nx_with_expiry(
                &Self::format_used_key(&code_hash),
                "1",
                Self::expiry_seconds(&reset_code),
            )
            .await?;
        if !claimed {
            debug!(request_id = %ctx.request_id, "Reset code already claimed");
            return Err(AuthError::InvalidResetCode.into());
        }

        reset_code.mark_as_used();
        debug!(
            request_id = %ctx.request_id,
            login = %mask_login(&reset_code.login),
            "Reset code claimed"
        );
        Ok(reset_code)
    }

    async fn release(&self, ctx: &RequestContext, code: &str) -> DomainResult<()> {
        ctx.ensure_active()?;

        let used_key = Self::format_used_key(&Self::hash_code(code));
        if self.redis_client.delete(&[used_key.as_str()]).await? > 0 {
            warn!(request_id = %ctx.request_id, "Reset code claim released");
        }
        Ok(())
    }

    async fn invalidate_for_login(&self, ctx: &RequestContext, login: &str) -> DomainResult<usize> {
        ctx.ensure_active()?;

        let login_key = Self::format_login_key(login);
        let Some(code_hash) = self.redis_client.get(&login_key).await? else {
            return Ok(0);
        };

        let mut invalidated = 0;
        // The value may have expired and been reissued to someone else
        if let Some(reset_code) = self.load(&code_hash).await? {
            if reset_code.login == login {
                let code_key = Self::format_code_key(&code_hash);
                let used_key = Self::format_used_key(&code_hash);
                let claimed = self.redis_client.exists(&used_key).await?;
                let removed = self
                    .redis_client
                    .delete(&[code_key.as_str(), used_key.as_str()])
                    .await?;
                if removed > 0 && !claimed && reset_code.is_live() {
                    invalidated = 1;
                }
            }
        }
        self.redis_client.delete(&[login_key.as_str()]).await?;

        if invalidated > 0 {
            debug!(
                request_id = %ctx.request_id,
                login = %mask_login(login),
                "Previous reset code invalidated"
            );
        }
        Ok(invalidated)
    }
}
