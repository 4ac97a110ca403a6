//! Reset code repository trait for the forgot-password flow.

use async_trait::async_trait;

use crate::domain::entities::ResetCode;
use crate::domain::value_objects::Lookup;
use crate::domain::RequestContext;
use crate::errors::DomainResult;

/// Storage for issued one-time reset codes
///
/// Codes are looked up by value alone, so a value is held by at most one
/// unexpired code at a time. Implementations may drop expired codes on
/// their own (e.g. with a TTL).
#[async_trait]
pub trait ResetCodeRepository: Send + Sync {
    /// Persist a freshly issued code
    ///
    /// # Errors
    /// * `AuthError::ResetCodeCollision` - The value is held by another unexpired code
    async fn save(&self, ctx: &RequestContext, code: &ResetCode) -> DomainResult<()>;

    /// Find an issued code by its value
    async fn find_by_code(&self, ctx: &RequestContext, code: &str) -> Lookup<ResetCode>;

    /// Atomically claim a live code, marking it used
    ///
    /// Of several concurrent calls for the same code at most one succeeds.
    ///
    /// # Errors
    /// * `AuthError::InvalidResetCode` - Unknown or already used code
    /// * `AuthError::ResetCodeExpired` - Code past its expiry
    async fn consume(&self, ctx: &RequestContext, code: &str) -> DomainResult<ResetCode>;

    /// Return a claimed code to the live state
    ///
    /// A no-op when the code no longer exists.
    async fn release(&self, ctx: &RequestContext, code: &str) -> DomainResult<()>;

    /// Invalidate every outstanding code for a login
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of live codes invalidated
    async fn invalidate_for_login(&self, ctx: &RequestContext, login: &str) -> DomainResult<usize>;
}
