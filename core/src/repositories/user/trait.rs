//! User repository trait defining the interface for user profile lookups.

use async_trait::async_trait;

use crate::domain::entities::User;
use crate::domain::value_objects::Lookup;
use crate::domain::RequestContext;

/// Repository trait for user profile lookups
///
/// Profiles are written through `CredentialRepository::store_with_user` so
/// that a user never exists without its credential.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email
    ///
    /// # Returns
    /// * `Lookup::Found(User)` - User found
    /// * `Lookup::NotFound` - No user registered with this email
    /// * `Lookup::Failed(DomainError)` - The backend could not answer
    async fn get_by_email(&self, ctx: &RequestContext, email: &str) -> Lookup<User>;
}
