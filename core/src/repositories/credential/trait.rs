//! Credential repository trait defining the interface for login/password persistence.
//!
//! The repository owns login uniqueness. Implementations backed by a real
//! store must enforce it with a constraint; the use case's own pre-check is
//! advisory and races under concurrent sign-ups.

use async_trait::async_trait;

use crate::domain::entities::{Credential, User};
use crate::domain::value_objects::Lookup;
use crate::domain::RequestContext;
use crate::errors::DomainResult;

/// Repository trait for credential persistence operations
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Find the stored credential for a login
    ///
    /// # Returns
    /// * `Lookup::Found(Credential)` - Credential found, password is the stored hash
    /// * `Lookup::NotFound` - No credential for this login
    /// * `Lookup::Failed(DomainError)` - The backend could not answer
    async fn get_by_login(&self, ctx: &RequestContext, login: &str) -> Lookup<Credential>;

    /// Store a credential and its user profile as one unit
    ///
    /// Either both records are written or neither is. A duplicate login or
    /// email must fail with `AuthError::LoginAlreadyTaken` or
    /// `AuthError::EmailAlreadyRegistered` respectively.
    ///
    /// # Arguments
    /// * `credential` - Credential whose password is already hashed
    /// * `user` - Profile created alongside the credential
    async fn store_with_user(
        &self,
        ctx: &RequestContext,
        credential: &Credential,
        user: &User,
    ) -> DomainResult<()>;

    /// Replace the stored password hash for an existing login
    ///
    /// Fails with `AuthError::LoginNotFound` when the login does not exist.
    async fn update_password(
        &self,
        ctx: &RequestContext,
        login: &str,
        password_hash: &str,
    ) -> DomainResult<()>;
}
