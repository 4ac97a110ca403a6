//! In-memory account store implementing the credential and user repositories

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{Credential, User};
use crate::domain::value_objects::Lookup;
use crate::domain::RequestContext;
use crate::errors::{AuthError, DomainResult};

use super::trait_::CredentialRepository;

#[derive(Default)]
pub(crate) struct AccountState {
    pub(crate) credentials: HashMap<String, Credential>,
    pub(crate) users: HashMap<String, User>,
}

/// Credentials and user profiles kept behind a single lock
///
/// Sharing one lock makes `store_with_user` atomic and lets it enforce
/// login and email uniqueness the way a database constraint would.
/// Clones share the same state.
#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    pub(crate) state: Arc<RwLock<AccountState>>,
}

impl InMemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials
    pub async fn credential_count(&self) -> usize {
        self.state.read().await.credentials.len()
    }

    /// Number of stored user profiles
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryAccountStore {
    async fn get_by_login(&self, ctx: &RequestContext, login: &str) -> Lookup<Credential> {
        if let Err(err) = ctx.ensure_active() {
            return Lookup::Failed(err);
        }

        let state = self.state.read().await;
        match state.credentials.get(login) {
            Some(credential) => Lookup::Found(credential.clone()),
            None => Lookup::NotFound,
        }
    }

    async fn store_with_user(
        &self,
        ctx: &RequestContext,
        credential: &Credential,
        user: &User,
    ) -> DomainResult<()> {
        ctx.ensure_active()?;

        let mut state = self.state.write().await;

        if state.credentials.contains_key(&credential.login) {
            return Err(AuthError::LoginAlreadyTaken.into());
        }
        if state.users.contains_key(&user.email) {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        state
            .credentials
            .insert(credential.login.clone(), credential.clone());
        state.users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn update_password(
        &self,
        ctx: &RequestContext,
        login: &str,
        password_hash: &str,
    ) -> DomainResult<()> {
        ctx.ensure_active()?;

        let mut state = self.state.write().await;
        match state.credentials.get_mut(login) {
            Some(credential) => {
                credential.password = password_hash.to_string();
                Ok(())
            }
            None => Err(AuthError::LoginNotFound.into()),
        }
    }
}
