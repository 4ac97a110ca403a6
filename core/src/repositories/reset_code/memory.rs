//! In-memory implementation of ResetCodeRepository for testing and local development

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::ResetCode;
use crate::domain::value_objects::Lookup;
use crate::domain::RequestContext;
use crate::errors::{AuthError, DomainResult};

use super::trait_::ResetCodeRepository;

/// Reset codes keyed by code value
///
/// Expired codes are pruned on every `save`; a login's codes are removed
/// when it is invalidated.
#[derive(Clone, Default)]
pub struct InMemoryResetCodeRepository {
    pub(super) codes: Arc<RwLock<HashMap<String, ResetCode>>>,
}

impl InMemoryResetCodeRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// All codes held for a login, used or not
    pub async fn codes_for_login(&self, login: &str) -> Vec<ResetCode> {
        let codes = self.codes.read().await;
        codes.values().filter(|c| c.login == login).cloned().collect()
    }

    /// Live codes issued for a login
    pub async fn live_codes_for_login(&self, login: &str) -> Vec<ResetCode> {
        self.codes_for_login(login)
            .await
            .into_iter()
            .filter(ResetCode::is_live)
            .collect()
    }

    /// Number of codes currently held
    pub async fn code_count(&self) -> usize {
        self.codes.read().await.len()
    }
}

#[async_trait]
impl ResetCodeRepository for InMemoryResetCodeRepository {
    async fn save(&self, ctx: &RequestContext, code: &ResetCode) -> DomainResult<()> {
        ctx.ensure_active()?;

        let mut codes = self.codes.write().await;
        codes.retain(|_, held| !held.is_expired());

        match codes.entry(code.code.clone()) {
            Entry::Occupied(_) => Err(AuthError::ResetCodeCollision.into()),
            Entry::Vacant(slot) => {
                slot.insert(code.clone());
                Ok(())
            }
        }
    }

    async fn find_by_code(&self, ctx: &RequestContext, code: &str) -> Lookup<ResetCode> {
        if let Err(err) = ctx.ensure_active() {
            return Lookup::Failed(err);
        }

        let codes = self.codes.read().await;
        match codes.get(code) {
            Some(reset_code) => Lookup::Found(reset_code.clone()),
            None => Lookup::NotFound,
        }
    }

    async fn consume(&self, ctx: &RequestContext, code: &str) -> DomainResult<ResetCode> {
        ctx.ensure_active()?;

        let mut codes = self.codes.write().await;
        let reset_code = codes.get_mut(code).ok_or(AuthError::InvalidResetCode)?;

        if reset_code.is_used {
            return Err(AuthError::InvalidResetCode.into());
        }
        if reset_code.is_expired() {
            return Err(AuthError::ResetCodeExpired.into());
        }

        reset_code.mark_as_used();
        Ok(reset_code.clone())
    }

    async fn release(&self, ctx: &RequestContext, code: &str) -> DomainResult<()> {
        ctx.ensure_active()?;

        let mut codes = self.codes.write().await;
        if let Some(reset_code) = codes.get_mut(code) {
            reset_code.is_used = false;
        }
        Ok(())
    }

    async fn invalidate_for_login(&self, ctx: &RequestContext, login: &str) -> DomainResult<usize> {
        ctx.ensure_active()?;

        let mut codes = self.codes.write().await;
        let mut count = 0;
        codes.retain(|_, held| {
            if held.login != login {
                return true;
            }
            if held.is_live() {
                count += 1;
            }
            false
        });
        Ok(count)
    }
}
