//! `UserRepository` for the in-memory account store

use async_trait::async_trait;

use crate::domain::entities::User;
use crate::domain::value_objects::Lookup;
use crate::domain::RequestContext;
use crate::repositories::credential::InMemoryAccountStore;

use super::trait_::UserRepository;

#[async_trait]
impl UserRepository for InMemoryAccountStore {
    async fn get_by_email(&self, ctx: &RequestContext, email: &str) -> Lookup<User> {
        if let Err(err) = ctx.ensure_active() {
            return Lookup::Failed(err);
        }

        let state = self.state.read().await;
        match state.users.get(email) {
            Some(user) => Lookup::Found(user.clone()),
            None => Lookup::NotFound,
        }
    }
}
