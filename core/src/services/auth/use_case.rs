//! Object-safe facade over the authentication service

use async_trait::async_trait;

use crate::domain::entities::{Credential, Token, TokenInfo, User};
use crate::domain::value_objects::ResetPasswordRequest;
use crate::domain::RequestContext;
use crate::errors::DomainResult;
use crate::repositories::{CredentialRepository, ResetCodeRepository, UserRepository};
use crate::services::traits::{PasswordServiceTrait, ResetCodeNotifierTrait, TokenServiceTrait};

use super::service::AuthService;

/// Authentication operations exposed to the delivery layer
///
/// Lets callers hold an `Arc<dyn AuthUseCase>` without naming the
/// collaborator types.
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// Authenticate a credential and issue a token
    async fn login(&self, ctx: &RequestContext, credential: &Credential) -> DomainResult<Token>;

    /// Register a credential with its profile and issue a token
    async fn sign_up(
        &self,
        ctx: &RequestContext,
        credential: &Credential,
        user: &User,
    ) -> DomainResult<Token>;

    /// Issue and dispatch a reset code for a login
    async fn forgot_pass_code(&self, ctx: &RequestContext, login: &str) -> DomainResult<()>;

    /// Consume a reset code and set a new password
    async fn forgot_pass_reset(
        &self,
        ctx: &RequestContext,
        request: &ResetPasswordRequest,
    ) -> DomainResult<Option<Token>>;

    /// Validate a token and return its payload
    async fn verify_token(&self, ctx: &RequestContext, token: &Token) -> DomainResult<TokenInfo>;
}

#[async_trait]
impl<C, U, P, T, R, N> AuthUseCase for AuthService<C, U, P, T, R, N>
where
    C: CredentialRepository,
    U: UserRepository,
    P: PasswordServiceTrait,
    T: TokenServiceTrait,
    R: ResetCodeRepository,
    N: ResetCodeNotifierTrait,
{
    async fn login(&self, ctx: &RequestContext, credential: &Credential) -> DomainResult<Token> {
        AuthService::login(self, ctx, credential).await
    }

    async fn sign_up(
        &self,
        ctx: &RequestContext,
        credential: &Credential,
        user: &User,
    ) -> DomainResult<Token> {
        AuthService::sign_up(self, ctx, credential, user).await
    }

    async fn forgot_pass_code(&self, ctx: &RequestContext, login: &str) -> DomainResult<()> {
        AuthService::forgot_pass_code(self, ctx, login).await
    }

    async fn forgot_pass_reset(
        &self,
        ctx: &RequestContext,
        request: &ResetPasswordRequest,
    ) -> DomainResult<Option<Token>> {
        AuthService::forgot_pass_reset(self, ctx, request).await
    }

    async fn verify_token(&self, ctx: &RequestContext, token: &Token) -> DomainResult<TokenInfo> {
        AuthService::verify_token(self, ctx, token).await
    }
}
