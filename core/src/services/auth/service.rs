//! Main authentication use case implementation

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::domain::entities::{Credential, ResetCode, Token, TokenInfo, User};
use crate::domain::value_objects::{Lookup, ResetPasswordRequest};
use crate::domain::RequestContext;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{CredentialRepository, ResetCodeRepository, UserRepository};
use crate::services::traits::{PasswordServiceTrait, ResetCodeNotifierTrait, TokenServiceTrait};

use super::config::AuthServiceConfig;

/// Fresh values drawn before giving up on a colliding reset code
pub const MAX_RESET_CODE_ATTEMPTS: usize = 5;

/// Authentication service coordinating login, sign-up and password reset
///
/// Every flow is a fixed sequence of collaborator calls that stops at the
/// first failure. The service holds no mutable state; the request context is
/// forwarded untouched to each collaborator.
pub struct AuthService<C, U, P, T, R, N>
where
    C: CredentialRepository,
    U: UserRepository,
    P: PasswordServiceTrait,
    T: TokenServiceTrait,
    R: ResetCodeRepository,
    N: ResetCodeNotifierTrait,
{
    /// Credential repository for login lookups and storage
    credential_repository: Arc<C>,
    /// User repository for email lookups
    user_repository: Arc<U>,
    /// Password hashing service
    password_service: Arc<P>,
    /// Token signing service
    token_service: Arc<T>,
    /// Storage for issued reset codes
    reset_code_repository: Arc<R>,
    /// Delivery of reset codes
    notifier: Arc<N>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<C, U, P, T, R, N> AuthService<C, U, P, T, R, N>
where
    C: CredentialRepository,
    U: UserRepository,
    P: PasswordServiceTrait,
    T: TokenServiceTrait,
    R: ResetCodeRepository,
    N: ResetCodeNotifierTrait,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `credential_repository` - Repository for credentials
    /// * `user_repository` - Repository for user profiles
    /// * `password_service` - Service for password hashing
    /// * `token_service` - Service for token signing
    /// * `reset_code_repository` - Repository for forgot-password codes
    /// * `notifier` - Delivery channel for forgot-password codes
    /// * `config` - Service configuration
    pub fn new(
        credential_repository: Arc<C>,
        user_repository: Arc<U>,
        password_service: Arc<P>,
        token_service: Arc<T>,
        reset_code_repository: Arc<R>,
        notifier: Arc<N>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            credential_repository,
            user_repository,
            password_service,
            token_service,
            reset_code_repository,
            notifier,
            config,
        }
    }

    /// Service configuration
    pub fn config(&self) -> &AuthServiceConfig {
        &self.config
    }

    /// Authenticate a credential and issue a token
    ///
    /// 1. Looks up the stored credential by login
    /// 2. Compares the supplied password with the stored hash
    /// 3. Signs a token for the login
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` - Unknown login or wrong password
    /// * Lookup and signing failures are returned as produced by the collaborator
    #[instrument(skip_all, fields(request_id = %ctx.request_id))]
    pub async fn login(&self, ctx: &RequestContext, credential: &Credential) -> DomainResult<Token> {
        let stored = match self
            .credential_repository
            .get_by_login(ctx, &credential.login)
            .await
        {
            Lookup::Found(stored) => stored,
            Lookup::NotFound => return Err(AuthError::InvalidCredentials.into()),
            Lookup::Failed(err) => return Err(err),
        };

        if !self
            .password_service
            .matches(ctx, &credential.password, &stored.password)
            .await
        {
            return Err(AuthError::InvalidCredentials.into());
        }

        self.sign_token(ctx, &credential.login).await
    }

    /// Register a credential with its user profile and issue a token
    ///
    /// 1. Rejects a login that already exists
    /// 2. Rejects an email that is already registered
    /// 3. Hashes the password
    /// 4. Stores credential and profile as one unit
    /// 5. Signs a token for the login as supplied by the caller
    ///
    /// The existence checks are advisory: two concurrent sign-ups for the
    /// same login can both pass them, and only the repository's own
    /// uniqueness guarantee decides which one is stored.
    ///
    /// # Errors
    ///
    /// * `AuthError::RegistrationDisabled` - Registration is switched off
    /// * `AuthError::LoginAlreadyTaken` - A credential exists for the login
    /// * `AuthError::EmailAlreadyRegistered` - A user exists for the email
    /// * Lookup, hashing, storage and signing failures as produced by the collaborator
    #[instrument(skip_all, fields(request_id = %ctx.request_id))]
    pub async fn sign_up(
        &self,
        ctx: &RequestContext,
        credential: &Credential,
        user: &User,
    ) -> DomainResult<Token> {
        if !self.config.allow_registration {
            return Err(AuthError::RegistrationDisabled.into());
        }

        match self
            .credential_repository
            .get_by_login(ctx, &credential.login)
            .await
        {
            Lookup::NotFound => {}
            Lookup::Found(_) => return Err(AuthError::LoginAlreadyTaken.into()),
            Lookup::Failed(err) => return Err(err),
        }

        match self.user_repository.get_by_email(ctx, &user.email).await {
            Lookup::NotFound => {}
            Lookup::Found(_) => return Err(AuthError::EmailAlreadyRegistered.into()),
            Lookup::Failed(err) => return Err(err),
        }

        let password_hash = self
            .password_service
            .encode(ctx, &credential.password)
            .await?;

        self.credential_repository
            .store_with_user(ctx, &credential.with_password_hash(password_hash), user)
            .await?;

        self.sign_token(ctx, &credential.login).await
    }

    /// Issue a one-time reset code for a login and dispatch it
    ///
    /// Previously issued codes for the login are invalidated first so that
    /// only the newest code can be used. A value still held by another code
    /// is redrawn, up to `MAX_RESET_CODE_ATTEMPTS` times.
    ///
    /// # Errors
    ///
    /// * `AuthError::LoginNotFound` - No credential for the login
    /// * `AuthError::ResetCodeCollision` - Every drawn value was taken
    /// * Lookup, storage and notification failures as produced by the collaborator
    #[instrument(skip_all, fields(request_id = %ctx.request_id))]
    pub async fn forgot_pass_code(&self, ctx: &RequestContext, login: &str) -> DomainResult<()> {
        match self.credential_repository.get_by_login(ctx, login).await {
            Lookup::Found(_) => {}
            Lookup::NotFound => return Err(AuthError::LoginNotFound.into()),
            Lookup::Failed(err) => return Err(err),
        }

        self.reset_code_repository
            .invalidate_for_login(ctx, login)
            .await?;

        let reset_code = self.save_new_reset_code(ctx, login).await?;

        self.notifier
            .send_reset_code(ctx, login, &reset_code.code)
            .await
    }

    /// Consume a reset code and replace the password of its login
    ///
    /// The code is claimed before the password is touched, so concurrent
    /// resets with one code cannot both succeed. If hashing or the update
    /// fails the claim is released and the code stays usable.
    ///
    /// Returns a freshly signed token when `issue_token_on_reset` is set.
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - Malformed code or unacceptable password
    /// * `AuthError::InvalidResetCode` - Unknown or already used code
    /// * `AuthError::ResetCodeExpired` - Code past its expiry
    /// * Storage, hashing and signing failures as produced by the collaborator
    #[instrument(skip_all, fields(request_id = %ctx.request_id))]
    pub async fn forgot_pass_reset(
        &self,
        ctx: &RequestContext,
        request: &ResetPasswordRequest,
    ) -> DomainResult<Option<Token>> {
        request.validate()?;

        let reset_code = self
            .reset_code_repository
            .consume(ctx, &request.code)
            .await?;

        if let Err(err) = self
            .replace_password(ctx, &reset_code.login, &request.new_password)
            .await
        {
            // Best effort
            let _ = self
                .reset_code_repository
                .release(ctx, &reset_code.code)
                .await;
            return Err(err);
        }

        if !self.config.issue_token_on_reset {
            return Ok(None);
        }

        self.sign_token(ctx, &reset_code.login).await.map(Some)
    }

    /// Validate a previously issued token and return its payload
    #[instrument(skip_all, fields(request_id = %ctx.request_id))]
    pub async fn verify_token(&self, ctx: &RequestContext, token: &Token) -> DomainResult<TokenInfo> {
        self.token_service.validate(ctx, token).await
    }

    async fn save_new_reset_code(&self, ctx: &RequestContext, login: &str) -> DomainResult<ResetCode> {
        let mut attempt = 1;
        loop {
            let reset_code =
                ResetCode::new_with_expiration(login, self.config.reset_code_expiration_minutes)?;

            match self.reset_code_repository.save(ctx, &reset_code).await {
                Ok(()) => return Ok(reset_code),
                Err(DomainError::Auth(AuthError::ResetCodeCollision))
                    if attempt < MAX_RESET_CODE_ATTEMPTS =>
                {
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn replace_password(
        &self,
        ctx: &RequestContext,
        login: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let password_hash = self.password_service.encode(ctx, new_password).await?;
        self.credential_repository
            .update_password(ctx, login, &password_hash)
            .await
    }

    async fn sign_token(&self, ctx: &RequestContext, login: &str) -> DomainResult<Token> {
        self.token_service
            .sign(ctx, &TokenInfo::new(login), self.config.token_validity_minutes)
            .await
    }
}
