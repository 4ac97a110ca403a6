//! MySQL implementation of the CredentialRepository trait.
//!
//! Credentials live in `auth_credentials` and reference their profile in
//! `users`. Login and email uniqueness are enforced by the table keys; a
//! duplicate-key error is reported as the matching `AuthError` so callers
//! see the same conflict whether the use case's pre-check or the database
//! caught it.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row};
use tracing::{debug, error, info, warn};

use ecom_core::domain::entities::{Credential, User};
use ecom_core::domain::value_objects::Lookup;
use ecom_core::domain::RequestContext;
use ecom_core::errors::{AuthError, DomainError, DomainResult};
use ecom_core::repositories::CredentialRepository;
use ecom_shared::utils::mask_login;

/// MySQL implementation of CredentialRepository
pub struct MySqlCredentialRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCredentialRepository {
    /// Create a new MySQL credential repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Map an insert failure, reporting a duplicate key as `conflict`
    fn map_insert_error(e: sqlx::Error, conflict: AuthError) -> DomainError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return conflict.into();
            }
        }
        DomainError::storage(format!("Failed to store account: {}", e))
    }
}

#[async_trait]
impl CredentialRepository for MySqlCredentialRepository {
    async fn get_by_login(&self, ctx: &RequestContext, login: &str) -> Lookup<Credential> {
        let query = sqlx::query(
            r#"
            SELECT login, password_hash
            FROM auth_credentials
            WHERE login = ?
            LIMIT 1
            "#,
        )
        .bind(login);

        let result = tokio::select! {
            _ = ctx.cancel_token.cancelled() => return Lookup::Failed(DomainError::Cancelled),
            result = query.fetch_optional(&self.pool) => result,
        };

        match result {
            Ok(Some(row)) => {
                let credential = row
                    .try_get::<String, _>("login")
                    .and_then(|login| {
                        row.try_get::<String, _>("password_hash")
                            .map(|hash| Credential::new(login, hash))
                    });
                match credential {
                    Ok(credential) => Lookup::Found(credential),
                    Err(e) => Lookup::Failed(DomainError::lookup(format!(
                        "Failed to decode credential row: {}",
                        e
                    ))),
                }
            }
            Ok(None) => Lookup::NotFound,
            Err(e) => {
                error!(request_id = %ctx.request_id, error = %e, "Credential lookup failed");
                Lookup::Failed(DomainError::lookup(format!("Database query failed: {}", e)))
            }
        }
    }

    async fn store_with_user(
        &self,
        ctx: &RequestContext,
        credential: &Credential,
        user: &User,
    ) -> DomainResult<()> {
        ctx.ensure_active()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO users (email, first_name, last_name, phone_number, address)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone_number)
        .bind(&user.address)
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::map_insert_error(e, AuthError::EmailAlreadyRegistered))?;

        sqlx::query(
            r#"
            INSERT INTO auth_credentials (login, password_hash, user_email)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&credential.login)
        .bind(&credential.password)
        .bind(&user.email)
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::map_insert_error(e, AuthError::LoginAlreadyTaken))?;

        // Dropping the transaction without commit rolls both inserts back
        ctx.ensure_active()?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit account: {}", e)))?;

        info!(
            request_id = %ctx.request_id,
            login = %mask_login(&credential.login),
            "Account stored"
        );
        Ok(())
    }

    async fn update_password(
        &self,
        ctx: &RequestContext,
        login: &str,
        password_hash: &str,
    ) -> DomainResult<()> {
        ctx.ensure_active()?;

        let result = sqlx::query(
            r#"
            UPDATE auth_credentials
            SET password_hash = ?, updated_at = ?
            WHERE login = ?
            "#,
        )
        .bind(password_hash)
        .bind(Utc::now())
        .bind(login)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update password: {}", e)))?;

        if result.rows_affected() == 0 {
            warn!(request_id = %ctx.request_id, login = %mask_login(login), "Password update for unknown login");
            return Err(AuthError::LoginNotFound.into());
        }

        debug!(request_id = %ctx.request_id, login = %mask_login(login), "Password updated");
        Ok(())
    }
}
