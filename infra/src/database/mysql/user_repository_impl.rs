//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use tracing::error;

use ecom_core::domain::entities::User;
use ecom_core::domain::value_objects::Lookup;
use ecom_core::domain::RequestContext;
use ecom_core::errors::DomainError;
use ecom_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let column = |name: &str| -> Result<String, DomainError> {
            row.try_get(name)
                .map_err(|e| DomainError::lookup(format!("Failed to get {}: {}", name, e)))
        };

        Ok(User {
            email: column("email")?,
            first_name: column("first_name")?,
            last_name: column("last_name")?,
            phone_number: column("phone_number")?,
            address: column("address")?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn get_by_email(&self, ctx: &RequestContext, email: &str) -> Lookup<User> {
        let query = sqlx::query(
            r#"
            SELECT email, first_name, last_name, phone_number, address
            FROM users
            WHERE email = ?
            LIMIT 1
            "#,
        )
        .bind(email);

        let result = tokio::select! {
            _ = ctx.cancel_token.cancelled() => return Lookup::Failed(DomainError::Cancelled),
            result = query.fetch_optional(&self.pool) => result,
        };

        match result {
            Ok(Some(row)) => match Self::row_to_user(&row) {
                Ok(user) => Lookup::Found(user),
                Err(e) => Lookup::Failed(e),
            },
            Ok(None) => Lookup::NotFound,
            Err(e) => {
                error!(request_id = %ctx.request_id, error = %e, "User lookup failed");
                Lookup::Failed(DomainError::lookup(format!("Database query failed: {}", e)))
            }
        }
    }
}
