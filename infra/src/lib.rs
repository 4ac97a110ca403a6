//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Storefront
//! authentication use cases, following Clean Architecture principles. It
//! provides concrete implementations of the collaborators consumed by
//! `ecom_core::services::auth::AuthService`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL credential and user repositories using SQLx
//! - **Cache**: Redis client and the reset code store
//! - **Security**: bcrypt password hashing and HS256 JWT signing
//! - **Notification**: reset code delivery
//! - **Telemetry**: `tracing` subscriber setup
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis reset code storage (default)

use ecom_core::errors::DomainError;

/// Configuration loading
pub mod config;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and reset code storage
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Security module - password hashing and token signing
pub mod security;

/// Notification module - reset code delivery
pub mod notification;

/// Telemetry module - tracing subscriber setup
pub mod telemetry;

#[cfg(all(feature = "mysql", feature = "redis-cache"))]
use std::sync::Arc;

#[cfg(all(feature = "mysql", feature = "redis-cache"))]
use ecom_core::services::auth::{AuthService, AuthServiceConfig};
#[cfg(all(feature = "mysql", feature = "redis-cache"))]
use ecom_shared::config::AppConfig;
#[cfg(all(feature = "mysql", feature = "redis-cache"))]
use crate::{
    cache::{RedisClient, RedisResetCodeRepository},
    database::{DatabasePool, MySqlCredentialRepository, MySqlUserRepository},
    notification::LogResetCodeNotifier,
    security::{BcryptPasswordService, JwtTokenService},
};

/// Auth service wired with the production adapters
#[cfg(all(feature = "mysql", feature = "redis-cache"))]
pub type StorefrontAuthService = AuthService<
    MySqlCredentialRepository,
    MySqlUserRepository,
    BcryptPasswordService,
    JwtTokenService,
    RedisResetCodeRepository,
    LogResetCodeNotifier,
>;

/// Infrastructure service container
///
/// Holds the connection pools so they can be health-checked and closed on
/// shutdown, and assembles the auth service from them.
#[cfg(all(feature = "mysql", feature = "redis-cache"))]
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Application configuration the services were built from
    pub config: AppConfig,
    /// MySQL connection pool
    pub database: DatabasePool,
    /// Redis client
    pub redis: RedisClient,
}

#[cfg(all(feature = "mysql", feature = "redis-cache"))]
impl InfrastructureServices {
    /// Build the auth service over this container's connections
    pub fn auth_service(&self) -> Result<StorefrontAuthService, InfrastructureError> {
        let auth = &self.config.auth;
        let pool = self.database.get_pool().clone();

        Ok(AuthService::new(
            Arc::new(MySqlCredentialRepository::new(pool.clone())),
            Arc::new(MySqlUserRepository::new(pool)),
            Arc::new(BcryptPasswordService::from_config(&auth.password)?),
            Arc::new(JwtTokenService::new(&auth.jwt)),
            Arc::new(RedisResetCodeRepository::new(self.redis.clone())),
            Arc::new(LogResetCodeNotifier::new()),
            AuthServiceConfig::from(auth),
        ))
    }

    /// Check both backends
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let database = self.database.health_check().await?;
        let redis = self.redis.health_check().await?;
        Ok(database && redis)
    }

    /// Close the connection pools
    pub async fn shutdown(&self) {
        self.database.close().await;
    }
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - Database connection pool and schema migrations
/// - Redis connection
#[cfg(all(feature = "mysql", feature = "redis-cache"))]
pub async fn initialize(config: AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure services");

    if config.environment.is_production() && config.auth.jwt.is_using_default_secret() {
        return Err(InfrastructureError::Config(
            "JWT secret must be configured in production".to_string(),
        ));
    }

    let database = DatabasePool::new(config.database.clone()).await?;
    database.run_migrations().await?;
    let redis = RedisClient::new(config.cache.clone()).await?;

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices {
        config,
        database,
        redis,
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration source error
    #[error("Configuration error: {0}")]
    Settings(#[from] ::config::ConfigError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Config(message) => DomainError::internal(message),
            other => DomainError::storage(other.to_string()),
        }
    }
}
