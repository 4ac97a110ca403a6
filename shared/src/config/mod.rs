//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Token signing, password hashing and password reset configuration
//! - `cache` - Redis configuration for reset codes
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, PasswordConfig, ResetCodeConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::new("mysql://localhost:3306/storefront_dev"),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig::new("mysql://prod-db:3306/storefront")
                .with_max_connections(50),
            auth: AuthConfig {
                jwt: JwtConfig::new("use-env-variable"),
                password: PasswordConfig { bcrypt_cost: 12 },
                reset_code: ResetCodeConfig::default(),
            },
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_config_hardens_defaults() {
        let config = AppConfig::production();
        assert!(config.environment.is_production());
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.auth.password.bcrypt_cost, 12);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let json = r#"{ "environment": "staging", "auth": { "jwt": { "secret": "s3cret" } } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.auth.jwt.secret, "s3cret");
        assert_eq!(config.auth.jwt.issuer, "storefront");
        assert_eq!(config.auth.reset_code.expiration_minutes, 15);
        assert_eq!(config.cache.url, "redis://localhost:6379");
    }
}
