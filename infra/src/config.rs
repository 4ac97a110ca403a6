//! Configuration management for infrastructure services
//!
//! Settings are layered, later sources overriding earlier ones:
//! 1. Defaults and the plain environment variables read by
//!    `AppConfig::from_env` (`DATABASE_URL`, `JWT_SECRET`, ...), after
//!    loading a `.env` file if present
//! 2. An optional per-environment file such as `config.production.toml`
//! 3. `APP__`-prefixed variables addressing nested keys, for example
//!    `APP__AUTH__JWT__SECRET`

use ::config::{Config, Environment as EnvironmentSource, File};
use tracing::{debug, warn};

use crate::InfrastructureError;

// Re-export shared configs used by the adapters
pub use ecom_shared::config::{AppConfig, AuthConfig, CacheConfig, DatabaseConfig, LoggingConfig};

/// Prefix of environment variables that override nested settings
pub const ENV_PREFIX: &str = "APP";

/// Separator between prefix and nested key segments
pub const ENV_SEPARATOR: &str = "__";

/// Load the application configuration for the current environment
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present

    let base = AppConfig::from_env();
    let file = base.environment.config_file().to_string();
    load_config_from(base, &file)
}

/// Layer the optional `file` and `APP__` variables over `base`
pub fn load_config_from(base: AppConfig, file: &str) -> Result<AppConfig, InfrastructureError> {
    debug!(environment = %base.environment, file, "Loading configuration");

    let settings = Config::builder()
        .add_source(Config::try_from(&base)?)
        .add_source(File::with_name(file).required(false))
        .add_source(
            EnvironmentSource::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;

    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT secret is the built-in development default");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecom_shared::config::{Environment, LogFormat};

    #[test]
    fn test_missing_file_keeps_base_values() {
        let base = AppConfig::production();
        let config = load_config_from(base, "does-not-exist/config.production").unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.auth.password.bcrypt_cost, 12);
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_base_round_trips_reset_code_settings() {
        let mut base = AppConfig::development();
        base.auth.reset_code.expiration_minutes = 7;
        base.auth.reset_code.issue_token_on_reset = false;

        let config = load_config_from(base, "does-not-exist/config.development").unwrap();

        assert_eq!(config.auth.reset_code.expiration_minutes, 7);
        assert!(!config.auth.reset_code.issue_token_on_reset);
    }
}
