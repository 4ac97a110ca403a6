//! Shared configuration types and utilities for the Storefront server
//!
//! This crate provides the configuration structures used across all server
//! modules. Each sub-config has sensible development defaults and a
//! `from_env()` constructor.

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, PasswordConfig, ResetCodeConfig,
};
