//! Authentication use case module
//!
//! This module provides the auth workflows of the storefront:
//! - Login with login/password
//! - Sign-up of a credential together with its user profile
//! - Forgot-password code issuing and password reset

mod config;
mod service;
mod use_case;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthService, MAX_RESET_CODE_ATTEMPTS};
pub use use_case::AuthUseCase;
