//! Business services containing the auth use case and its collaborator interfaces.

pub mod auth;
pub mod traits;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, AuthUseCase};
pub use traits::{PasswordServiceTrait, ResetCodeNotifierTrait, TokenServiceTrait};
