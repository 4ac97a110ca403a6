//! Domain entities representing core business objects.

pub mod credential;
pub mod reset_code;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use credential::Credential;
pub use reset_code::{ResetCode, DEFAULT_RESET_CODE_EXPIRATION_MINUTES, RESET_CODE_LENGTH};
pub use token::{Token, TokenInfo, THIRTY_DAYS_IN_MINUTES};
pub use user::User;
