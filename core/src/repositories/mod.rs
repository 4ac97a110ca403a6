//! Repository interfaces and in-memory implementations.

pub mod credential;
pub mod reset_code;
pub mod user;

pub use credential::{CredentialRepository, InMemoryAccountStore};
pub use reset_code::{InMemoryResetCodeRepository, ResetCodeRepository};
pub use user::UserRepository;
