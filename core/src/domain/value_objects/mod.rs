//! Value objects representing immutable domain concepts.

pub mod lookup;
pub mod reset_password_request;

// Re-export commonly used types
pub use lookup::Lookup;
pub use reset_password_request::ResetPasswordRequest;
