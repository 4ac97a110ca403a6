//! Password hashing and token signing adapters

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtTokenService};
pub use password::BcryptPasswordService;
