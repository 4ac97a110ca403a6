//! Cache module for Redis-based storage
//!
//! Provides the Redis client with retry logic and the reset code store
//! built on top of it.

pub mod redis_client;
pub mod reset_code_cache;

pub use redis_client::RedisClient;
pub use reset_code_cache::RedisResetCodeRepository;
