//! Domain layer containing business entities, value objects and the request context.

pub mod context;
pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use context::RequestContext;
pub use entities::*;
pub use value_objects::*;
