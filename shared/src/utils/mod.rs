//! Common utility functions

pub mod masking;

// Re-export commonly used utilities
pub use masking::*;
