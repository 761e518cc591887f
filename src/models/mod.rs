//! Models module for the rhythm pattern engine
//!
//! Contains the data model: notes, patterns with their cluster
//! bookkeeping and cost-returning mutators, and the error type used by
//! the strict (`try_*`) mutator surface.

pub mod core;
pub mod errors;

// Re-export commonly used types
pub use self::core::*;
pub use self::errors::PatternError;
