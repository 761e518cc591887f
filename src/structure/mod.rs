//! Structural analysis of rhythm patterns
//!
//! This layer is stateless: it compares patterns on demand and returns
//! derived values. No pattern state is stored or mutated here.
//!
//! ## Modules
//!
//! - `alignment`: minimum-cost edit distance between two patterns,
//!   directional and symmetric

pub mod alignment;

// Re-exports for convenience
pub use alignment::{distance, distance_with_direction};
