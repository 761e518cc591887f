//! Error types for the strict mutator surface
//!
//! The plain mutators keep the silent no-op-with-zero-cost contract;
//! the `try_*` variants surface these errors instead.

use thiserror::Error;

/// Invalid input to a pattern mutator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Target index does not address a valid position
    #[error("note index {index} out of range for pattern of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Notes in a pattern must last at least one tick
    #[error("note duration must be at least 1 tick, got {0}")]
    InvalidDuration(i32),

    /// A leading rest cannot be negative
    #[error("leading rest must be non-negative, got {0}")]
    NegativeRest(i32),
}
