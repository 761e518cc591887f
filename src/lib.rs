//! Rhythm Pattern Edit & Alignment Engine
//!
//! A monophonic rhythmic/melodic contour is modeled as a leading rest
//! followed by an ordered sequence of (duration, pitch-cluster) notes.
//! This crate provides the structural edit operations on such patterns
//! (insert, delete, replace, adjust leading rest), each returning an
//! additive edit cost, plus a dynamic-programming aligner that computes
//! minimum-cost edit distance between two patterns using the very same
//! cost functions.
//!
//! Edits can also be reified as [`undo::OperationInfo`] descriptors,
//! which can be serialized, replayed, and inverted; they are the basis
//! for undo/redo and network-transmissible edit logs.
//!
//! Cluster ids are opaque relative-pitch labels; resolving one to an
//! absolute pitch is the playback layer's job, never this crate's.

pub mod models;
pub mod structure;
pub mod undo;

// Re-export commonly used types
pub use models::core::*;
pub use models::errors::PatternError;
pub use structure::alignment::{distance, distance_with_direction};
pub use undo::{EditLog, OperationInfo};
