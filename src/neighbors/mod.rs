//! Neighbor detection.
//!
//! Hits on the same chromosome tag are linked when they overlap or lie
//! within a distance threshold of each other. Comparison is exhaustive and
//! pairwise inside each tag group.

pub mod classify;
pub mod finder;

pub use classify::*;
pub use finder::*;
