//! Export formats for hit sets.

pub mod gff;

pub use gff::*;
