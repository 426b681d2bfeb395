//! Per-build expansion of raw hits into categorised report rows.

pub mod registry;
pub mod row;

pub use registry::*;
pub use row::*;
