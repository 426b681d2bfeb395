//! Run configuration.
//!
//! Everything the pipeline components need (threshold, genome patterns,
//! species names, provider URL templates) lives in one immutable
//! [`PipelineConfig`] handed to each component at construction.

pub mod providers;
pub mod settings;

pub use providers::*;
pub use settings::*;
