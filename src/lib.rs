pub mod common;
pub mod error;

pub mod config;
pub mod lookup;
pub mod neighbors;
pub mod schedule;

pub mod batch;
pub mod expert;
pub mod format;
pub mod pipeline;
pub mod report;
pub mod search;

pub mod cli;

pub use error::{Error, Result};
