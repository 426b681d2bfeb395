//! Subcommand arguments and drivers for the `hitlink` binary.

pub mod gff;
pub mod neighbors;
pub mod report;

pub use gff::GffArgs;
pub use neighbors::NeighborsArgs;
pub use report::ReportArgs;

use anyhow::{Context, Result};
use crate::config::PipelineConfig;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Buffered writer on `path`, or stdout.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = File::create(p).with_context(|| format!("cannot create {}", p.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(p) => Ok(PipelineConfig::load(p)?),
        None => Ok(PipelineConfig::default()),
    }
}
