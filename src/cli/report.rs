use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use crate::cli::{load_config, open_output};
use crate::common::read_hits;
use crate::lookup::InMemoryTables;
use crate::pipeline::ReportPipeline;
use crate::report::{write_json, write_xml};

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Tabular hit file
    pub input: PathBuf,
    /// `build@source <TAB> name <TAB> url` table
    #[arg(long)]
    pub destinations: PathBuf,
    /// `element <TAB> display name` table
    #[arg(long)]
    pub elements: PathBuf,
    /// `hit name <TAB> ref id` table
    #[arg(long)]
    pub alpheus: Option<PathBuf>,
    /// Neighbor threshold; fractional values are truncated
    #[arg(long)]
    pub threshold: Option<f64>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Write XML instead of JSON
    #[arg(long)]
    pub xml: bool,
}

pub fn run(args: ReportArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(t) = args.threshold {
        config.threshold = t;
    }

    let mut tables = InMemoryTables::new();
    tables.load_destinations_file(&args.destinations)?;
    tables.load_elements_file(&args.elements)?;
    if let Some(path) = &args.alpheus {
        tables.load_alpheus_file(path)?;
    }

    let hits = read_hits(&args.input)?;
    let report = ReportPipeline::new(config, &tables)
        .run(hits)
        .context("report failed")?;

    let mut out = open_output(args.out.as_deref())?;
    if args.xml {
        write_xml(&report.rows, &mut out)?;
    } else {
        write_json(&report.rows, &mut out)?;
    }
    out.flush()?;
    Ok(())
}
