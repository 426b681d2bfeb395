use anyhow::Result;
use clap::Args;
use log::info;
use std::io::Write;
use std::path::PathBuf;

use crate::cli::{load_config, open_output};
use crate::common::read_hits;
use crate::format::{write_gff, GenomeFilter};

#[derive(Args, Debug)]
pub struct GffArgs {
    /// Tabular hit file
    pub input: PathBuf,
    /// Comma-separated genome keys (gm, mt, mt3.0, mt3.5.1, lj, all)
    #[arg(long)]
    pub genomes: Option<String>,
    /// Only hits of this query
    #[arg(long)]
    pub query: Option<String>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: GffArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let filter = GenomeFilter::new(&config.gff_genomes)?;
    let hits = read_hits(&args.input)?;
    let selected = filter.select(&hits, args.genomes.as_deref(), args.query.as_deref());

    let mut out = open_output(args.out.as_deref())?;
    write_gff(selected.iter().copied(), &mut out)?;
    out.flush()?;
    info!("wrote {} features", selected.len());
    Ok(())
}
