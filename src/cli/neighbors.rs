use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::path::PathBuf;

use crate::batch::{run_batch, BatchJob};
use crate::cli::load_config;
use crate::config::{parse_threshold_arg, GenomePatterns};
use crate::schedule::{ProcStatProbe, Scheduler};

#[derive(Args, Debug)]
pub struct NeighborsArgs {
    /// Tabular hit file
    pub input: PathBuf,
    /// Neighbor distance threshold (default 10000); fractional values are truncated
    pub threshold: Option<String>,
    /// Output path (default: input with a `.fn` extension)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Worker limit; 0 derives it from idle processors
    #[arg(short = 'n', long, default_value_t = 0)]
    pub num_threads: usize,
    /// JSON config (genome patterns)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: NeighborsArgs, verbose: bool) -> Result<()> {
    let threshold = parse_threshold_arg(args.threshold.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    let patterns = GenomePatterns::compile(config.genome_patterns.as_slice())?;

    let mut scheduler = if args.num_threads == 0 {
        Scheduler::from_probe(&ProcStatProbe::default())
    } else {
        Scheduler::new(args.num_threads)
    };
    info!("concurrency limit {}", scheduler.limit());

    let bar = verbose.then(|| {
        let bar = ProgressBar::new(0);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
        {
            bar.set_style(style);
        }
        bar
    });
    if let Some(bar) = &bar {
        scheduler = scheduler.with_progress(bar.clone());
    }

    let job = BatchJob {
        input: args.input,
        output: args.out,
        threshold,
        patterns,
    };
    let summary = run_batch(&job, &scheduler)
        .with_context(|| format!("neighbor search on {} failed", job.input.display()))?;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    info!("output: {}", summary.output.display());
    Ok(())
}
