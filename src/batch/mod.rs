//! Batch form: a flat tabular file holding many queries' hits.
//!
//! Genomic lines are grouped by chromosome tag and each group's neighbor
//! scan runs as one unit of work under the [`Scheduler`]. Every line is
//! written back with one extra column holding its comma-joined neighbor
//! triplets (empty when there are none). Output is written only after all
//! groups have finished.

pub mod line;

pub use line::*;

use crate::common::{read_input, Neighbors};
use crate::config::GenomePatterns;
use crate::error::{ParseError, Result};
use crate::neighbors::{find_group_neighbors, partition_by_locus};
use crate::schedule::Scheduler;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extension of the batch result file.
pub const OUTPUT_EXTENSION: &str = "fn";

pub fn parse_batch(text: &str, patterns: &GenomePatterns) -> std::result::Result<Vec<BatchLine>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| BatchLine::parse(l, i + 1, patterns))
        .collect()
}

pub fn read_batch(path: &Path, patterns: &GenomePatterns) -> std::result::Result<Vec<BatchLine>, ParseError> {
    parse_batch(&read_input(path)?, patterns)
}

/// Neighbor list for every line (index-aligned with `lines`).
pub fn batch_neighbors(lines: &[BatchLine], threshold: i64, scheduler: &Scheduler) -> Vec<Option<Neighbors>> {
    let mut line_of: Vec<usize> = Vec::new();
    let mut hits: Vec<&BatchHit> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if let Some(hit) = &line.genomic {
            line_of.push(i);
            hits.push(hit);
        }
    }

    let groups = partition_by_locus(&hits);
    info!(
        "{} genomic hits in {} chromosome groups, concurrency limit {}",
        hits.len(),
        groups.len(),
        scheduler.limit()
    );

    let results = scheduler.run(&groups, |group| find_group_neighbors(&hits, group, threshold));

    let mut out: Vec<Option<Neighbors>> = (0..lines.len()).map(|_| None).collect();
    for (hit_idx, list) in results.into_iter().flatten() {
        out[line_of[hit_idx]] = list;
    }
    out
}

pub fn write_batch<W: Write>(lines: &[BatchLine], neighbors: &[Option<Neighbors>], writer: &mut W) -> io::Result<()> {
    for (line, list) in lines.iter().zip(neighbors) {
        match list {
            Some(n) => writeln!(writer, "{}\t{}", line.raw, n)?,
            None => writeln!(writer, "{}\t", line.raw)?,
        }
    }
    Ok(())
}

/// `input` with its extension replaced by `.fn`.
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// A fully validated batch run.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub threshold: i64,
    pub patterns: GenomePatterns,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub lines: usize,
    pub genomic: usize,
    pub with_neighbors: usize,
    pub output: PathBuf,
}

pub fn run_batch(job: &BatchJob, scheduler: &Scheduler) -> Result<BatchSummary> {
    let lines = read_batch(&job.input, &job.patterns)?;
    let neighbors = batch_neighbors(&lines, job.threshold, scheduler);

    let output = job.output.clone().unwrap_or_else(|| output_path(&job.input));
    let mut writer = BufWriter::new(File::create(&output)?);
    write_batch(&lines, &neighbors, &mut writer)?;
    writer.flush()?;

    let summary = BatchSummary {
        lines: lines.len(),
        genomic: lines.iter().filter(|l| l.genomic.is_some()).count(),
        with_neighbors: neighbors.iter().filter(|n| n.is_some()).count(),
        output,
    };
    info!(
        "wrote {} lines ({} genomic, {} with neighbors) to {}",
        summary.lines,
        summary.genomic,
        summary.with_neighbors,
        summary.output.display()
    );
    Ok(summary)
}
