//! GFF3 export.
//!
//! One `match` feature per hit. Strand is taken from the raw coordinate
//! order before start/end are normalised.

use crate::common::{build_tag, locus_tag, HitRecord};
use crate::error::ConfigError;
use log::warn;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::{self, Write};

pub const GFF_HEADER: &str = "##gff-version 3";
const SOURCE: &str = ".";
const FEATURE_TYPE: &str = "match";
const PHASE: &str = ".";

/// `-` when the hit runs backwards on the subject.
pub fn strand(hit_from: i64, hit_to: i64) -> char {
    if hit_from > hit_to {
        '-'
    } else {
        '+'
    }
}

pub fn gff_line(record: &HitRecord) -> String {
    let strand = strand(record.hit_from, record.hit_to);
    let (start, end) = if record.hit_from > record.hit_to {
        (record.hit_to, record.hit_from)
    } else {
        (record.hit_from, record.hit_to)
    };

    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\tTarget={} {} {};Note=Build {};Name={}",
        locus_tag(&record.hit),
        SOURCE,
        FEATURE_TYPE,
        start,
        end,
        record.e_value,
        strand,
        PHASE,
        record.query,
        record.query_from,
        record.query_to,
        build_tag(&record.hit),
        record.query
    )
}

/// Header line followed by one feature per record, in the given order.
pub fn write_gff<'a, I, W>(records: I, writer: &mut W) -> io::Result<()>
where
    I: IntoIterator<Item = &'a HitRecord>,
    W: Write,
{
    writeln!(writer, "{}", GFF_HEADER)?;
    for record in records {
        writeln!(writer, "{}", gff_line(record))?;
    }
    Ok(())
}

/// Key that switches genome filtering off.
pub const ALL_GENOMES: &str = "all";

/// Genome / query selection for GFF export.
#[derive(Debug, Clone)]
pub struct GenomeFilter {
    genomes: BTreeMap<String, Regex>,
}

impl GenomeFilter {
    pub fn new(table: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let genomes = table
            .iter()
            .map(|(key, pattern)| {
                Regex::new(pattern)
                    .map(|re| (key.clone(), re))
                    .map_err(|source| ConfigError::InvalidPattern {
                        pattern: pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(Self { genomes })
    }

    /// Records to export, best bit score first.
    ///
    /// `genomes` is a comma-separated key list. Unknown keys are ignored;
    /// if none are known nothing is selected. `all` disables the genome
    /// filter.
    pub fn select<'a>(
        &self,
        records: &'a [HitRecord],
        genomes: Option<&str>,
        query: Option<&str>,
    ) -> Vec<&'a HitRecord> {
        let mut selected: Vec<&HitRecord> = records
            .iter()
            .filter(|r| query.map_or(true, |q| r.query == q))
            .collect();
        selected.sort_by(|a, b| b.bit_score.partial_cmp(&a.bit_score).unwrap_or(Ordering::Equal));

        let requested = match genomes.map(str::trim).filter(|g| !g.is_empty()) {
            Some(g) => g,
            None => return selected,
        };

        let mut keys: Vec<&str> = Vec::new();
        for key in requested.split(',').map(str::trim) {
            if self.genomes.contains_key(key) {
                keys.push(key);
            } else {
                warn!("ignoring unknown genome filter {:?}", key);
            }
        }
        if keys.is_empty() {
            return Vec::new();
        }
        if keys.contains(&ALL_GENOMES) {
            return selected;
        }

        let patterns: Vec<&Regex> = keys.iter().filter_map(|k| self.genomes.get(*k)).collect();
        selected.retain(|r| patterns.iter().any(|re| re.is_match(&r.hit)));
        selected
    }
}
