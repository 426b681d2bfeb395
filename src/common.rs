use crate::error::ParseError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;

/// Tabular (outfmt6) columns consumed by the pipeline.
pub const COL_QUERY: usize = 0;
pub const COL_HIT: usize = 1;
pub const COL_PERCENT: usize = 2;
pub const COL_ALIGNMENT_LEN: usize = 3;
pub const COL_QUERY_FROM: usize = 6;
pub const COL_QUERY_TO: usize = 7;
pub const COL_HIT_FROM: usize = 8;
pub const COL_HIT_TO: usize = 9;
pub const COL_EVALUE: usize = 10;
pub const COL_BIT_SCORE: usize = 11;
pub const TABULAR_COLUMNS: usize = 12;

// =============================================================================
// Hit string helpers
//
// A hit is encoded as `build[@source]:locus`, e.g. `gm_genome_rel_1_01@soybase:gm08`.
// =============================================================================

/// Everything before the first `:` (`build[@source]`).
pub fn build_tag(hit: &str) -> &str {
    hit.split(':').next().unwrap_or(hit)
}

/// Build tag with any `@source` suffix removed.
pub fn build_name(hit: &str) -> &str {
    let tag = build_tag(hit);
    tag.split('@').next().unwrap_or(tag)
}

/// Chromosome / scaffold component: everything after the last `:`.
pub fn locus_tag(hit: &str) -> &str {
    hit.rsplit(':').next().unwrap_or(hit)
}

/// Second `:`-separated piece of a hit, empty when absent.
pub fn locus_piece(hit: &str) -> &str {
    hit.split(':').nth(1).unwrap_or("")
}

/// Anything with a locus and hit coordinates can take part in neighbor detection.
pub trait Locus {
    fn locus(&self) -> &str;
    fn query(&self) -> &str;
    fn hit_from(&self) -> i64;
    fn hit_to(&self) -> i64;
}

impl<T: Locus + ?Sized> Locus for &T {
    fn locus(&self) -> &str {
        (**self).locus()
    }

    fn query(&self) -> &str {
        (**self).query()
    }

    fn hit_from(&self) -> i64 {
        (**self).hit_from()
    }

    fn hit_to(&self) -> i64 {
        (**self).hit_to()
    }
}

// =============================================================================
// Neighbors
// =============================================================================

/// Another hit found near the subject hit. Coordinates are the other hit's
/// as-given, un-normalised `hit_from`/`hit_to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Neighbor {
    pub start: i64,
    pub stop: i64,
    pub query: String,
}

impl Neighbor {
    pub fn new(start: i64, stop: i64, query: impl Into<String>) -> Self {
        Self {
            start,
            stop,
            query: query.into(),
        }
    }
}

/// Neighbor triplets in scan order. Never empty: a hit without neighbors
/// carries `None` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbors(Vec<Neighbor>);

impl Neighbors {
    pub fn from_vec(triplets: Vec<Neighbor>) -> Option<Self> {
        if triplets.is_empty() {
            None
        } else {
            Some(Self(triplets))
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Neighbor> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Neighbor] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Neighbors {
    type Item = &'a Neighbor;
    type IntoIter = std::slice::Iter<'a, Neighbor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Flat `start,stop,query,start,stop,query,...` form used in the batch
/// output column and in JSON.
impl fmt::Display for Neighbors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{},{},{}", n.start, n.stop, n.query)?;
        }
        Ok(())
    }
}

impl Serialize for Neighbors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Sequence categories
// =============================================================================

/// Report section a row is listed under. Ordering follows the category ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SequenceCategory {
    #[serde(rename = "Genomic Context")]
    GenomicContext,
    #[serde(rename = "Expression")]
    Expression,
    #[serde(rename = "Role and Function")]
    RoleAndFunction,
}

impl SequenceCategory {
    pub fn id(self) -> u32 {
        match self {
            SequenceCategory::GenomicContext => 1,
            SequenceCategory::Expression => 2,
            SequenceCategory::RoleAndFunction => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SequenceCategory::GenomicContext => "Genomic Context",
            SequenceCategory::Expression => "Expression",
            SequenceCategory::RoleAndFunction => "Role and Function",
        }
    }
}

impl fmt::Display for SequenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// HitRecord
// =============================================================================

/// One alignment hit. Produced once by the search step and treated as
/// immutable input; only `neighbors` is filled in by the pipeline.
///
/// `hit_from > hit_to` encodes the reverse strand, so the pair is stored
/// exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitRecord {
    pub query: String,
    pub hit: String,
    pub percent: f64,
    pub alignment_len: u32,
    pub query_from: i64,
    pub query_to: i64,
    pub hit_from: i64,
    pub hit_to: i64,
    /// Kept verbatim so exported scores match the search output byte for byte.
    pub e_value: String,
    pub bit_score: f64,
    pub neighbors: Option<Neighbors>,
}

impl HitRecord {
    /// Parse one outfmt6 line. `line_no` is 1-based and only used in errors.
    pub fn from_tabular(line: &str, line_no: usize) -> Result<Self, ParseError> {
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < TABULAR_COLUMNS {
            return Err(ParseError::MissingColumns {
                line: line_no,
                expected: TABULAR_COLUMNS,
                found: cols.len(),
            });
        }

        Ok(Self {
            query: cols[COL_QUERY].to_string(),
            hit: cols[COL_HIT].to_string(),
            percent: parse_number(&cols, COL_PERCENT, line_no)?,
            alignment_len: parse_integer(&cols, COL_ALIGNMENT_LEN, line_no)?,
            query_from: parse_integer(&cols, COL_QUERY_FROM, line_no)?,
            query_to: parse_integer(&cols, COL_QUERY_TO, line_no)?,
            hit_from: parse_integer(&cols, COL_HIT_FROM, line_no)?,
            hit_to: parse_integer(&cols, COL_HIT_TO, line_no)?,
            e_value: cols[COL_EVALUE].trim().to_string(),
            bit_score: parse_number(&cols, COL_BIT_SCORE, line_no)?,
            neighbors: None,
        })
    }

    pub fn build_tag(&self) -> &str {
        build_tag(&self.hit)
    }

    pub fn build_name(&self) -> &str {
        build_name(&self.hit)
    }
}

impl Locus for HitRecord {
    fn locus(&self) -> &str {
        locus_tag(&self.hit)
    }

    fn query(&self) -> &str {
        &self.query
    }

    fn hit_from(&self) -> i64 {
        self.hit_from
    }

    fn hit_to(&self) -> i64 {
        self.hit_to
    }
}

pub(crate) fn parse_integer<T: std::str::FromStr>(
    cols: &[&str],
    column: usize,
    line_no: usize,
) -> Result<T, ParseError> {
    let raw = cols[column].trim();
    raw.parse().map_err(|_| ParseError::InvalidInteger {
        line: line_no,
        column,
        value: raw.to_string(),
    })
}

fn parse_number(cols: &[&str], column: usize, line_no: usize) -> Result<f64, ParseError> {
    let raw = cols[column].trim();
    raw.parse().map_err(|_| ParseError::InvalidNumber {
        line: line_no,
        column,
        value: raw.to_string(),
    })
}

/// Parse tabular hits. Blank lines and `#` comment lines (outfmt7 headers)
/// are skipped.
pub fn parse_hits(text: &str) -> Result<Vec<HitRecord>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'))
        .map(|(i, line)| HitRecord::from_tabular(line, i + 1))
        .collect()
}

/// Fail-fast check that `path` names a readable regular file, then read it.
pub fn read_input(path: &Path) -> Result<String, ParseError> {
    let meta = fs::metadata(path).map_err(|source| ParseError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_file() {
        return Err(ParseError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|source| ParseError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_hits(path: &Path) -> Result<Vec<HitRecord>, ParseError> {
    parse_hits(&read_input(path)?)
}
