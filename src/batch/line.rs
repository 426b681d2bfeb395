use crate::common::{locus_tag, parse_integer, Locus, COL_HIT, COL_HIT_FROM, COL_HIT_TO, COL_QUERY};
use crate::config::GenomePatterns;
use crate::error::ParseError;

/// The columns of a batch line that neighbor detection reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchHit {
    pub query: String,
    pub hit: String,
    pub hit_from: i64,
    pub hit_to: i64,
}

impl Locus for BatchHit {
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

/// One input line. Columns other than query/hit/hit_from/hit_to are never
/// interpreted and are written back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchLine {
    pub raw: String,
    /// `None` for non-genomic hits (e.g. protein database hits); those are
    /// excluded from grouping and get an empty neighbor column.
    pub genomic: Option<BatchHit>,
}

impl BatchLine {
    pub fn parse(raw: &str, line_no: usize, patterns: &GenomePatterns) -> Result<Self, ParseError> {
        let raw = raw.trim_end_matches('\r');
        let cols: Vec<&str> = raw.split('\t').collect();
        if cols.len() <= COL_HIT {
            return Err(ParseError::MissingColumns {
                line: line_no,
                expected: COL_HIT + 1,
                found: cols.len(),
            });
        }

        if !patterns.matches(locus_tag(cols[COL_HIT])) {
            return Ok(Self {
                raw: raw.to_string(),
                genomic: None,
            });
        }

        if cols.len() <= COL_HIT_TO {
            return Err(ParseError::MissingColumns {
                line: line_no,
                expected: COL_HIT_TO + 1,
                found: cols.len(),
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            genomic: Some(BatchHit {
                query: cols[COL_QUERY].to_string(),
                hit: cols[COL_HIT].to_string(),
                hit_from: parse_integer(&cols, COL_HIT_FROM, line_no)?,
                hit_to: parse_integer(&cols, COL_HIT_TO, line_no)?,
            }),
        })
    }
}
