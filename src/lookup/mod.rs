//! Read-only reference tables queried by exact tag.
//!
//! The tables are owned by an external collaborator; the pipeline only
//! consumes them through [`ReferenceTables`]. [`InMemoryTables`] is the
//! stock implementation, loaded from tab-separated files.

use crate::common::parse_integer;
use crate::error::{LookupMiss, ParseError};
use rustc_hash::FxHashMap;
use std::path::Path;

/// A browser / database a hit can link out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub name: String,
    pub url: Option<String>,
}

/// A chromosome, scaffold or sequence a hit can land on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetElement {
    pub display_name: String,
}

pub trait ReferenceTables {
    /// Destination by `build@source` tag.
    fn destination(&self, tag: &str) -> Option<&Destination>;
    /// Target element by locus element tag.
    fn target_element(&self, tag: &str) -> Option<&TargetElement>;
    /// Alpheus reference id by hit name. Absence is not an error.
    fn alpheus_ref_id(&self, name: &str) -> Option<i64>;

    fn require_destination(&self, tag: &str) -> Result<&Destination, LookupMiss> {
        self.destination(tag)
            .ok_or_else(|| LookupMiss::Destination(tag.to_string()))
    }

    fn require_target_element(&self, tag: &str) -> Result<&TargetElement, LookupMiss> {
        self.target_element(tag)
            .ok_or_else(|| LookupMiss::TargetElement(tag.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryTables {
    destinations: FxHashMap<String, Destination>,
    elements: FxHashMap<String, TargetElement>,
    alpheus: FxHashMap<String, i64>,
}

impl InMemoryTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_destination(mut self, tag: &str, name: &str, url: Option<&str>) -> Self {
        self.destinations.insert(
            tag.to_string(),
            Destination {
                name: name.to_string(),
                url: url.map(str::to_string),
            },
        );
        self
    }

    pub fn with_element(mut self, tag: &str, display_name: &str) -> Self {
        self.elements.insert(
            tag.to_string(),
            TargetElement {
                display_name: display_name.to_string(),
            },
        );
        self
    }

    pub fn with_alpheus(mut self, name: &str, ref_id: i64) -> Self {
        self.alpheus.insert(name.to_string(), ref_id);
        self
    }

    /// `tag<TAB>name[<TAB>url]` per line.
    pub fn load_destinations(&mut self, text: &str) -> Result<usize, ParseError> {
        let mut n = 0;
        for (_, cols) in table_rows(text, 2)? {
            let url = cols.get(2).filter(|u| !u.is_empty()).map(|u| u.to_string());
            self.destinations.insert(
                cols[0].to_string(),
                Destination {
                    name: cols[1].to_string(),
                    url,
                },
            );
            n += 1;
        }
        Ok(n)
    }

    /// `tag<TAB>display_name` per line.
    pub fn load_elements(&mut self, text: &str) -> Result<usize, ParseError> {
        let mut n = 0;
        for (_, cols) in table_rows(text, 2)? {
            self.elements.insert(
                cols[0].to_string(),
                TargetElement {
                    display_name: cols[1].to_string(),
                },
            );
            n += 1;
        }
        Ok(n)
    }

    /// `name<TAB>ref_id` per line.
    pub fn load_alpheus(&mut self, text: &str) -> Result<usize, ParseError> {
        let mut n = 0;
        for (line_no, cols) in table_rows(text, 2)? {
            let ref_id: i64 = parse_integer(&cols, 1, line_no)?;
            self.alpheus.insert(cols[0].to_string(), ref_id);
            n += 1;
        }
        Ok(n)
    }

    pub fn load_destinations_file(&mut self, path: &Path) -> Result<usize, ParseError> {
        self.load_destinations(&crate::common::read_input(path)?)
    }

    pub fn load_elements_file(&mut self, path: &Path) -> Result<usize, ParseError> {
        self.load_elements(&crate::common::read_input(path)?)
    }

    pub fn load_alpheus_file(&mut self, path: &Path) -> Result<usize, ParseError> {
        self.load_alpheus(&crate::common::read_input(path)?)
    }
}

/// Non-blank, non-comment rows split on tabs, each with at least `min` columns.
fn table_rows(text: &str, min: usize) -> Result<Vec<(usize, Vec<&str>)>, ParseError> {
    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < min {
            return Err(ParseError::MissingColumns {
                line: i + 1,
                expected: min,
                found: cols.len(),
            });
        }
        rows.push((i + 1, cols));
    }
    Ok(rows)
}

impl ReferenceTables for InMemoryTables {
    fn destination(&self, tag: &str) -> Option<&Destination> {
        self.destinations.get(tag)
    }

    fn target_element(&self, tag: &str) -> Option<&TargetElement> {
        self.elements.get(tag)
    }

    fn alpheus_ref_id(&self, name: &str) -> Option<i64> {
        self.alpheus.get(name).copied()
    }
}
