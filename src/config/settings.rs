use crate::config::providers::ProviderTemplates;
use crate::error::ConfigError;
use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Neighbor distance threshold used when none is given.
pub const DEFAULT_THRESHOLD: i64 = 10_000;
/// Bases added on each side of a hit when building a browser window.
pub const VIEWING_AREA: i64 = 50_000;
/// Custom track type/name used in continuous-hit `add=` fragments.
pub const TRACK_TYPE: &str = "LIS";
pub const TRACK_NAME: &str = "LIS_QUERY";

/// Loci that count as genomic (chromosome/scaffold) hits in batch mode.
pub const DEFAULT_GENOME_PATTERNS: &[&str] = &[
    r"gm[0-9]+",
    r"mt_3_0_chr[0-9]",
    r"mt_3_5_1_chr[0-9]",
    r"lj_chr[0-9]",
];

/// GFF export genome filter keys.
pub const DEFAULT_GFF_GENOMES: &[(&str, &str)] = &[
    ("gm", r"gm[0-9]+"),
    ("mt", r"mt_3_5_1_chr[0-9]"),
    ("mt3.0", r"mt_3_0_chr[0-9]"),
    ("mt3.5.1", r"mt_3_5_1_chr[0-9]"),
    ("lj", r"lj_chr[0-9]"),
    ("all", r"."),
];

/// Species keyed by the first two characters of the build tag.
pub const DEFAULT_SPECIES: &[(&str, &str)] = &[
    ("mt", "Medicago truncatula"),
    ("lj", "Lotus japonicus"),
    ("gm", "Glycine max"),
    ("ca", "Cicer arietinum"),
    ("cc", "Cajanus cajan"),
    ("sw", "Viridiplantae"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Neighbor threshold. Accepted as a real number and truncated.
    pub threshold: f64,
    pub viewing_area: i64,
    pub track_type: String,
    pub track_name: String,
    pub genome_patterns: Vec<String>,
    pub gff_genomes: BTreeMap<String, String>,
    pub species: BTreeMap<String, String>,
    pub templates: ProviderTemplates,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD as f64,
            viewing_area: VIEWING_AREA,
            track_type: TRACK_TYPE.to_string(),
            track_name: TRACK_NAME.to_string(),
            genome_patterns: DEFAULT_GENOME_PATTERNS.iter().map(|p| p.to_string()).collect(),
            gff_genomes: DEFAULT_GFF_GENOMES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            species: DEFAULT_SPECIES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            templates: ProviderTemplates::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn neighbor_threshold(&self) -> Result<i64, ConfigError> {
        coerce_threshold(self.threshold)
    }

    pub fn track(&self) -> TrackLabel {
        TrackLabel {
            kind: self.track_type.clone(),
            name: self.track_name.clone(),
        }
    }

    pub fn species_table(&self) -> SpeciesTable {
        SpeciesTable(self.species.clone())
    }
}

/// Threshold from the batch command line. Any finite number is accepted
/// and truncated like [`coerce_threshold`]; anything else is an error.
pub fn parse_threshold_arg(raw: Option<&str>) -> Result<i64, ConfigError> {
    match raw {
        None => Ok(DEFAULT_THRESHOLD),
        Some(s) => {
            let value = s
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::NonNumericThreshold(s.to_string()))?;
            coerce_threshold(value)
        }
    }
}

/// Lenient threshold coercion shared by both entry points: fractional values are
/// truncated toward zero with a warning.
pub fn coerce_threshold(value: f64) -> Result<i64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFiniteThreshold(value));
    }
    let truncated = value.trunc();
    if truncated != value {
        warn!("threshold {} converted to integer {}", value, truncated as i64);
    }
    Ok(truncated as i64)
}

/// Track label for custom-track URL fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackLabel {
    pub kind: String,
    pub name: String,
}

impl Default for TrackLabel {
    fn default() -> Self {
        Self {
            kind: TRACK_TYPE.to_string(),
            name: TRACK_NAME.to_string(),
        }
    }
}

/// Compiled locus patterns deciding which batch lines are genomic.
#[derive(Debug, Clone)]
pub struct GenomePatterns {
    patterns: Vec<Regex>,
}

impl GenomePatterns {
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|source| ConfigError::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn matches(&self, locus: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(locus))
    }
}

/// Species names keyed by two-letter build prefix.
#[derive(Debug, Clone, Default)]
pub struct SpeciesTable(BTreeMap<String, String>);

impl SpeciesTable {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self(entries)
    }

    pub fn lookup(&self, build: &str) -> Option<&str> {
        let prefix = build.get(..2)?;
        self.0.get(prefix).map(String::as_str)
    }
}
