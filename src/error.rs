//! Error taxonomy for the hit pipeline.
//!
//! Parse and config errors abort a run. Probe errors never leave the
//! scheduler (it degrades to serial execution). Lookup misses are reported
//! per hit and stop that hit's rows from being emitted.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Malformed or unreadable input.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is not a regular file")]
    NotAFile { path: PathBuf },
    #[error("line {line}: expected at least {expected} tab-separated columns, found {found}")]
    MissingColumns {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: column {column} is not an integer: {value:?}")]
    InvalidInteger {
        line: usize,
        column: usize,
        value: String,
    },
    #[error("line {line}: column {column} is not a number: {value:?}")]
    InvalidNumber {
        line: usize,
        column: usize,
        value: String,
    },
}

/// Bad run parameters.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("threshold must be a number, got {0:?}")]
    NonNumericThreshold(String),
    #[error("threshold must be a finite number, got {0}")]
    NonFiniteThreshold(f64),
    #[error("invalid genome pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("cannot load config {path}: {reason}")]
    Load { path: PathBuf, reason: String },
}

/// CPU introspection failed. Always recovered locally.
#[derive(Error, Debug)]
pub enum ResourceProbeError {
    #[error("processor accounting is not available on this platform")]
    Unsupported,
    #[error("cannot read process table: {0}")]
    Io(#[from] io::Error),
    #[error("no processors reported")]
    NoProcessors,
}

/// A reference table has no entry for a tag. Indicates broken reference
/// data, not a transient condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupMiss {
    #[error("no destination for tag {0:?}")]
    Destination(String),
    #[error("no target element for tag {0:?}")]
    TargetElement(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Lookup(#[from] LookupMiss),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
