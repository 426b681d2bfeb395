//! Interface to the external alignment-search command.
//!
//! The search itself is opaque: it receives a job id and hash and reports
//! back a single integer status.

use log::{info, warn};
use std::process::Command;

/// Search completed with results.
pub const SUCCESS: i32 = 0;
/// Search ran but found nothing.
pub const NO_HITS: i32 = 68;
/// Search was not run: bad parameters or the command could not start.
pub const NOT_RUN: i32 = 75;

/// One submitted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchJob {
    pub id: i64,
    pub hash: String,
}

impl SearchJob {
    pub fn new(id: i64, hash: impl Into<String>) -> Self {
        Self {
            id,
            hash: hash.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.id > 0 && !self.hash.is_empty()
    }
}

pub trait AlignmentSearch {
    fn run(&self, job: &SearchJob) -> i32;
}

/// Runs a local command as `program [args..] -i <id> -g <hash>` and
/// returns its exit status.
#[derive(Debug, Clone)]
pub struct CommandSearch {
    program: String,
    args: Vec<String>,
}

impl CommandSearch {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn command(&self, job: &SearchJob) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("-i")
            .arg(job.id.to_string())
            .arg("-g")
            .arg(&job.hash);
        cmd
    }
}

impl AlignmentSearch for CommandSearch {
    fn run(&self, job: &SearchJob) -> i32 {
        if !job.is_valid() {
            return NOT_RUN;
        }

        info!("running search {} via {}", job.id, self.program);
        match self.command(job).status() {
            // Killed by a signal: no code to report.
            Ok(status) => status.code().unwrap_or(NOT_RUN),
            Err(e) => {
                warn!("cannot start {}: {}", self.program, e);
                NOT_RUN
            }
        }
    }
}

/// User-facing text for a search status, `None` for success and codes
/// outside the known range.
pub fn status_message(code: i32) -> Option<String> {
    let text = match code {
        NO_HITS => "Your search returned 0 hits.".to_string(),
        71 => "Unknown sequence format. Please use FASTA.".to_string(),
        72 => "Please enter your sequence(s) in Plain Text as FASTA.".to_string(),
        65..=70 | 73 | 75 => format!("Your search returned error code {}.", code),
        _ => return None,
    };
    Some(text)
}
