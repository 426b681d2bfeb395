use crate::error::ResourceProbeError;
use log::{debug, warn};
use rustc_hash::FxHashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Processor counts at probe time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuInfo {
    /// Logical processors.
    pub total: usize,
    /// Distinct processors with a process in the running state.
    pub busy: usize,
}

impl CpuInfo {
    pub fn free(&self) -> usize {
        self.total.saturating_sub(self.busy)
    }
}

pub trait CpuProbe {
    fn probe(&self) -> Result<CpuInfo, ResourceProbeError>;
}

/// Linux probe: logical processors from `num_cpus`, busy processors from
/// the state and last-processor fields of `/proc/<pid>/stat`.
#[derive(Debug, Clone)]
pub struct ProcStatProbe {
    proc_root: PathBuf,
}

impl Default for ProcStatProbe {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
        }
    }
}

impl ProcStatProbe {
    pub fn with_root(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    /// Count distinct processors running an `R`-state process.
    pub fn busy_processors(&self) -> Result<usize, ResourceProbeError> {
        let mut running: FxHashSet<u32> = FxHashSet::default();

        for entry in fs::read_dir(&self.proc_root)? {
            let entry = entry?;
            let name = entry.file_name();
            let is_pid = name
                .to_str()
                .map(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
                .unwrap_or(false);
            if !is_pid {
                continue;
            }

            let stat = match read_stat(&entry.path().join("stat")) {
                Ok(Some(s)) => s,
                Ok(None) => continue,
                Err(e) => return Err(e.into()),
            };
            if let Some(cpu) = running_processor(&stat) {
                running.insert(cpu);
            }
        }
        Ok(running.len())
    }
}

/// Processes exit between listing and reading; treat those as absent.
fn read_stat(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Ok(None),
        Err(e) => Err(e),
    }
}

/// Processor of a running process from one `stat` line, `None` otherwise.
///
/// The command name (field 2) is parenthesised and may contain spaces, so
/// fields are counted from the last `)`. State is field 3 and the
/// last-run processor is field 39.
pub fn running_processor(stat: &str) -> Option<u32> {
    let close = stat.rfind(')')?;
    let fields: Vec<&str> = stat[close + 1..].split_whitespace().collect();
    if fields.first().copied() != Some("R") {
        return None;
    }
    fields.get(36)?.parse().ok()
}

impl CpuProbe for ProcStatProbe {
    fn probe(&self) -> Result<CpuInfo, ResourceProbeError> {
        if !cfg!(target_os = "linux") {
            return Err(ResourceProbeError::Unsupported);
        }
        let total = num_cpus::get();
        if total == 0 {
            return Err(ResourceProbeError::NoProcessors);
        }
        let busy = self.busy_processors()?;
        Ok(CpuInfo { total, busy })
    }
}

/// `min(total / 2, free)`, at least 1.
pub fn concurrency_limit(info: CpuInfo) -> usize {
    (info.total / 2).min(info.free()).max(1)
}

/// Concurrency limit from a probe. A failed probe means serial execution.
pub fn derive_limit(probe: &dyn CpuProbe) -> usize {
    match probe.probe() {
        Ok(info) => {
            let limit = concurrency_limit(info);
            debug!(
                "cpu probe: {} processors, {} busy, limit {}",
                info.total, info.busy, limit
            );
            limit
        }
        Err(e) => {
            warn!("cpu probe failed ({}), running serially", e);
            1
        }
    }
}
