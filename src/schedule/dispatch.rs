use crate::schedule::probe::{derive_limit, CpuProbe};
use indicatif::ProgressBar;
use log::{debug, warn};
use rayon::prelude::*;
use std::fmt;

/// Runs one unit of work per group, at most `limit` at a time.
///
/// Groups are cut into consecutive batches of `limit`; a batch is fully
/// joined before the next one starts, so peak concurrency never exceeds the
/// limit. Results come back in group order.
#[derive(Clone)]
pub struct Scheduler {
    limit: usize,
    progress: Option<ProgressBar>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("limit", &self.limit)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl Scheduler {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            progress: None,
        }
    }

    pub fn serial() -> Self {
        Self::new(1)
    }

    pub fn from_probe(probe: &dyn CpuProbe) -> Self {
        Self::new(derive_limit(probe))
    }

    /// Tick `bar` once per finished group.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn batches<'a, G>(&self, groups: &'a [G]) -> std::slice::Chunks<'a, G> {
        groups.chunks(self.limit)
    }

    pub fn run<G, R, F>(&self, groups: &[G], work: F) -> Vec<R>
    where
        G: Sync,
        R: Send,
        F: Fn(&G) -> R + Sync,
    {
        if let Some(bar) = &self.progress {
            bar.set_length(groups.len() as u64);
        }
        if self.limit == 1 || groups.len() <= 1 {
            return self.run_serial(groups, &work);
        }

        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.limit)
            .thread_name(|i| format!("hitlink-worker-{}", i))
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                warn!("cannot start worker pool ({}), running serially", e);
                return self.run_serial(groups, &work);
            }
        };

        let mut results = Vec::with_capacity(groups.len());
        for (n, batch) in self.batches(groups).enumerate() {
            let out: Vec<R> = pool.install(|| batch.par_iter().map(&work).collect());
            results.extend(out);
            if let Some(bar) = &self.progress {
                bar.inc(batch.len() as u64);
            }
            debug!("batch {} done ({} groups)", n + 1, batch.len());
        }
        results
    }

    fn run_serial<G, R, F>(&self, groups: &[G], work: &F) -> Vec<R>
    where
        F: Fn(&G) -> R,
    {
        groups
            .iter()
            .map(|g| {
                let r = work(g);
                if let Some(bar) = &self.progress {
                    bar.inc(1);
                }
                r
            })
            .collect()
    }
}
