//! Request-path driver: hits → neighbors → expert expansion → ranking →
//! links.

use crate::common::HitRecord;
use crate::config::PipelineConfig;
use crate::error::{ConfigError, LookupMiss};
use crate::expert::{ExpertRegistry, ReportRow};
use crate::lookup::ReferenceTables;
use crate::neighbors::NeighborFinder;
use crate::report::{sort_for_report, ReportRanker, UrlComposer};
use log::{error, info, warn};
use serde::Serialize;

/// A row that could not be reported, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFailure {
    pub query: String,
    pub hit: String,
    #[serde(serialize_with = "serialize_miss")]
    pub miss: LookupMiss,
}

fn serialize_miss<S: serde::Serializer>(miss: &LookupMiss, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(miss)
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub failures: Vec<RowFailure>,
    /// More than one query id was present; rows carry `sort_order`.
    pub multi_query: bool,
}

pub struct ReportPipeline<'a, T: ReferenceTables + ?Sized> {
    config: PipelineConfig,
    registry: ExpertRegistry,
    composer: UrlComposer,
    tables: &'a T,
}

impl<'a, T: ReferenceTables + ?Sized> ReportPipeline<'a, T> {
    pub fn new(config: PipelineConfig, tables: &'a T) -> Self {
        let registry = ExpertRegistry::new(config.species_table());
        let composer = UrlComposer::new(&config);
        Self {
            config,
            registry,
            composer,
            tables,
        }
    }

    pub fn run(&self, mut hits: Vec<HitRecord>) -> Result<Report, ConfigError> {
        let threshold = self.config.neighbor_threshold()?;
        NeighborFinder::new(threshold).annotate(&mut hits);

        let mut failures = Vec::new();
        let mut rows = Vec::new();
        let mut unknown = 0usize;

        for hit in &hits {
            if !self.registry.is_registered(hit.build_name()) {
                unknown += 1;
                continue;
            }
            match self.registry.expand(hit, self.tables) {
                Ok(expanded) => rows.extend(expanded),
                Err(miss) => {
                    error!("{}: cannot expand {}: {}", hit.query, hit.hit, miss);
                    failures.push(RowFailure {
                        query: hit.query.clone(),
                        hit: hit.hit.clone(),
                        miss,
                    });
                }
            }
        }
        if unknown > 0 {
            warn!("{} hits from builds without an expert were dropped", unknown);
        }

        sort_for_report(&mut rows);
        let multi_query = ReportRanker.rank(&mut rows);

        let mut described = Vec::with_capacity(rows.len());
        for mut row in rows {
            match self.composer.describe(&mut row, self.tables) {
                Ok(()) => described.push(row),
                Err(miss) => {
                    error!("{}: cannot describe {}: {}", row.query(), row.hit(), miss);
                    failures.push(RowFailure {
                        query: row.query().to_string(),
                        hit: row.hit().to_string(),
                        miss,
                    });
                }
            }
        }

        info!(
            "report: {} hits, {} rows, {} failures",
            hits.len(),
            described.len(),
            failures.len()
        );
        Ok(Report {
            rows: described,
            failures,
            multi_query,
        })
    }
}
