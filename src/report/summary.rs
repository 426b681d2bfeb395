use crate::expert::ReportRow;
use serde::Serialize;

/// Multi-query overview entry: a first-ranked row plus every reference its
/// query reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySummary {
    pub row: ReportRow,
    /// Sorted, without duplicates.
    pub references: Vec<String>,
}

/// One summary per row with `sort_order == 1`, in row order.
pub fn summarize_queries(rows: &[ReportRow]) -> Vec<QuerySummary> {
    rows.iter()
        .filter(|r| r.sort_order == Some(1))
        .map(|lead| {
            let mut references: Vec<String> = rows
                .iter()
                .filter(|r| r.query() == lead.query())
                .map(|r| r.reference.clone())
                .collect();
            references.sort();
            references.dedup();
            QuerySummary {
                row: lead.clone(),
                references,
            }
        })
        .collect()
}
