use crate::expert::ReportRow;
use log::debug;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

/// Report order: category ascending, then bit score descending.
pub fn report_order(a: &ReportRow, b: &ReportRow) -> Ordering {
    match a.sequence_category.cmp(&b.sequence_category) {
        Ordering::Equal => {}
        ord => return ord,
    }
    b.bit_score()
        .partial_cmp(&a.bit_score())
        .unwrap_or(Ordering::Equal)
}

/// Stable sort into report order.
pub fn sort_for_report(rows: &mut [ReportRow]) {
    rows.sort_by(report_order);
}

pub fn distinct_queries(rows: &[ReportRow]) -> usize {
    rows.iter().map(|r| r.query()).collect::<FxHashSet<_>>().len()
}

/// Number rows 1, 2, 3, ... while the query stays the same, restarting at 1
/// whenever it differs from the previous row's.
pub fn assign_sort_order(rows: &mut [ReportRow]) {
    let mut order = 0u32;
    let mut previous: Option<String> = None;
    for row in rows.iter_mut() {
        if previous.as_deref() == Some(row.query()) {
            order += 1;
        } else {
            previous = Some(row.query().to_string());
            order = 1;
        }
        row.sort_order = Some(order);
    }
}

/// Per-query ranking, used only when the report spans more than one query.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRanker;

impl ReportRanker {
    /// Rank rows in their current order. Returns whether ranking was
    /// applied; single-query reports keep `sort_order` unset.
    pub fn rank(&self, rows: &mut [ReportRow]) -> bool {
        let queries = distinct_queries(rows);
        if queries <= 1 {
            for row in rows.iter_mut() {
                row.sort_order = None;
            }
            return false;
        }
        assign_sort_order(rows);
        debug!("ranked {} rows across {} queries", rows.len(), queries);
        true
    }
}
