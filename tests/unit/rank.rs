//! Unit tests for report/rank.rs and report/summary.rs

use hitlink::common::SequenceCategory::{self, Expression, GenomicContext, RoleAndFunction};
use hitlink::expert::ReportRow;
use hitlink::report::{assign_sort_order, sort_for_report, summarize_queries, write_json, write_xml, ReportRanker};
use super::helpers::make_row;

fn rows(entries: &[(&str, SequenceCategory, f64)]) -> Vec<ReportRow> {
    entries.iter().map(|(q, c, b)| make_row(q, *c, *b)).collect()
}

fn orders(rows: &[ReportRow]) -> Vec<Option<u32>> {
    rows.iter().map(|r| r.sort_order).collect()
}

#[test]
fn test_rank_restarts_per_query() {
    let mut rows = rows(&[
        ("q1", GenomicContext, 90.0),
        ("q1", GenomicContext, 80.0),
        ("q1", GenomicContext, 70.0),
        ("q2", GenomicContext, 60.0),
        ("q2", GenomicContext, 50.0),
    ]);
    assert!(ReportRanker.rank(&mut rows));
    assert_eq!(orders(&rows), vec![Some(1), Some(2), Some(3), Some(1), Some(2)]);
}

#[test]
fn test_rank_counts_runs_not_queries() {
    let mut rows = rows(&[("q1", GenomicContext, 1.0), ("q2", GenomicContext, 1.0), ("q1", GenomicContext, 1.0)]);
    assign_sort_order(&mut rows);
    assert_eq!(orders(&rows), vec![Some(1), Some(1), Some(1)]);
}

#[test]
fn test_single_query_is_not_ranked() {
    let mut rows = rows(&[("q1", GenomicContext, 90.0), ("q1", Expression, 80.0)]);
    rows[0].sort_order = Some(7);
    assert!(!ReportRanker.rank(&mut rows));
    assert_eq!(orders(&rows), vec![None, None]);
}

#[test]
fn test_sort_category_then_bit_score() {
    let mut rows = rows(&[
        ("q1", RoleAndFunction, 300.0),
        ("q1", GenomicContext, 50.0),
        ("q2", Expression, 90.0),
        ("q2", GenomicContext, 120.0),
    ]);
    sort_for_report(&mut rows);
    let got: Vec<(SequenceCategory, f64)> = rows.iter().map(|r| (r.sequence_category, r.bit_score())).collect();
    assert_eq!(
        got,
        vec![
            (GenomicContext, 120.0),
            (GenomicContext, 50.0),
            (Expression, 90.0),
            (RoleAndFunction, 300.0),
        ]
    );
}

#[test]
fn test_summaries_collect_references() {
    let mut rows = rows(&[
        ("q1", GenomicContext, 90.0),
        ("q1", GenomicContext, 80.0),
        ("q2", GenomicContext, 60.0),
    ]);
    rows[1].reference = "Medicago HapMap".to_string();
    ReportRanker.rank(&mut rows);

    let summaries = summarize_queries(&rows);
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].row.query(), "q1");
    assert_eq!(summaries[0].references, vec!["Medicago HapMap".to_string(), "SoyBase".to_string()]);
    assert_eq!(summaries[1].references, vec!["SoyBase".to_string()]);
}

#[test]
fn test_json_export() {
    let rows = rows(&[("q1", RoleAndFunction, 90.0)]);
    let mut out = Vec::new();
    write_json(&rows, &mut out).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let row = &value[0];
    assert_eq!(row["query"], "q1");
    assert_eq!(row["hit"], "gm_genome_rel_1_01@soybase:gm8");
    assert_eq!(row["sequence_category"], "Role and Function");
    assert_eq!(row["sequence_category_id"], 3);
    assert!(row["neighbors"].is_null());
}

#[test]
fn test_xml_export() {
    let mut rows = rows(&[("q1", RoleAndFunction, 90.0), ("q2", Expression, 80.0)]);
    rows[0].reference = "Soy<Base> & \"more\"".to_string();
    let mut out = Vec::new();
    write_xml(&rows, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("<report-row>").count(), 2);
    assert_eq!(text.matches("</report-row>").count(), 2);
    assert!(text.contains("<query>q1</query>"));
    assert!(text.contains("<reference>Soy&lt;Base&gt; &amp; &quot;more&quot;</reference>"));
    assert!(text.contains("<sequence-category>Role and Function</sequence-category>"));
    assert!(text.contains("<sequence-category-id type=\"integer\">3</sequence-category-id>"));
    assert!(text.contains("<bit-score type=\"float\">90.0</bit-score>"));
    assert!(text.contains("<neighbors nil=\"true\"/>"));
}
