//! Unit tests for pipeline/

use hitlink::config::PipelineConfig;
use hitlink::error::{ConfigError, LookupMiss};
use hitlink::pipeline::ReportPipeline;
use super::helpers::{make_hit, reference_tables};

#[test]
fn test_multi_query_report() {
    let tables = reference_tables();
    let hits = vec![
        make_hit("q1", "mt_genome_3_0:chr5", 1000, 2000, 150.0),
        make_hit("q2", "gm_genome_rel_1_01:gm8", 100, 200, 90.0),
        make_hit("q1", "swissprot_viridiplantae_201011:P12345", 1, 90, 300.0),
        make_hit("q2", "zm_genome_9:chr1", 1, 90, 999.0),
    ];
    let report = ReportPipeline::new(PipelineConfig::default(), &tables).run(hits).unwrap();

    assert!(report.multi_query);
    assert!(report.failures.is_empty());
    let got: Vec<(&str, &str, Option<u32>)> = report
        .rows
        .iter()
        .map(|r| (r.query(), r.hit(), r.sort_order))
        .collect();
    assert_eq!(
        got,
        vec![
            ("q1", "mt_genome_3_0@hapmap:chr5", Some(1)),
            ("q1", "mt_genome_3_0@jcvi:chr5", Some(2)),
            ("q2", "gm_genome_rel_1_01@soybase:gm8", Some(1)),
            ("q1", "swissprot_viridiplantae_201011:P12345", Some(1)),
        ]
    );
    assert!(report.rows.iter().all(|r| r.element_display_name.is_some()));
}

#[test]
fn test_single_query_report_is_unranked() {
    let tables = reference_tables();
    let hits = vec![
        make_hit("q1", "gm_genome_rel_1_01:gm8", 100, 200, 90.0),
        make_hit("q1", "gm_genome_rel_1_01:gm8", 5000, 5200, 70.0),
    ];
    let report = ReportPipeline::new(PipelineConfig::default(), &tables).run(hits).unwrap();

    assert!(!report.multi_query);
    assert!(report.rows.iter().all(|r| r.sort_order.is_none()));
    // The two hits are within 10000 of each other, so both get a continuous link.
    assert!(report.rows.iter().all(|r| r.contin_url.is_some()));
}

#[test]
fn test_lookup_misses_are_reported() {
    let tables = reference_tables().with_destination("cc_genome_1_0@lis", "Cajanus LIS", None);
    let hits = vec![
        make_hit("q1", "cc_genome_1_0:CcLG99", 100, 200, 90.0),
        make_hit("q1", "gm_genome_rel_1_01:gm8", 100, 200, 80.0),
        make_hit("q1", "mt_genome_3_5_1:mt_3_5_1_chr5", 100, 200, 70.0),
    ];
    let report = ReportPipeline::new(PipelineConfig::default(), &tables).run(hits).unwrap();

    // CcLG99 has no element entry; mt_3_5_1_chr5 is present.
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].hit, "cc_genome_1_0@lis:CcLG99");
    assert_eq!(report.failures[0].miss, LookupMiss::TargetElement("CcLG99".to_string()));
}

#[test]
fn test_fractional_threshold_is_truncated() {
    let tables = reference_tables();
    let config = PipelineConfig {
        threshold: 300.9,
        ..PipelineConfig::default()
    };
    // [100,200] vs [300,400]: distance 300, not below 300.
    let hits = vec![
        make_hit("q1", "gm_genome_rel_1_01:gm8", 100, 200, 90.0),
        make_hit("q1", "gm_genome_rel_1_01:gm8", 300, 400, 80.0),
    ];
    let report = ReportPipeline::new(config, &tables).run(hits).unwrap();
    assert!(report.rows.iter().all(|r| r.record.neighbors.is_none()));
}

#[test]
fn test_non_finite_threshold_rejected() {
    let tables = reference_tables();
    let config = PipelineConfig {
        threshold: f64::NAN,
        ..PipelineConfig::default()
    };
    let err = ReportPipeline::new(config, &tables).run(Vec::new()).unwrap_err();
    assert!(matches!(err, ConfigError::NonFiniteThreshold(_)));
}
