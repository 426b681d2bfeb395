//! Unit tests for report/url.rs

use hitlink::common::{Neighbor, Neighbors, SequenceCategory};
use hitlink::config::{PipelineConfig, TrackLabel};
use hitlink::error::LookupMiss;
use hitlink::expert::{ExpertRegistry, ReportRow};
use hitlink::lookup::InMemoryTables;
use hitlink::report::{browser_reference, continuous_url, format_ref, viewing_window, Provider, RefStyle, UrlComposer};
use super::helpers::{make_hit, reference_tables};

fn triplets(items: &[(i64, i64, &str)]) -> Neighbors {
    Neighbors::from_vec(items.iter().map(|(s, e, q)| Neighbor::new(*s, *e, *q)).collect()).unwrap()
}

/// Expand and return the first row for a hit.
fn first_row(hit: &str, from: i64, to: i64) -> ReportRow {
    let registry = ExpertRegistry::new(PipelineConfig::default().species_table());
    let hit = make_hit("Q1", hit, from, to, 90.0);
    registry.expand(&hit, &reference_tables()).unwrap().remove(0)
}

#[test]
fn test_continuous_url_stitching() {
    let neighbors = triplets(&[(100, 200, "Q1"), (300, 400, "Q2"), (500, 600, "Q2")]);
    let url = continuous_url(Some("http://x?ref=c1"), Some("c1"), Some("Q1"), Some(&neighbors), &TrackLabel::default());
    assert_eq!(
        url.as_deref(),
        Some("http://x?ref=c1,100..200;add=c1+LIS+LIS_QUERY_Q2+300..400,500..600")
    );
}

#[test]
fn test_continuous_url_one_fragment_per_query() {
    let neighbors = triplets(&[(10, 20, "Q3"), (30, 40, "Q2"), (50, 60, "Q3")]);
    let url = continuous_url(Some("u"), Some("c1"), Some("Q1"), Some(&neighbors), &TrackLabel::default());
    assert_eq!(
        url.as_deref(),
        Some("u;add=c1+LIS+LIS_QUERY_Q3+10..20,50..60;add=c1+LIS+LIS_QUERY_Q2+30..40")
    );
}

#[test]
fn test_continuous_url_needs_all_inputs() {
    let neighbors = triplets(&[(100, 200, "Q1")]);
    let track = TrackLabel::default();
    assert!(continuous_url(None, Some("c1"), Some("Q1"), Some(&neighbors), &track).is_none());
    assert!(continuous_url(Some("u"), None, Some("Q1"), Some(&neighbors), &track).is_none());
    assert!(continuous_url(Some("u"), Some("c1"), None, Some(&neighbors), &track).is_none());
    assert!(continuous_url(Some("u"), Some("c1"), Some("Q1"), None, &track).is_none());
}

#[test]
fn test_format_ref_quirks() {
    assert_eq!(format_ref("gm8", RefStyle::Soybase), "gm08");
    assert_eq!(format_ref("gm10", RefStyle::Soybase), "gm10");
    assert_eq!(format_ref("chr8", RefStyle::Jcvi), "chr08");
    assert_eq!(format_ref("chr10", RefStyle::Jcvi), "chr10");
    assert_eq!(format_ref("chr5", RefStyle::Medicago), "Mt5");
    // Only the first digit survives.
    assert_eq!(format_ref("chr12", RefStyle::Medicago), "Mt1");
    assert_eq!(format_ref("contig9", RefStyle::Medicago), "contig9");
    assert_eq!(format_ref("chr05", RefStyle::Hapmap), "chr5");
    assert_eq!(format_ref("chr10", RefStyle::Hapmap), "chr1");
    assert_eq!(format_ref("CcLG07", RefStyle::Cajca), "Cc07");
    assert_eq!(format_ref("scaffold_9", RefStyle::Cajca), "scaffold_9");
    assert_eq!(format_ref("gm8", RefStyle::Plain), "gm8");
}

#[test]
fn test_browser_reference() {
    assert_eq!(browser_reference("mt_3_5_1_chr5"), "chr5");
    assert_eq!(browser_reference("lj_scaffold_12"), "scaffold_12");
    assert_eq!(browser_reference("gm8"), "gm8");
}

#[test]
fn test_viewing_window_keeps_orientation() {
    assert_eq!(viewing_window(60_000, 70_000, 50_000), (10_000, 120_000));
    assert_eq!(viewing_window(100, 200, 50_000), (1, 50_200));
    assert_eq!(viewing_window(70_000, 60_000, 50_000), (120_000, 10_000));
    assert_eq!(viewing_window(200, 100, 50_000), (50_200, 1));
}

#[test]
fn test_viewing_window_saturates_at_coordinate_limit() {
    assert_eq!(viewing_window(1, i64::MAX - 10, 50_000), (1, i64::MAX));
    assert_eq!(viewing_window(i64::MAX, i64::MAX - 60_000, 50_000), (i64::MAX, i64::MAX - 110_000));
}

#[test]
fn test_provider_for_tag() {
    assert_eq!(Provider::for_tag("mt_genome_3_0@hapmap"), Some(Provider::Hapmap));
    assert_eq!(Provider::for_tag("swissprot_viridiplantae_201011"), Some(Provider::Uniprot));
    assert_eq!(Provider::for_tag("mt_genome_3_0"), None);
    assert!(Provider::Lis.needs_ordered_window());
    assert!(!Provider::Soybase.needs_ordered_window());
    assert!(!Provider::GeneAtlas.is_genome_browser());
}

#[test]
fn test_describe_soybase_row() {
    let composer = UrlComposer::new(&PipelineConfig::default());
    let mut row = first_row("gm_genome_rel_1_01:gm8", 100, 200);
    composer.describe(&mut row, &reference_tables()).unwrap();

    let url = row.element_url.as_deref().unwrap();
    assert!(url.starts_with("http://soybase.org/gbrowse/cgi-bin/gbrowse/gmax1.01/?ref=gm08;start=1;stop=50200;"));
    assert!(url.ends_with("add=gm08+LIS+LIS_Query_Q1+200..100"));
    assert_eq!(row.destination_url.as_deref(), Some("http://soybase.org"));
    assert_eq!(row.element_display_name.as_deref(), Some("Gm08"));
    assert_eq!(row.genome_build_version.as_deref(), Some("gm_genome_rel_1_01"));
    // No neighbors, no continuous link.
    assert!(row.contin_url.is_none());
}

#[test]
fn test_describe_orders_reversed_kazusa_window() {
    let composer = UrlComposer::new(&PipelineConfig::default());
    let mut row = first_row("lj_genome_2_5:lj_chr3", 70_000, 60_000);
    composer.describe(&mut row, &reference_tables()).unwrap();

    let url = row.element_url.as_deref().unwrap();
    assert!(url.contains("?ref=chr3;start=10000;stop=120000;"));
}

#[test]
fn test_describe_builds_continuous_url_from_neighbors() {
    let composer = UrlComposer::new(&PipelineConfig::default());
    let mut row = first_row("gm_genome_rel_1_01:gm8", 100, 200);
    row.record.neighbors = Neighbors::from_vec(vec![Neighbor::new(250, 300, "Q1"), Neighbor::new(400, 500, "Q2")]);
    composer.describe(&mut row, &reference_tables()).unwrap();

    let base = row.element_url.clone().unwrap();
    assert_eq!(
        row.contin_url.as_deref(),
        Some(format!("{},250..300;add=gm8+LIS+LIS_QUERY_Q2+400..500", base).as_str())
    );
}

#[test]
fn test_describe_gene_atlas_and_uniprot() {
    let composer = UrlComposer::new(&PipelineConfig::default());

    let mut atlas = first_row("mt_affy_genechip_target:Mtr.1234.1.S1_at", 1, 90);
    composer.describe(&mut atlas, &reference_tables()).unwrap();
    assert_eq!(
        atlas.element_url.as_deref(),
        Some("http://bioinfo.noble.org/gene-atlas/v2/probeset.php?id=Mtr.1234.1.S1_at&submit=Go")
    );
    assert!(atlas.contin_url.is_none());

    let mut prot = first_row("swissprot_viridiplantae_201011:P12345", 1, 90);
    composer.describe(&mut prot, &reference_tables()).unwrap();
    assert_eq!(prot.element_url.as_deref(), Some("http://www.uniprot.org/uniprot/P12345"));
}

#[test]
fn test_alpheus_link_only_when_configured() {
    let mut row = first_row("ca_transcripts_201006:ca_contig_42", 5, 400);
    UrlComposer::new(&PipelineConfig::default())
        .describe(&mut row, &reference_tables())
        .unwrap();
    assert!(row.alpheus_url.is_none());

    let mut config = PipelineConfig::default();
    config.templates.alpheus = Some("http://alpheus.example/ref/{ref_id}?from={hit_from}&to={hit_to}".to_string());
    UrlComposer::new(&config).describe(&mut row, &reference_tables()).unwrap();
    assert_eq!(row.alpheus_url.as_deref(), Some("http://alpheus.example/ref/4242?from=5&to=400"));
}

#[test]
fn test_describe_miss_leaves_row_untouched() {
    let composer = UrlComposer::new(&PipelineConfig::default());
    let tables = InMemoryTables::new().with_destination("gm_genome_rel_1_01@soybase", "SoyBase", None);
    let mut row = ReportRow::from_hit(
        &make_hit("Q1", "gm_genome_rel_1_01:gm8", 100, 200, 90.0),
        "gm_genome_rel_1_01@soybase:gm8".to_string(),
        SequenceCategory::GenomicContext,
        "SoyBase".to_string(),
    );
    let before = row.clone();

    assert_eq!(
        composer.describe(&mut row, &tables).unwrap_err(),
        LookupMiss::TargetElement("gm8".to_string())
    );
    assert_eq!(row, before);
}
