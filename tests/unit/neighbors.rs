//! Unit tests for neighbors/

use hitlink::common::{HitRecord, Neighbor};
use hitlink::neighbors::{classify, find_neighbors, is_neighbor, NeighborFinder, Relation, Span};
use proptest::prelude::*;
use super::helpers::make_hit;

const CHR1: &str = "mt_genome_3_5_1:mt_3_5_1_chr1";
const CHR2: &str = "mt_genome_3_5_1:mt_3_5_1_chr2";

fn annotate(mut hits: Vec<HitRecord>, threshold: i64) -> Vec<HitRecord> {
    NeighborFinder::new(threshold).annotate(&mut hits);
    hits
}

#[test]
fn test_overlap_scenario() {
    let hits = annotate(
        vec![
            make_hit("A", CHR1, 100, 500, 50.0),
            make_hit("B", CHR1, 450, 600, 50.0),
            make_hit("C", CHR1, 700, 800, 50.0),
        ],
        50,
    );

    assert_eq!(hits[0].neighbors.as_ref().unwrap().as_slice(), &[Neighbor::new(450, 600, "B")]);
    assert_eq!(hits[1].neighbors.as_ref().unwrap().as_slice(), &[Neighbor::new(100, 500, "A")]);
    assert!(hits[2].neighbors.is_none());
}

#[test]
fn test_containment_both_directions() {
    let outer = Span::new(100, 1000);
    let inner = Span::new(400, 500);
    assert_eq!(classify(outer, inner, 0), Some(Relation::Contains));
    assert_eq!(classify(inner, outer, 0), Some(Relation::ContainedBy));
}

#[test]
fn test_proximity_threshold_is_exclusive() {
    // Disjoint [100,200] and [300,400]: the only non-negative distance is
    // 400 - 100 = 300.
    let a = Span::new(100, 200);
    let b = Span::new(300, 400);
    assert!(!is_neighbor(a, b, 300));
    assert_eq!(classify(a, b, 301), Some(Relation::Proximity(300)));
}

#[test]
fn test_extreme_coordinates_do_not_wrap() {
    let a = Span::new(9_000_000_000_000_000_000, 9_100_000_000_000_000_000);
    let b = Span::new(-9_000_000_000_000_000_000, -8_900_000_000_000_000_000);
    assert_eq!(classify(a, b, 10_000), None);
    assert_eq!(classify(b, a, i64::MAX), None);
    assert!(!is_neighbor(a, b, 10_000));
}

#[test]
fn test_reverse_strand_coordinates_are_kept() {
    let hits = annotate(
        vec![make_hit("A", CHR1, 100, 500, 50.0), make_hit("B", CHR1, 600, 450, 50.0)],
        0,
    );
    assert_eq!(hits[0].neighbors.as_ref().unwrap().as_slice(), &[Neighbor::new(600, 450, "B")]);
}

#[test]
fn test_other_tags_never_link() {
    let hits = annotate(
        vec![make_hit("A", CHR1, 100, 500, 50.0), make_hit("B", CHR2, 100, 500, 50.0)],
        10_000,
    );
    assert!(hits.iter().all(|h| h.neighbors.is_none()));
}

#[test]
fn test_single_hit_has_no_neighbors() {
    let hits = annotate(vec![make_hit("A", CHR1, 100, 500, 50.0)], 10_000);
    assert!(hits[0].neighbors.is_none());
}

#[test]
fn test_duplicates_are_not_merged() {
    let hits = annotate(
        vec![
            make_hit("A", CHR1, 100, 500, 50.0),
            make_hit("B", CHR1, 200, 300, 50.0),
            make_hit("B", CHR1, 200, 300, 50.0),
        ],
        0,
    );
    let first = hits[0].neighbors.as_ref().unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first.to_string(), "200,300,B,200,300,B");
    // Each duplicate sees the other, but never itself.
    assert_eq!(hits[1].neighbors.as_ref().unwrap().len(), 2);
}

#[test]
fn test_neighbors_follow_scan_order() {
    let hits = annotate(
        vec![
            make_hit("A", CHR1, 1000, 2000, 50.0),
            make_hit("C", CHR1, 1900, 2100, 50.0),
            make_hit("B", CHR1, 900, 1100, 50.0),
        ],
        0,
    );
    assert_eq!(hits[0].neighbors.as_ref().unwrap().to_string(), "1900,2100,C,900,1100,B");
}

#[test]
fn test_annotate_replaces_previous_lists() {
    let mut hits = annotate(
        vec![make_hit("A", CHR1, 100, 200, 50.0), make_hit("B", CHR1, 150, 250, 50.0)],
        0,
    );
    hits[1].hit = CHR2.to_string();
    let hits = annotate(hits, 0);
    assert!(hits[0].neighbors.is_none());
}

fn span() -> impl Strategy<Value = (i64, i64)> {
    (1i64..20_000, 1i64..20_000)
}

proptest! {
    #[test]
    fn prop_relation_is_symmetric((a1, a2) in span(), (b1, b2) in span(), threshold in 0i64..5_000) {
        let a = Span::new(a1, a2);
        let b = Span::new(b1, b2);
        prop_assert_eq!(is_neighbor(a, b, threshold), is_neighbor(b, a, threshold));
    }

    #[test]
    fn prop_neighbor_lists_are_mutual(
        coords in prop::collection::vec((span(), 0usize..3), 1..24),
        threshold in 0i64..5_000,
    ) {
        let hits: Vec<HitRecord> = coords
            .iter()
            .enumerate()
            .map(|(i, ((from, to), chr))| {
                make_hit(&format!("q{}", i), &format!("mt_genome_3_5_1:mt_3_5_1_chr{}", chr), *from, *to, 50.0)
            })
            .collect();
        let lists = find_neighbors(&hits, threshold);

        for (i, list) in lists.iter().enumerate() {
            let own = format!("q{}", i);
            for n in list.iter().flat_map(|l| l.iter()) {
                // Queries are unique, so a hit never lists itself.
                prop_assert_ne!(&n.query, &own);
                let j: usize = n.query[1..].parse().unwrap();
                let back = lists[j].as_ref().map_or(false, |l| l.iter().any(|m| m.query == own));
                prop_assert!(back);
            }
        }
    }
}
