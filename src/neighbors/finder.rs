use crate::common::{HitRecord, Locus, Neighbor, Neighbors};
use crate::config::DEFAULT_THRESHOLD;
use crate::neighbors::classify::{is_neighbor, Span};
use log::debug;
use rustc_hash::FxHashMap;

/// Hits sharing one chromosome tag, as indices into the full record slice.
/// Indices are in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocusGroup {
    pub tag: String,
    pub indices: Vec<usize>,
}

/// Partition records by chromosome tag. Groups come out in order of first
/// appearance, and no index belongs to two groups.
pub fn partition_by_locus<T: Locus>(records: &[T]) -> Vec<LocusGroup> {
    let mut slot: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<LocusGroup> = Vec::new();

    for (i, rec) in records.iter().enumerate() {
        let tag = rec.locus();
        match slot.get(tag) {
            Some(&g) => groups[g].indices.push(i),
            None => {
                slot.insert(tag, groups.len());
                groups.push(LocusGroup {
                    tag: tag.to_string(),
                    indices: vec![i],
                });
            }
        }
    }
    groups
}

/// Neighbors of `records[subject]` among `candidates`, in candidate order.
///
/// Candidates on a different chromosome tag and the subject itself are
/// skipped. Matches are not de-duplicated.
pub fn scan_subject<T: Locus>(
    records: &[T],
    subject: usize,
    candidates: &[usize],
    threshold: i64,
) -> Option<Neighbors> {
    let a = &records[subject];
    let a_span = Span::new(a.hit_from(), a.hit_to());
    let mut found = Vec::new();

    for &k in candidates {
        if k == subject {
            continue;
        }
        let b = &records[k];
        if b.locus() != a.locus() {
            continue;
        }
        if is_neighbor(a_span, Span::new(b.hit_from(), b.hit_to()), threshold) {
            found.push(Neighbor::new(b.hit_from(), b.hit_to(), b.query()));
        }
    }

    Neighbors::from_vec(found)
}

/// Neighbor lists for one tag group, paired with the record index they
/// belong to.
pub fn find_group_neighbors<T: Locus>(
    records: &[T],
    group: &LocusGroup,
    threshold: i64,
) -> Vec<(usize, Option<Neighbors>)> {
    group
        .indices
        .iter()
        .map(|&i| (i, scan_subject(records, i, &group.indices, threshold)))
        .collect()
}

/// Serial scan over the whole slice, every record against every other.
/// Result `i` belongs to `records[i]`.
pub fn find_neighbors<T: Locus>(records: &[T], threshold: i64) -> Vec<Option<Neighbors>> {
    let all: Vec<usize> = (0..records.len()).collect();
    (0..records.len())
        .map(|i| scan_subject(records, i, &all, threshold))
        .collect()
}

/// Request-path neighbor finder: synchronous, single-threaded.
#[derive(Debug, Clone, Copy)]
pub struct NeighborFinder {
    threshold: i64,
}

impl Default for NeighborFinder {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl NeighborFinder {
    pub fn new(threshold: i64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    /// Fill in `neighbors` on every record. Existing lists are replaced.
    pub fn annotate(&self, records: &mut [HitRecord]) {
        let lists = find_neighbors(records, self.threshold);
        let mut linked = 0usize;
        for (rec, list) in records.iter_mut().zip(lists) {
            if list.is_some() {
                linked += 1;
            }
            rec.neighbors = list;
        }
        debug!(
            "neighbor scan: {} records, {} with neighbors (threshold {})",
            records.len(),
            linked,
            self.threshold
        );
    }
}
