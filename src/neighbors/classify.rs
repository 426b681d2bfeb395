/// Hit coordinates normalised to `first <= last`. Only used for comparison;
/// stored coordinates keep their orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub first: i64,
    pub last: i64,
}

impl Span {
    pub fn new(from: i64, to: i64) -> Self {
        Self {
            first: from.min(to),
            last: from.max(to),
        }
    }

    /// Inclusive on both ends.
    #[inline]
    pub fn contains(&self, pos: i64) -> bool {
        self.first <= pos && pos <= self.last
    }

    #[inline]
    pub fn encloses(&self, other: &Span) -> bool {
        self.contains(other.first) && self.contains(other.last)
    }
}

/// Why two hits were linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The other hit lies fully inside the subject.
    Contains,
    /// The subject lies fully inside the other hit.
    ContainedBy,
    /// An endpoint of one hit falls inside the other.
    Overlap,
    /// No overlap, but the end-to-start distance is under the threshold.
    Proximity(i64),
}

/// Classify subject `a` against candidate `b`.
///
/// Checks run in a fixed order: containment, partial overlap, then the
/// proximity fallback. The fallback measures `a.last - b.first` and
/// `b.last - a.first`, ignores negative values and links the pair when the
/// smallest remaining value is strictly below `threshold`.
pub fn classify(a: Span, b: Span, threshold: i64) -> Option<Relation> {
    if a.encloses(&b) {
        return Some(Relation::Contains);
    }
    if b.encloses(&a) {
        return Some(Relation::ContainedBy);
    }

    if a.contains(b.first) || a.contains(b.last) || b.contains(a.first) || b.contains(a.last) {
        return Some(Relation::Overlap);
    }

    // A negative distance here would already have been caught as an
    // overlap; counting it would link hits that are far apart. Saturating
    // keeps coordinates near the i64 limits from wrapping into range.
    let nearest = [a.last.saturating_sub(b.first), b.last.saturating_sub(a.first)]
        .into_iter()
        .filter(|d| *d >= 0)
        .min()?;

    if nearest < threshold {
        Some(Relation::Proximity(nearest))
    } else {
        None
    }
}

#[inline]
pub fn is_neighbor(a: Span, b: Span, threshold: i64) -> bool {
    classify(a, b, threshold).is_some()
}
