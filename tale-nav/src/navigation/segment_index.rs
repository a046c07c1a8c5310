//! Segment lookup by playback time
//!
//! Answers "which segment owns timestamp t" over one language's flattened
//! segment sequence. The index is immutable; a story or language change
//! builds a new one.
//!
//! **Design:**
//! - Segments kept in content order (non-decreasing `start`)
//! - `reach[i]` holds the furthest `end` among segments `0..=i`, which is
//!   non-decreasing even when segments overlap
//! - Lookup is two binary searches, O(log n)

use tale_common::Segment;

/// Time-ordered view over a segment sequence
#[derive(Debug, Clone, Default)]
pub struct SegmentIndex {
    segments: Vec<Segment>,

    /// Running maximum of `end` (same length as `segments`)
    reach: Vec<f64>,
}

impl SegmentIndex {
    /// Build an index over segments already sorted by `start`
    ///
    /// Input is expected to have passed `tale_common::story::validate_segments`;
    /// the index does not re-validate.
    pub fn new(segments: Vec<Segment>) -> Self {
        let mut furthest = f64::NEG_INFINITY;
        let reach = segments
            .iter()
            .map(|segment| {
                furthest = furthest.max(segment.end);
                furthest
            })
            .collect();

        Self { segments, reach }
    }

    /// Index of the first segment with `start <= t <= end`
    ///
    /// Returns `None` when `t` falls before the first segment, after the
    /// last one, in a gap between two segments, or is NaN. Where two
    /// segments touch (`a.end == b.start`) the earlier one owns the shared
    /// instant.
    ///
    /// # Examples
    /// ```
    /// use tale_common::Segment;
    /// use tale_nav::SegmentIndex;
    ///
    /// let index = SegmentIndex::new(vec![
    ///     Segment::new(0.0, 2.0, "a"),
    ///     Segment::new(5.0, 7.0, "b"),
    /// ]);
    ///
    /// assert_eq!(index.locate(1.0), Some(0));
    /// assert_eq!(index.locate(3.0), None); // gap
    /// assert_eq!(index.locate(7.0), Some(1));
    /// ```
    pub fn locate(&self, t: f64) -> Option<usize> {
        if t.is_nan() {
            return None;
        }

        // First segment whose end reaches t; every earlier one ends before t
        let first_reaching = self.reach.partition_point(|&end| end < t);
        // Segments [0, starts_before) start at or before t
        let starts_before = self.segments.partition_point(|segment| segment.start <= t);

        (first_reaching < starts_before).then_some(first_reaching)
    }

    /// Segment owning `t`, see [`SegmentIndex::locate`]
    pub fn locate_segment(&self, t: f64) -> Option<&Segment> {
        self.locate(t).map(|i| &self.segments[i])
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
