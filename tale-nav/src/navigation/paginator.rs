//! Fixed-size pagination of the segment sequence
//!
//! Page 0 is the cover and holds no segments. Content pages start at 1 and
//! each holds `chunk_size` consecutive segments, the last one possibly
//! fewer. Pages are derived from `(segment count, chunk size)` and never
//! stored, so a language switch cannot leave stale pages behind.

use std::num::NonZeroUsize;
use std::ops::Range;

use tale_common::{Error, Result, Segment};

/// The reserved cover page
pub const COVER_PAGE: usize = 0;

/// One content page: a contiguous slice of the flattened sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page number (1-based; 0 is the cover)
    pub number: usize,
    /// Segment indices on this page
    pub range: Range<usize>,
}

impl Page {
    /// This page's segments out of the full sequence
    pub fn segments<'a>(&self, all: &'a [Segment]) -> &'a [Segment] {
        all.get(self.range.clone()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Content pages for `segments`, cover excluded
///
/// Returns `ceil(n / chunk_size)` pages numbered from 1.
pub fn paginate(segments: &[Segment], chunk_size: NonZeroUsize) -> Vec<Page> {
    let count = segments.len();
    let chunk = chunk_size.get();

    (0..count)
        .step_by(chunk)
        .enumerate()
        .map(|(i, start)| Page {
            number: i + 1,
            range: start..(start + chunk).min(count),
        })
        .collect()
}

/// Page holding segment `index`, counting the cover as page 0
pub fn page_of(index: usize, chunk_size: NonZeroUsize) -> usize {
    index / chunk_size.get() + 1
}

/// Content pages plus the cover page
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use tale_nav::navigation::paginator::total_pages;
///
/// let four = NonZeroUsize::new(4).unwrap();
/// assert_eq!(total_pages(9, four), 4);
/// assert_eq!(total_pages(0, four), 1);
/// ```
pub fn total_pages(segment_count: usize, chunk_size: NonZeroUsize) -> usize {
    segment_count.div_ceil(chunk_size.get()) + 1
}

/// Pagination with a fixed chunk size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    chunk_size: NonZeroUsize,
}

impl Paginator {
    /// Create a paginator; a zero chunk size is rejected
    pub fn new(chunk_size: usize) -> Result<Self> {
        let chunk_size = NonZeroUsize::new(chunk_size)
            .ok_or_else(|| Error::InvalidInput("chunk size must be at least 1".to_string()))?;
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size.get()
    }

    pub fn paginate(&self, segments: &[Segment]) -> Vec<Page> {
        paginate(segments, self.chunk_size)
    }

    pub fn page_of(&self, index: usize) -> usize {
        page_of(index, self.chunk_size)
    }

    pub fn total_pages(&self, segment_count: usize) -> usize {
        total_pages(segment_count, self.chunk_size)
    }

    /// Segment indices shown on `page`
    ///
    /// The cover yields an empty range; a page past the last one yields `None`.
    pub fn page_range(&self, page: usize, segment_count: usize) -> Option<Range<usize>> {
        if page == COVER_PAGE {
            return Some(0..0);
        }
        if page >= self.total_pages(segment_count) {
            return None;
        }

        let chunk = self.chunk_size.get();
        let start = (page - 1) * chunk;
        Some(start..(start + chunk).min(segment_count))
    }
}
