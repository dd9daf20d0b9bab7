use std::fmt;
use std::ops::Range;

/// A character range `[offset, offset + length)` of a document.
///
/// A zero-length region is a caret position. Regions are plain values: one
/// may describe a range of a future document state, and is only meaningful
/// once [resolved](Region::is_resolved_in) against the current length.
///
/// Ordering is by offset, then length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Region {
    offset: usize,
    length: usize,
}

impl Region {
    pub const fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Region covering `[start, end)`; an inverted range becomes a caret at `start`.
    pub fn from_range(range: Range<usize>) -> Self {
        Self::new(range.start, range.end.saturating_sub(range.start))
    }

    pub fn offset(self) -> usize {
        self.offset
    }

    pub fn length(self) -> usize {
        self.length
    }

    /// Exclusive end offset, saturating at `usize::MAX`.
    pub fn end(self) -> usize {
        self.offset.saturating_add(self.length)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.length == 0
    }

    pub fn range(self) -> Range<usize> {
        self.offset..self.end()
    }

    /// True if the region lies within a document of `document_length` characters.
    pub fn is_resolved_in(self, document_length: usize) -> bool {
        self.end() <= document_length
    }

    /// Half-open interval intersection: `max(starts) < min(ends)`.
    ///
    /// A zero-length region never overlaps anything, not even a region that
    /// contains its position.
    pub fn overlaps_with(self, other_offset: usize, other_length: usize) -> bool {
        let start = self.offset.max(other_offset);
        let end = self.end().min(other_offset.saturating_add(other_length));
        start < end
    }

    pub fn overlaps(self, other: Region) -> bool {
        self.overlaps_with(other.offset, other.length)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset: {}, length: {}", self.offset, self.length)
    }
}

impl From<Range<usize>> for Region {
    fn from(range: Range<usize>) -> Self {
        Self::from_range(range)
    }
}
