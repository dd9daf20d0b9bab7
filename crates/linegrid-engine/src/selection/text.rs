use std::hash::{Hash, Hasher};

use super::Region;
use crate::document::{LineQueries, SharedDocument, TextContent, WeakDocument};
use crate::error::Result;

/// First and last line touched by `region`.
///
/// A non-empty region ending right after a delimiter does not reach into the
/// following line.
pub fn line_span<D: LineQueries + ?Sized>(document: &D, region: Region) -> Result<(usize, usize)> {
    let start = document.line_of_offset(region.offset())?;
    let end = if region.is_empty() {
        start
    } else {
        document.line_of_offset(region.end() - 1)?
    };
    Ok((start, end))
}

/// A linear selection: one range of a document.
///
/// A selection without a range is *invalid*; it is what editors report when
/// there is no selection at all. A zero-length range is a caret and is not
/// empty in that sense.
#[derive(Debug, Clone, Default)]
pub struct TextSelection {
    document: Option<WeakDocument>,
    range: Option<Region>,
}

impl TextSelection {
    /// Selection of `length` characters at `offset` in `document`.
    pub fn new(document: &SharedDocument, offset: usize, length: usize) -> Self {
        Self::with_handle(Some(document.downgrade()), Some(Region::new(offset, length)))
    }

    /// Selection not bound to any document.
    pub fn detached(offset: usize, length: usize) -> Self {
        Self::with_handle(None, Some(Region::new(offset, length)))
    }

    /// The invalid selection.
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn with_handle(document: Option<WeakDocument>, range: Option<Region>) -> Self {
        Self { document, range }
    }

    pub fn document(&self) -> Option<&WeakDocument> {
        self.document.as_ref()
    }

    pub fn region(&self) -> Option<Region> {
        self.range
    }

    pub fn offset(&self) -> Option<usize> {
        self.range.map(Region::offset)
    }

    pub fn length(&self) -> Option<usize> {
        self.range.map(Region::length)
    }

    /// True for the invalid selection only.
    pub fn is_empty(&self) -> bool {
        self.range.is_none()
    }

    pub fn start_line(&self) -> Option<usize> {
        self.lines().map(|(start, _)| start)
    }

    pub fn end_line(&self) -> Option<usize> {
        self.lines().map(|(_, end)| end)
    }

    fn lines(&self) -> Option<(usize, usize)> {
        let range = self.range?;
        self.document
            .as_ref()?
            .with(|doc| line_span(doc, range).ok())
            .flatten()
    }

    /// Selected text, or `None` without a live document or a resolvable range.
    pub fn text(&self) -> Option<String> {
        let range = self.range?;
        self.document
            .as_ref()?
            .with(|doc| doc.get(range.offset(), range.length()).ok())
            .flatten()
    }
}

/// Same range, and when both are bound to a document, the same text.
/// A selection bound to a document never equals a detached one.
impl PartialEq for TextSelection {
    fn eq(&self, other: &Self) -> bool {
        if self.range != other.range {
            return false;
        }
        match (&self.document, &other.document) {
            (None, None) => true,
            (Some(_), Some(_)) => match (self.text(), other.text()) {
                (Some(mine), Some(theirs)) => mine == theirs,
                _ => false,
            },
            _ => false,
        }
    }
}

impl Hash for TextSelection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.range.hash(state);
    }
}
