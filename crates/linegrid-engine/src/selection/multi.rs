use super::{Region, TextSelection, line_span};
use crate::document::{LineQueries, SharedDocument, TextContent, WeakDocument};

/// Several ranges of one document, selected at once.
///
/// Regions are kept sorted by offset, then length. The linear part runs from
/// the start of the first region to the furthest region end; the text only
/// includes the regions themselves.
#[derive(Debug, Clone)]
pub struct MultiTextSelection {
    base: TextSelection,
    regions: Vec<Region>,
}

impl MultiTextSelection {
    pub fn new(document: &SharedDocument, regions: impl IntoIterator<Item = Region>) -> Self {
        Self::with_handle(Some(document.downgrade()), regions)
    }

    pub fn with_handle(
        document: Option<WeakDocument>,
        regions: impl IntoIterator<Item = Region>,
    ) -> Self {
        let mut regions: Vec<Region> = regions.into_iter().collect();
        regions.sort();
        let span = regions.first().map(|first| {
            let end = regions.iter().map(|r| r.end()).max().unwrap_or(first.end());
            Region::from_range(first.offset()..end)
        });
        Self {
            base: TextSelection::with_handle(document, span),
            regions,
        }
    }

    pub fn as_text_selection(&self) -> &TextSelection {
        &self.base
    }

    pub fn document(&self) -> Option<&WeakDocument> {
        self.base.document()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The span from the first region's start to the last region's end.
    pub fn region(&self) -> Option<Region> {
        self.base.region()
    }

    pub fn offset(&self) -> Option<usize> {
        self.base.offset()
    }

    pub fn length(&self) -> Option<usize> {
        self.base.length()
    }

    /// True if no region covers any character.
    pub fn is_empty(&self) -> bool {
        self.regions.iter().all(|r| r.is_empty())
    }

    pub fn start_line(&self) -> Option<usize> {
        let first = self.regions.first()?;
        self.document()?
            .with(|doc| doc.line_of_offset(first.offset()).ok())
            .flatten()
    }

    /// Line of the last selected character of the last region; a region
    /// ending right after a delimiter stays on the delimiter's line.
    pub fn end_line(&self) -> Option<usize> {
        let last = *self.regions.last()?;
        self.document()?
            .with(|doc| line_span(doc, last).ok().map(|(_, end)| end))
            .flatten()
    }

    /// Text of every region, concatenated in order.
    pub fn text(&self) -> Option<String> {
        self.document()?
            .with(|doc| {
                self.regions
                    .iter()
                    .map(|r| doc.get(r.offset(), r.length()))
                    .collect::<Result<String, _>>()
                    .ok()
            })
            .flatten()
    }
}

impl PartialEq for MultiTextSelection {
    fn eq(&self, other: &Self) -> bool {
        self.regions == other.regions && self.base == other.base
    }
}
