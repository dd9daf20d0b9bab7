use std::hash::{Hash, Hasher};

use super::{Region, TextSelection};
use crate::document::{SharedDocument, TextRead, WeakDocument};
use crate::editing::processor::{Behavior, Context};
use crate::error::{Result, TextError};

/// Tab width used when a block selection is created with a width of 0.
pub const FALLBACK_TAB_WIDTH: usize = 8;

/// A rectangular (column) selection.
///
/// Spans the lines `start_line..=end_line` between two *character* columns of
/// its first and last line. The rectangle itself is defined by the visual
/// columns those positions fall on, so lines indented with tabs are cut at the
/// same screen position. Columns may lie past a line's end (virtual space).
///
/// The linear part is the character range between the two corner positions,
/// each clamped into the document.
#[derive(Debug, Clone)]
pub struct BlockTextSelection {
    base: TextSelection,
    start_line: usize,
    start_column: usize,
    end_line: usize,
    end_column: usize,
    tab_width: usize,
}

impl BlockTextSelection {
    pub fn new(
        document: &SharedDocument,
        start_line: usize,
        start_column: usize,
        end_line: usize,
        end_column: usize,
        tab_width: usize,
    ) -> Result<Self> {
        let handle = document.downgrade();
        let guard = document.read();
        Self::from_document(
            &*guard,
            Some(handle),
            start_line,
            start_column,
            end_line,
            end_column,
            tab_width,
        )
    }

    /// Block over `document`, optionally bound to `handle` for later queries.
    pub fn from_document<D: TextRead + ?Sized>(
        document: &D,
        handle: Option<WeakDocument>,
        start_line: usize,
        start_column: usize,
        end_line: usize,
        end_column: usize,
        tab_width: usize,
    ) -> Result<Self> {
        if end_line < start_line {
            return Err(TextError::IllegalArgument(format!(
                "block selection ends on line {end_line}, before its start line {start_line}"
            )));
        }
        let start = document.resolve_offset(signed(start_line), start_column);
        let end = document.resolve_offset(signed(end_line), end_column);
        let range = Region::new(start.min(end), start.abs_diff(end));
        let tab_width = if tab_width == 0 {
            FALLBACK_TAB_WIDTH
        } else {
            tab_width
        };
        Ok(Self {
            base: TextSelection::with_handle(handle, Some(range)),
            start_line,
            start_column,
            end_line,
            end_column,
            tab_width,
        })
    }

    pub fn as_text_selection(&self) -> &TextSelection {
        &self.base
    }

    pub fn document(&self) -> Option<&WeakDocument> {
        self.base.document()
    }

    /// The linear range between the two corners.
    pub fn region(&self) -> Option<Region> {
        self.base.region()
    }

    pub fn start_line(&self) -> usize {
        self.start_line
    }

    pub fn start_column(&self) -> usize {
        self.start_column
    }

    pub fn end_line(&self) -> usize {
        self.end_line
    }

    pub fn end_column(&self) -> usize {
        self.end_column
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Per-line ranges covered by the rectangle.
    ///
    /// Falls back to the linear range when the lines cannot be read.
    pub fn regions(&self) -> Option<Vec<Region>> {
        let linear = self.region()?;
        self.document()?.with(|doc| {
            Behavior::ranges(self, &Context::new(doc, self.tab_width)).unwrap_or_else(|e| {
                log::debug!("block ranges unavailable ({e}), using linear range");
                vec![linear]
            })
        })
    }

    /// Text of the rectangle, one line per covered line, padded with spaces
    /// where the rectangle reaches into virtual space.
    ///
    /// Falls back to the linear text when the lines cannot be read.
    pub fn text(&self) -> Option<String> {
        let text = self.document()?.with(|doc| {
            Behavior::text(self, &Context::new(doc, self.tab_width))
                .map_err(|e| log::debug!("block text unavailable ({e}), using linear text"))
                .ok()
        })?;
        text.or_else(|| self.base.text())
    }
}

fn signed(line: usize) -> isize {
    isize::try_from(line).unwrap_or(isize::MAX)
}

/// Same linear selection and the same corners. The tab width is not compared.
impl PartialEq for BlockTextSelection {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
            && self.start_line == other.start_line
            && self.start_column == other.start_column
            && self.end_line == other.end_line
            && self.end_column == other.end_column
    }
}

/// Hashes what equality compares, so blocks differing only in tab width
/// collide.
impl Hash for BlockTextSelection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
        self.start_line.hash(state);
        self.start_column.hash(state);
        self.end_line.hash(state);
        self.end_column.hash(state);
    }
}
