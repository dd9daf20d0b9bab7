use crate::document::{DocumentEvent, TextContent, TextMutation};
use crate::error::{Result, TextError};
use crate::selection::Region;

/// A change to a document, described but not yet applied.
///
/// Offsets refer to the document *before* the edit; a [`MultiTextEdit`]
/// groups non-overlapping changes that are applied as one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Replace {
        offset: usize,
        length: usize,
        text: String,
    },
    Insert {
        offset: usize,
        text: String,
    },
    Delete {
        offset: usize,
        length: usize,
    },
    Multi(MultiTextEdit),
}

impl TextEdit {
    pub fn replace(offset: usize, length: usize, text: impl Into<String>) -> Self {
        TextEdit::Replace {
            offset,
            length,
            text: text.into(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        TextEdit::Insert {
            offset,
            text: text.into(),
        }
    }

    pub fn delete(offset: usize, length: usize) -> Self {
        TextEdit::Delete { offset, length }
    }

    /// Range of the old document touched by the edit.
    pub fn region(&self) -> Region {
        match self {
            TextEdit::Replace { offset, length, .. } | TextEdit::Delete { offset, length } => {
                Region::new(*offset, *length)
            }
            TextEdit::Insert { offset, .. } => Region::new(*offset, 0),
            TextEdit::Multi(multi) => multi.region(),
        }
    }

    pub fn offset(&self) -> usize {
        self.region().offset()
    }

    pub fn length(&self) -> usize {
        self.region().length()
    }

    pub fn exclusive_end(&self) -> usize {
        self.region().end()
    }

    pub fn has_children(&self) -> bool {
        matches!(self, TextEdit::Multi(multi) if !multi.children.is_empty())
    }

    pub fn children(&self) -> &[TextEdit] {
        match self {
            TextEdit::Multi(multi) => multi.children(),
            _ => &[],
        }
    }

    /// Inserted text of a leaf edit; empty for deletes and groups.
    pub fn text(&self) -> &str {
        match self {
            TextEdit::Replace { text, .. } | TextEdit::Insert { text, .. } => text,
            TextEdit::Delete { .. } | TextEdit::Multi(_) => "",
        }
    }

    /// Leaf edits in document order.
    pub fn leaves(&self) -> Vec<&TextEdit> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a TextEdit>) {
        match self {
            TextEdit::Multi(multi) => {
                for child in &multi.children {
                    child.collect_leaves(leaves);
                }
            }
            leaf => leaves.push(leaf),
        }
    }

    /// Apply the edit to `document`.
    ///
    /// Every leaf is checked against the current document first; if any is
    /// out of range nothing is modified. Leaves are then applied from last to
    /// first so earlier offsets stay valid. Returns the applied changes in
    /// application order.
    pub fn apply<D>(&self, document: &mut D) -> Result<Vec<DocumentEvent>>
    where
        D: TextContent + TextMutation + ?Sized,
    {
        let leaves = self.leaves();
        let document_length = document.length();
        for leaf in &leaves {
            let region = leaf.region();
            let resolved = region
                .offset()
                .checked_add(region.length())
                .is_some_and(|end| end <= document_length);
            if !resolved {
                return Err(TextError::BadRange {
                    offset: region.offset(),
                    length: region.length(),
                    document_length,
                });
            }
        }
        leaves
            .iter()
            .rev()
            .map(|leaf| {
                let region = leaf.region();
                document.replace(region.offset(), region.length(), leaf.text())
            })
            .collect()
    }
}

/// Overlapping ranges, or an insert strictly inside another edit's range.
fn conflicts(a: Region, b: Region) -> bool {
    let inside = |caret: Region, range: Region| {
        caret.is_empty() && range.offset() < caret.offset() && caret.offset() < range.end()
    };
    a.overlaps(b) || inside(a, b) || inside(b, a)
}

impl From<MultiTextEdit> for TextEdit {
    fn from(multi: MultiTextEdit) -> Self {
        TextEdit::Multi(multi)
    }
}

/// Group of non-overlapping edits, kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiTextEdit {
    children: Vec<TextEdit>,
}

impl MultiTextEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `child`, keeping children sorted by offset.
    ///
    /// Empty groups are dropped. Children sharing an offset keep the order
    /// they were added in, so consecutive inserts at one position come out in
    /// that order.
    pub fn add_child(&mut self, child: TextEdit) -> Result<()> {
        if let TextEdit::Multi(group) = &child {
            if group.children.is_empty() {
                return Ok(());
            }
        }
        let region = child.region();
        if let Some(existing) = self.children.iter().find(|c| conflicts(c.region(), region)) {
            return Err(TextError::MalformedEdit(format!(
                "edit at {region} overlaps existing edit at {}",
                existing.region()
            )));
        }
        // Inserts go before a change starting at the same offset.
        let key = |r: Region| (r.offset(), !r.is_empty());
        let at = self
            .children
            .partition_point(|c| key(c.region()) <= key(region));
        self.children.insert(at, child);
        Ok(())
    }

    pub fn children(&self) -> &[TextEdit] {
        &self.children
    }

    /// Smallest region covering every child; `(0, 0)` for an empty group.
    pub fn region(&self) -> Region {
        let Some(first) = self.children.first() else {
            return Region::default();
        };
        let end = self
            .children
            .iter()
            .map(TextEdit::exclusive_end)
            .max()
            .unwrap_or(first.exclusive_end());
        Region::from_range(first.offset()..end)
    }

    pub fn exclusive_end(&self) -> usize {
        self.region().end()
    }
}
