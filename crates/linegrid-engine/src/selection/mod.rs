//! Regions and the three selection shapes an editor works with.

pub mod block;
pub mod multi;
pub mod region;
pub mod text;

pub use block::{BlockTextSelection, FALLBACK_TAB_WIDTH};
pub use multi::MultiTextSelection;
pub use region::Region;
pub use text::{TextSelection, line_span};

use crate::document::WeakDocument;

/// Any selection the [`SelectionProcessor`](crate::SelectionProcessor) can operate on.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorSelection {
    Text(TextSelection),
    Multi(MultiTextSelection),
    Block(BlockTextSelection),
}

impl EditorSelection {
    /// The linear part of the selection.
    pub fn as_text_selection(&self) -> &TextSelection {
        match self {
            EditorSelection::Text(selection) => selection,
            EditorSelection::Multi(selection) => selection.as_text_selection(),
            EditorSelection::Block(selection) => selection.as_text_selection(),
        }
    }

    pub fn document(&self) -> Option<&WeakDocument> {
        self.as_text_selection().document()
    }

    pub fn region(&self) -> Option<Region> {
        self.as_text_selection().region()
    }

    pub fn text(&self) -> Option<String> {
        match self {
            EditorSelection::Text(selection) => selection.text(),
            EditorSelection::Multi(selection) => selection.text(),
            EditorSelection::Block(selection) => selection.text(),
        }
    }
}

impl From<TextSelection> for EditorSelection {
    fn from(selection: TextSelection) -> Self {
        EditorSelection::Text(selection)
    }
}

impl From<MultiTextSelection> for EditorSelection {
    fn from(selection: MultiTextSelection) -> Self {
        EditorSelection::Multi(selection)
    }
}

impl From<BlockTextSelection> for EditorSelection {
    fn from(selection: BlockTextSelection) -> Self {
        EditorSelection::Block(selection)
    }
}
