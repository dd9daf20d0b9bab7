//! Selection-aware editing operations.
//!
//! [`SelectionProcessor`] picks a behaviour from the selection's shape:
//!
//! | selection                    | behaviour |
//! |------------------------------|-----------|
//! | block                        | column    |
//! | multi with 2+ regions        | ranges    |
//! | text, or multi with 1 region | range     |
//! | invalid                      | null      |
//!
//! Each behaviour describes edits as [`TextEdit`]s against the current
//! document and computes the selection the user expects after the edit.

mod column;
mod range;
mod ranges;

use crate::document::{TextMutation, TextRead};
use crate::editing::columns;
use crate::editing::edit::{MultiTextEdit, TextEdit};
use crate::error::Result;
use crate::selection::{BlockTextSelection, EditorSelection, MultiTextSelection, Region};

use range::RangeSelection;

/// Document and tab width a behaviour works against.
pub(crate) struct Context<'a, D: ?Sized> {
    document: &'a D,
    tab_width: usize,
}

impl<'a, D: TextRead + ?Sized> Context<'a, D> {
    pub(crate) fn new(document: &'a D, tab_width: usize) -> Self {
        Self {
            document,
            tab_width,
        }
    }

    /// Line range (delimiter excluded) and its characters.
    fn line_chars(&self, line: usize) -> Result<(Region, Vec<char>)> {
        let info = self.document.line_information(line)?;
        let content = self.document.get(info.offset(), info.length())?;
        Ok((info, content.chars().collect()))
    }

    fn visual_column(&self, line: usize, column: usize) -> Result<usize> {
        let (_, content) = self.line_chars(line)?;
        Ok(columns::visual_column(&content, column, self.tab_width))
    }

    fn character_column(&self, line: usize, visual_column: usize) -> Result<usize> {
        let (_, content) = self.line_chars(line)?;
        Ok(columns::character_column(
            &content,
            visual_column,
            self.tab_width,
        ))
    }

    fn visual_width(&self, c: char, visual: usize) -> usize {
        columns::visual_width(c, visual, self.tab_width)
    }

    fn is_wider(&self, c: char, visual: usize) -> bool {
        columns::is_wider(c, visual, self.tab_width)
    }
}

/// Editing semantics of one selection shape.
///
/// The defaults describe a selection that covers nothing.
pub(crate) trait Behavior {
    fn replace<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
        replacement: &str,
    ) -> Result<TextEdit>;

    fn text<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<String>;

    /// True if no character is covered.
    fn is_empty<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<bool>;

    fn is_multiline<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<bool>;

    fn delete<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<TextEdit> {
        self.replace(cx, "")
    }

    fn backspace<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<TextEdit> {
        self.replace(cx, "")
    }

    /// The selection collapsed to its first (`beginning`) or last position.
    fn make_empty<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
        beginning: bool,
    ) -> Result<EditorSelection>;

    fn ranges<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<Vec<Region>>;

    fn covered_lines<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<usize>;

    fn make_replace_selection<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
        _replacement: &str,
    ) -> Result<EditorSelection> {
        self.make_empty(cx, false)
    }

    fn make_backspace_selection<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
    ) -> Result<EditorSelection> {
        self.make_empty(cx, true)
    }

    fn make_delete_selection<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
    ) -> Result<EditorSelection> {
        self.make_empty(cx, true)
    }
}

/// Behaviour of a selection with no range.
struct NullSelection<'s>(&'s EditorSelection);

impl Behavior for NullSelection<'_> {
    fn replace<D: TextRead + ?Sized>(&self, _: &Context<'_, D>, _: &str) -> Result<TextEdit> {
        Ok(MultiTextEdit::new().into())
    }

    fn text<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<String> {
        Ok(String::new())
    }

    fn is_empty<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<bool> {
        Ok(true)
    }

    fn is_multiline<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<bool> {
        Ok(false)
    }

    fn make_empty<D: TextRead + ?Sized>(
        &self,
        _: &Context<'_, D>,
        _: bool,
    ) -> Result<EditorSelection> {
        Ok(self.0.clone())
    }

    fn ranges<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<Vec<Region>> {
        Ok(Vec::new())
    }

    fn covered_lines<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<usize> {
        Ok(0)
    }
}

enum Kind<'s> {
    Null(NullSelection<'s>),
    Range(RangeSelection<'s>),
    Ranges(&'s MultiTextSelection),
    Column(&'s BlockTextSelection),
}

impl<'s> Kind<'s> {
    fn of(selection: &'s EditorSelection) -> Self {
        match selection {
            EditorSelection::Block(block) => Kind::Column(block),
            EditorSelection::Multi(multi) if multi.regions().len() > 1 => Kind::Ranges(multi),
            other => match other.region() {
                Some(region) => Kind::Range(RangeSelection::new(other.document(), region)),
                None => Kind::Null(NullSelection(other)),
            },
        }
    }
}

macro_rules! dispatch {
    ($selection:expr, $method:ident($($arg:expr),*)) => {
        match Kind::of($selection) {
            Kind::Null(s) => Behavior::$method(&s, $($arg),*),
            Kind::Range(s) => Behavior::$method(&s, $($arg),*),
            Kind::Ranges(s) => Behavior::$method(s, $($arg),*),
            Kind::Column(s) => Behavior::$method(s, $($arg),*),
        }
    };
}

/// Computes edits and follow-up selections for any [`EditorSelection`].
///
/// ```rust
/// use linegrid_engine::{
///     BlockTextSelection, Document, EditorSelection, SelectionProcessor, SharedDocument,
///     TextContent,
/// };
///
/// let shared = SharedDocument::new(Document::new("abcd\nabcd\nabcd"));
/// let block = BlockTextSelection::new(&shared, 0, 1, 2, 3, 4).unwrap();
/// let processor = SelectionProcessor::new(4);
///
/// let mut doc = shared.write();
/// let after = processor
///     .do_replace(&mut *doc, &EditorSelection::Block(block), "X\nY\nZ")
///     .unwrap();
/// assert_eq!(doc.text(), "aXd\naYd\naZd");
/// assert!(matches!(after, EditorSelection::Block(_)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionProcessor {
    tab_width: usize,
}

impl SelectionProcessor {
    pub fn new(tab_width: usize) -> Self {
        Self { tab_width }
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    fn context<'a, D: TextRead + ?Sized>(&self, document: &'a D) -> Context<'a, D> {
        Context::new(document, self.tab_width)
    }

    /// Edit replacing the selected text with `replacement`.
    pub fn replace<D: TextRead + ?Sized>(
        &self,
        document: &D,
        selection: &EditorSelection,
        replacement: &str,
    ) -> Result<TextEdit> {
        let cx = self.context(document);
        dispatch!(selection, replace(&cx, replacement))
    }

    /// Edit for the delete key: removes the selection, or the character after a caret.
    pub fn delete<D: TextRead + ?Sized>(
        &self,
        document: &D,
        selection: &EditorSelection,
    ) -> Result<TextEdit> {
        let cx = self.context(document);
        dispatch!(selection, delete(&cx))
    }

    /// Edit for backspace: removes the selection, or the character before a caret.
    pub fn backspace<D: TextRead + ?Sized>(
        &self,
        document: &D,
        selection: &EditorSelection,
    ) -> Result<TextEdit> {
        let cx = self.context(document);
        dispatch!(selection, backspace(&cx))
    }

    pub fn text<D: TextRead + ?Sized>(
        &self,
        document: &D,
        selection: &EditorSelection,
    ) -> Result<String> {
        let cx = self.context(document);
        dispatch!(selection, text(&cx))
    }

    /// True if the selection covers no characters.
    ///
    /// Unlike [`TextSelection::is_empty`](crate::TextSelection::is_empty), a
    /// caret counts as empty here.
    pub fn is_empty<D: TextRead + ?Sized>(
        &self,
        document: &D,
        selection: &EditorSelection,
    ) -> Result<bool> {
        let cx = self.context(document);
        dispatch!(selection, is_empty(&cx))
    }

    pub fn is_multiline<D: TextRead + ?Sized>(
        &self,
        document: &D,
        selection: &EditorSelection,
    ) -> Result<bool> {
        let cx = self.context(document);
        dispatch!(selection, is_multiline(&cx))
    }

    pub fn make_empty<D: TextRead + ?Sized>(
        &self,
        document: &D,
        selection: &EditorSelection,
        beginning: bool,
    ) -> Result<EditorSelection> {
        let cx = self.context(document);
        dispatch!(selection, make_empty(&cx, beginning))
    }

    /// Character ranges covered by the selection.
    pub fn ranges<D: TextRead + ?Sized>(
        &self,
        document: &D,
        selection: &EditorSelection,
    ) -> Result<Vec<Region>> {
        let cx = self.context(document);
        dispatch!(selection, ranges(&cx))
    }

    /// Number of lines touched by the selection.
    pub fn covered_lines<D: TextRead + ?Sized>(
        &self,
        document: &D,
        selection: &EditorSelection,
    ) -> Result<usize> {
        let cx = self.context(document);
        dispatch!(selection, covered_lines(&cx))
    }

    pub fn make_replace_selection<D: TextRead + ?Sized>(
        &self,
        document: &D,
        selection: &EditorSelection,
        replacement: &str,
    ) -> Result<EditorSelection> {
        let cx = self.context(document);
        dispatch!(selection, make_replace_selection(&cx, replacement))
    }

    pub fn make_backspace_selection<D: TextRead + ?Sized>(
        &self,
        document: &D,
        selection: &EditorSelection,
    ) -> Result<EditorSelection> {
        let cx = self.context(document);
        dispatch!(selection, make_backspace_selection(&cx))
    }

    pub fn make_delete_selection<D: TextRead + ?Sized>(
        &self,
        document: &D,
        selection: &EditorSelection,
    ) -> Result<EditorSelection> {
        let cx = self.context(document);
        dispatch!(selection, make_delete_selection(&cx))
    }

    /// Replace the selection and return the selection to show afterwards.
    pub fn do_replace<D>(
        &self,
        document: &mut D,
        selection: &EditorSelection,
        replacement: &str,
    ) -> Result<EditorSelection>
    where
        D: TextRead + TextMutation + ?Sized,
    {
        let edit = self.replace(&*document, selection, replacement)?;
        edit.apply(document)?;
        self.make_replace_selection(&*document, selection, replacement)
    }

    pub fn do_delete<D>(
        &self,
        document: &mut D,
        selection: &EditorSelection,
    ) -> Result<EditorSelection>
    where
        D: TextRead + TextMutation + ?Sized,
    {
        let edit = self.delete(&*document, selection)?;
        edit.apply(document)?;
        self.make_delete_selection(&*document, selection)
    }

    /// The follow-up selection is computed against the document before the edit.
    pub fn do_backspace<D>(
        &self,
        document: &mut D,
        selection: &EditorSelection,
    ) -> Result<EditorSelection>
    where
        D: TextRead + TextMutation + ?Sized,
    {
        let edit = self.backspace(&*document, selection)?;
        let after = self.make_backspace_selection(&*document, selection)?;
        edit.apply(document)?;
        Ok(after)
    }
}

#[cfg(test)]
mod tests;
