use super::{Behavior, Context};
use crate::document::{TextRead, WeakDocument};
use crate::editing::edit::{MultiTextEdit, TextEdit};
use crate::error::Result;
use crate::selection::{EditorSelection, Region, TextSelection, line_span};

/// A single character range, taken from a text selection or a one-region
/// multi selection.
pub(super) struct RangeSelection<'s> {
    document: Option<&'s WeakDocument>,
    region: Region,
}

impl<'s> RangeSelection<'s> {
    pub(super) fn new(document: Option<&'s WeakDocument>, region: Region) -> Self {
        Self { document, region }
    }

    fn caret(&self, offset: usize) -> EditorSelection {
        TextSelection::with_handle(self.document.cloned(), Some(Region::new(offset, 0))).into()
    }
}

impl Behavior for RangeSelection<'_> {
    fn replace<D: TextRead + ?Sized>(
        &self,
        _: &Context<'_, D>,
        replacement: &str,
    ) -> Result<TextEdit> {
        Ok(TextEdit::replace(
            self.region.offset(),
            self.region.length(),
            replacement,
        ))
    }

    fn text<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<String> {
        cx.document.get(self.region.offset(), self.region.length())
    }

    fn is_empty<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<bool> {
        Ok(self.region.is_empty())
    }

    fn is_multiline<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<bool> {
        let start = cx.document.line_of_offset(self.region.offset())?;
        let end = cx.document.line_of_offset(self.region.end())?;
        Ok(start < end)
    }

    fn delete<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<TextEdit> {
        let length = if self.region.is_empty() {
            1
        } else {
            self.region.length()
        };
        Ok(TextEdit::delete(self.region.offset(), length))
    }

    fn backspace<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<TextEdit> {
        if !self.region.is_empty() {
            return Ok(TextEdit::delete(
                self.region.offset(),
                self.region.length(),
            ));
        }
        // Nothing precedes a caret at the document start.
        Ok(match self.region.offset().checked_sub(1) {
            Some(previous) => TextEdit::delete(previous, 1),
            None => MultiTextEdit::new().into(),
        })
    }

    fn make_empty<D: TextRead + ?Sized>(
        &self,
        _: &Context<'_, D>,
        beginning: bool,
    ) -> Result<EditorSelection> {
        Ok(if beginning {
            self.caret(self.region.offset())
        } else {
            self.caret(self.region.end())
        })
    }

    fn ranges<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<Vec<Region>> {
        Ok(vec![self.region])
    }

    fn covered_lines<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<usize> {
        let (start, end) = line_span(cx.document, self.region)?;
        Ok(end - start + 1)
    }

    fn make_replace_selection<D: TextRead + ?Sized>(
        &self,
        _: &Context<'_, D>,
        replacement: &str,
    ) -> Result<EditorSelection> {
        Ok(self.caret(
            self.region
                .offset()
                .saturating_add(replacement.chars().count()),
        ))
    }

    fn make_backspace_selection<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
    ) -> Result<EditorSelection> {
        if self.region.is_empty() {
            return Ok(self.caret(self.region.offset().saturating_sub(1)));
        }
        self.make_empty(cx, true)
    }
}
