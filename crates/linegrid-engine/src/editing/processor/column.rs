use super::{Behavior, Context};
use crate::document::TextRead;
use crate::editing::columns;
use crate::editing::edit::{MultiTextEdit, TextEdit};
use crate::error::{Result, TextError};
use crate::selection::{BlockTextSelection, EditorSelection, Region};

impl BlockTextSelection {
    /// Visual columns of the left and right edge.
    fn visual_bounds<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<(usize, usize)> {
        Ok((
            cx.visual_column(self.start_line(), self.start_column())?,
            cx.visual_column(self.end_line(), self.end_column())?,
        ))
    }

    /// Block over the same document with other corners.
    fn with_corners<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
        start_column: usize,
        end_line: usize,
        end_column: usize,
    ) -> Result<BlockTextSelection> {
        BlockTextSelection::from_document(
            cx.document,
            self.document().cloned(),
            self.start_line(),
            start_column,
            end_line,
            end_column,
            cx.tab_width,
        )
    }

    /// Replace the rectangle line by line with the lines of `replacement`.
    ///
    /// Lines left over after the block continue on the following lines and
    /// past the end of the document become new lines indented to the block.
    fn replace_columns<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
        replacement: &str,
        delete: bool,
    ) -> Result<TextEdit> {
        let (visual_start, visual_end) = self.visual_bounds(cx)?;
        let mut pieces = cx.document.delimiter_matcher().split(replacement).into_iter();
        let mut root = MultiTextEdit::new();

        for line in self.start_line()..=self.end_line() {
            let piece = pieces.next().unwrap_or("");
            root.add_child(line_edit(cx, line, visual_start, visual_end, piece, delete)?)?;
        }

        let mut line = self.end_line();
        for piece in pieces {
            line += 1;
            let edit = if line < cx.document.number_of_lines() {
                line_edit(cx, line, visual_start, visual_end, piece, delete)?
            } else {
                let mut text = cx.document.default_line_delimiter().to_string();
                push_padding(&mut text, visual_start)?;
                text.push_str(piece);
                TextEdit::insert(cx.document.length(), text)
            };
            root.add_child(edit)?;
        }
        Ok(root.into())
    }
}

/// Edit replacing the visual columns `[visual_start, visual_end)` of `line`.
///
/// A tab straddling either edge is kept when text is inserted and removed
/// when deleting. A line ending left of the block is padded with spaces up to
/// the block before `replacement` is appended.
fn line_edit<D: TextRead + ?Sized>(
    cx: &Context<'_, D>,
    line: usize,
    visual_start: usize,
    visual_end: usize,
    replacement: &str,
    delete: bool,
) -> Result<TextEdit> {
    let (info, content) = cx.line_chars(line)?;
    let mut start_column = None;
    let mut end_column = None;
    let mut visual = 0;

    for (offset, &c) in content.iter().enumerate() {
        if start_column.is_none() {
            if visual == visual_start {
                start_column = if !delete && replacement.is_empty() && cx.is_wider(c, visual) {
                    offset.checked_sub(1)
                } else {
                    Some(offset)
                };
            } else if visual > visual_start && offset > 0 {
                start_column = if cx.is_wider(content[offset - 1], visual) {
                    Some(offset - 1)
                } else {
                    Some(offset)
                };
            }
        }
        if let Some(start) = start_column {
            if visual == visual_end {
                end_column = Some(offset);
                break;
            }
            if visual > visual_end {
                let keep_tab = !delete && offset > 0 && cx.is_wider(content[offset - 1], visual);
                let end = if keep_tab { offset - 1 } else { offset };
                end_column = Some(end.max(start));
                break;
            }
        }
        visual += cx.visual_width(c, visual);
    }

    let Some(start_column) = start_column else {
        if replacement.is_empty() {
            return Ok(MultiTextEdit::new().into());
        }
        let mut text = String::new();
        push_padding(&mut text, visual_start.saturating_sub(visual))?;
        text.push_str(replacement);
        return Ok(TextEdit::insert(info.end(), text));
    };
    let end_column = end_column.unwrap_or(content.len());
    let offset = info.offset() + start_column;
    let length = end_column.saturating_sub(start_column);
    Ok(if replacement.is_empty() {
        TextEdit::delete(offset, length)
    } else {
        TextEdit::replace(offset, length, replacement)
    })
}

/// Characters of `line` within the visual columns, plus spaces for the part
/// of the block lying past the line end.
fn append_column_range<D: TextRead + ?Sized>(
    cx: &Context<'_, D>,
    text: &mut String,
    line: usize,
    visual_start: usize,
    visual_end: usize,
) -> Result<()> {
    let (_, content) = cx.line_chars(line)?;
    let mut start_column = None;
    let mut end_column = None;
    let mut visual = 0;
    for (offset, &c) in content.iter().enumerate() {
        if start_column.is_none() && visual >= visual_start {
            start_column = Some(offset);
        }
        if visual >= visual_end {
            end_column = Some(offset);
            break;
        }
        visual += cx.visual_width(c, visual);
    }
    if let Some(start) = start_column {
        let end = end_column.unwrap_or(content.len()).max(start);
        text.extend(&content[start..end]);
    }
    if end_column.is_none() {
        push_padding(text, visual_end.saturating_sub(visual.max(visual_start)))?;
    }
    Ok(())
}

/// Append `count` spaces of virtual-space padding.
///
/// Fails instead of aborting when a column far past the line end asks for
/// more padding than can be allocated.
fn push_padding(text: &mut String, count: usize) -> Result<()> {
    text.try_reserve(count).map_err(|e| {
        TextError::IllegalArgument(format!("cannot pad {count} virtual columns: {e}"))
    })?;
    text.extend(std::iter::repeat_n(' ', count));
    Ok(())
}

impl Behavior for BlockTextSelection {
    fn replace<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
        replacement: &str,
    ) -> Result<TextEdit> {
        self.replace_columns(cx, replacement, false)
    }

    fn text<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<String> {
        let (visual_start, visual_end) = self.visual_bounds(cx)?;
        let mut text = String::new();
        for line in self.start_line()..=self.end_line() {
            append_column_range(cx, &mut text, line, visual_start, visual_end)?;
            if line != self.end_line() {
                let delimiter = cx
                    .document
                    .line_delimiter(line)?
                    .unwrap_or_else(|| cx.document.default_line_delimiter());
                text.push_str(delimiter);
            }
        }
        Ok(text)
    }

    fn is_empty<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<bool> {
        let (visual_start, visual_end) = self.visual_bounds(cx)?;
        Ok(visual_start == visual_end)
    }

    fn is_multiline<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<bool> {
        Ok(self.end_line() > self.start_line())
    }

    /// An empty block deletes the column to its right.
    fn delete<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<TextEdit> {
        if Behavior::is_empty(self, cx)? {
            let wider = self.with_corners(
                cx,
                self.start_column(),
                self.end_line(),
                self.end_column().saturating_add(1),
            )?;
            return wider.replace_columns(cx, "", true);
        }
        self.replace_columns(cx, "", true)
    }

    /// An empty block deletes the column to its left.
    fn backspace<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<TextEdit> {
        if Behavior::is_empty(self, cx)? && self.start_column() > 0 {
            let wider = self.with_corners(
                cx,
                self.start_column() - 1,
                self.end_line(),
                self.end_column(),
            )?;
            return wider.replace_columns(cx, "", false);
        }
        self.replace_columns(cx, "", false)
    }

    /// Collapse onto one edge; the other edge moves to the same visual column
    /// on its own line.
    fn make_empty<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
        beginning: bool,
    ) -> Result<EditorSelection> {
        let (start_column, end_column) = if beginning {
            let visual = cx.visual_column(self.start_line(), self.start_column())?;
            (
                self.start_column(),
                cx.character_column(self.end_line(), visual)?,
            )
        } else {
            let visual = cx.visual_column(self.end_line(), self.end_column())?;
            (
                cx.character_column(self.start_line(), visual)?,
                self.end_column(),
            )
        };
        Ok(self
            .with_corners(cx, start_column, self.end_line(), end_column)?
            .into())
    }

    fn ranges<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<Vec<Region>> {
        let (visual_start, visual_end) = self.visual_bounds(cx)?;
        (self.start_line()..=self.end_line())
            .map(|line| {
                let (info, content) = cx.line_chars(line)?;
                let start = columns::character_column(&content, visual_start, cx.tab_width)
                    .min(info.length());
                let end = columns::character_column(&content, visual_end, cx.tab_width)
                    .min(info.length());
                Ok(Region::new(
                    info.offset() + start,
                    end.saturating_sub(start),
                ))
            })
            .collect()
    }

    fn covered_lines<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<usize> {
        Ok(self.end_line() - self.start_line() + 1)
    }

    /// Caret after the first line of `replacement`, on every covered line.
    fn make_replace_selection<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
        replacement: &str,
    ) -> Result<EditorSelection> {
        let first_line = match cx.document.delimiter_matcher().find(replacement, 0) {
            Some(m) => &replacement[..m.start],
            None => replacement,
        };
        let column = self.start_column().saturating_add(first_line.chars().count());
        let visual = cx.visual_column(self.start_line(), column)?;
        let end_column = cx.character_column(self.end_line(), visual)?;
        Ok(self
            .with_corners(cx, column, self.end_line(), end_column)?
            .into())
    }

    fn make_backspace_selection<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
    ) -> Result<EditorSelection> {
        if !Behavior::is_empty(self, cx)? {
            return self.make_empty(cx, true);
        }
        let column = self.start_column().saturating_sub(1);
        Ok(self
            .with_corners(cx, column, self.end_line(), column)?
            .into())
    }
}
