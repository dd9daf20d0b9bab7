use super::{Behavior, Context};
use crate::document::{PLATFORM_LINE_SEPARATOR, TextRead};
use crate::editing::edit::{MultiTextEdit, TextEdit};
use crate::error::Result;
use crate::selection::{EditorSelection, MultiTextSelection, Region};

impl MultiTextSelection {
    /// One edit per region, skipping regions `edit` returns `None` for.
    fn region_edits(&self, edit: impl Fn(Region) -> Option<TextEdit>) -> Result<TextEdit> {
        let mut root = MultiTextEdit::new();
        for child in self.regions().iter().copied().filter_map(edit) {
            root.add_child(child)?;
        }
        Ok(root.into())
    }

    fn carets(&self, offsets: impl IntoIterator<Item = usize>) -> EditorSelection {
        let regions = offsets.into_iter().map(|offset| Region::new(offset, 0));
        MultiTextSelection::with_handle(self.document().cloned(), regions).into()
    }
}

/// A paste with a line break spreads over the regions, one line each.
fn is_paste(replacement: &str) -> bool {
    !replacement.trim().is_empty() && replacement.contains(PLATFORM_LINE_SEPARATOR)
}

impl Behavior for MultiTextSelection {
    fn replace<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
        replacement: &str,
    ) -> Result<TextEdit> {
        if !is_paste(replacement) {
            return self.region_edits(|r| {
                Some(TextEdit::replace(r.offset(), r.length(), replacement))
            });
        }
        let mut pieces = cx.document.delimiter_matcher().split(replacement).into_iter();
        let mut root = MultiTextEdit::new();
        for region in self.regions() {
            let piece = pieces.next().unwrap_or("");
            root.add_child(TextEdit::replace(region.offset(), region.length(), piece))?;
        }
        Ok(root.into())
    }

    fn text<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<String> {
        self.regions()
            .iter()
            .map(|r| cx.document.get(r.offset(), r.length()))
            .collect()
    }

    fn is_empty<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<bool> {
        Ok(MultiTextSelection::is_empty(self))
    }

    /// True unless every region starts and ends on the first region's line.
    fn is_multiline<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<bool> {
        let mut line = None;
        for region in self.regions() {
            let start = cx.document.line_of_offset(region.offset())?;
            let end = cx.document.line_of_offset(region.end())?;
            let first = *line.get_or_insert(start);
            if start != first || end != first {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn delete<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<TextEdit> {
        if MultiTextSelection::is_empty(self) {
            return self.region_edits(|r| Some(TextEdit::delete(r.offset(), 1)));
        }
        self.region_edits(|r| Some(TextEdit::delete(r.offset(), r.length())))
    }

    fn backspace<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<TextEdit> {
        let previous_char = |r: Region| {
            r.offset()
                .checked_sub(1)
                .map(|previous| TextEdit::delete(previous, 1))
        };
        if MultiTextSelection::is_empty(self) {
            return self.region_edits(previous_char);
        }
        self.region_edits(|r| {
            if r.is_empty() {
                previous_char(r)
            } else {
                Some(TextEdit::delete(r.offset(), r.length()))
            }
        })
    }

    /// Every region collapses, shifted left by the text removed before it.
    fn make_empty<D: TextRead + ?Sized>(
        &self,
        _: &Context<'_, D>,
        beginning: bool,
    ) -> Result<EditorSelection> {
        let mut deleted = 0;
        let offsets: Vec<usize> = self
            .regions()
            .iter()
            .map(|r| {
                let start = r.offset().saturating_sub(deleted);
                deleted = deleted.saturating_add(r.length());
                if beginning {
                    start
                } else {
                    start.saturating_add(r.length())
                }
            })
            .collect();
        Ok(self.carets(offsets))
    }

    fn ranges<D: TextRead + ?Sized>(&self, _: &Context<'_, D>) -> Result<Vec<Region>> {
        Ok(self.regions().to_vec())
    }

    /// Lines touched by any region; a line shared by neighbouring regions
    /// counts once.
    fn covered_lines<D: TextRead + ?Sized>(&self, cx: &Context<'_, D>) -> Result<usize> {
        let mut covered = 0;
        let mut last_line = None;
        for region in self.regions() {
            let start = cx.document.line_of_offset(region.offset())?;
            let end = cx.document.line_of_offset(region.end())?;
            covered += end - start + 1;
            if last_line == Some(start) {
                covered -= 1;
            }
            last_line = Some(end);
        }
        Ok(covered)
    }

    fn make_replace_selection<D: TextRead + ?Sized>(
        &self,
        cx: &Context<'_, D>,
        replacement: &str,
    ) -> Result<EditorSelection> {
        let mut inserted: usize = 0;
        let mut removed: usize = 0;
        if !replacement.contains(PLATFORM_LINE_SEPARATOR) {
            let length = replacement.chars().count();
            let offsets: Vec<usize> = self
                .regions()
                .iter()
                .map(|r| {
                    inserted = inserted.saturating_add(length);
                    let offset = r.offset().saturating_add(inserted).saturating_sub(removed);
                    removed = removed.saturating_add(r.length());
                    offset
                })
                .collect();
            return Ok(self.carets(offsets));
        }

        // Each caret lands after the piece pasted into its region.
        let edit = Behavior::replace(self, cx, replacement)?;
        let offsets: Vec<usize> = edit
            .children()
            .iter()
            .map(|child| {
                inserted = inserted.saturating_add(child.text().chars().count());
                removed = removed.saturating_add(child.length());
                child.offset().saturating_add(inserted).saturating_sub(removed)
            })
            .collect();
        Ok(self.carets(offsets))
    }

    fn make_backspace_selection<D: TextRead + ?Sized>(
        &self,
        _: &Context<'_, D>,
    ) -> Result<EditorSelection> {
        let mut removed: usize = 0;
        let offsets: Vec<usize> = self
            .regions()
            .iter()
            .map(|r| {
                let length = if !r.is_empty() {
                    r.length()
                } else if r.offset() > 0 {
                    1
                } else {
                    0
                };
                let before_caret = if r.is_empty() { length } else { 0 };
                let offset = r.offset().saturating_sub(removed.saturating_add(before_caret));
                removed = removed.saturating_add(length);
                offset
            })
            .collect();
        Ok(self.carets(offsets))
    }

    fn make_delete_selection<D: TextRead + ?Sized>(
        &self,
        _: &Context<'_, D>,
    ) -> Result<EditorSelection> {
        let mut removed = 0;
        let offsets: Vec<usize> = self
            .regions()
            .iter()
            .map(|r| {
                let offset = r.offset().saturating_sub(removed);
                removed = removed.saturating_add(r.length().max(1));
                offset
            })
            .collect();
        Ok(self.carets(offsets))
    }
}
