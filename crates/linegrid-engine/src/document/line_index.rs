//! Line table for a mutable character sequence.
//!
//! Offsets are counted in characters (Unicode scalar values). Each line also
//! remembers where it starts in the UTF-8 storage so the document can turn a
//! character offset into a byte position by scanning a single line.

use std::ops::Range;

use super::delimiters::DelimiterMatcher;
use crate::error::{Result, TextError};
use crate::selection::Region;

/// One line of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    offset: usize,
    length: usize,
    /// Index into the matcher's delimiter list; `None` only for the last line.
    delimiter: Option<usize>,
    byte_offset: usize,
    byte_length: usize,
}

impl Line {
    /// Character offset of the first character of the line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in characters, excluding the delimiter.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn delimiter_index(&self) -> Option<usize> {
        self.delimiter
    }
}

/// Byte ranges of the old text that a pending rescan needs.
#[derive(Debug, Clone, Copy)]
struct Rescan {
    first: usize,
    last: usize,
    char_start: usize,
    char_end: usize,
    byte_start: usize,
    byte_end: usize,
}

/// Maps line numbers to `(offset, length, delimiter)` triples.
///
/// Invariants, checked by [`LineIndex::check`]:
/// - there is always at least one line
/// - every line starts where the previous one (delimiter included) ends
/// - only the last line has no delimiter
/// - the spans add up to the document length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    lines: Vec<Line>,
    matcher: DelimiterMatcher,
    char_len: usize,
    byte_len: usize,
}

impl LineIndex {
    /// Build the index for `text` from scratch.
    pub fn new(matcher: DelimiterMatcher, text: &str) -> Self {
        let lines = scan(&matcher, text, 0, 0);
        Self {
            lines,
            matcher,
            char_len: text.chars().count(),
            byte_len: text.len(),
        }
    }

    pub fn matcher(&self) -> &DelimiterMatcher {
        &self.matcher
    }

    /// Always at least 1.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Document length in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, line: usize) -> Result<&Line> {
        self.lines.get(line).ok_or(TextError::BadLine {
            line,
            line_count: self.lines.len(),
        })
    }

    /// Offset and length (delimiter excluded) of `line`.
    pub fn line_information(&self, line: usize) -> Result<Region> {
        let line = self.line(line)?;
        Ok(Region::new(line.offset, line.length))
    }

    pub fn line_delimiter(&self, line: usize) -> Result<Option<&str>> {
        let line = self.line(line)?;
        Ok(line.delimiter.map(|index| self.matcher.delimiter(index)))
    }

    /// Line containing `offset`. The document length maps to the last line.
    pub fn line_of_offset(&self, offset: usize) -> Result<usize> {
        if offset > self.char_len {
            return Err(TextError::BadOffset {
                offset,
                document_length: self.char_len,
            });
        }
        // The first line starts at 0, so at least one line qualifies.
        let after = self.lines.partition_point(|line| line.offset <= offset);
        Ok(after - 1)
    }

    /// Span of `line` including its delimiter, in characters.
    fn char_span(&self, line: &Line) -> Range<usize> {
        let delimiter = line.delimiter.map_or(0, |index| self.matcher.char_len(index));
        line.offset..line.offset + line.length + delimiter
    }

    /// Span of `line` including its delimiter, in bytes.
    fn byte_span(&self, line: &Line) -> Range<usize> {
        let delimiter = line.delimiter.map_or(0, |index| self.matcher.byte_len(index));
        line.byte_offset..line.byte_offset + line.byte_length + delimiter
    }

    /// Byte position of character `offset`, reading the containing line
    /// through `source` (a byte range accessor for the indexed text).
    pub fn byte_offset<F>(&self, offset: usize, source: F) -> Result<usize>
    where
        F: Fn(Range<usize>) -> String,
    {
        let line = &self.lines[self.line_of_offset(offset)?];
        let within = offset - line.offset;
        if within == 0 {
            return Ok(line.byte_offset);
        }
        let span = self.byte_span(line);
        let text = source(span.clone());
        let local = text
            .char_indices()
            .nth(within)
            .map_or(text.len(), |(index, _)| index);
        Ok(span.start + local)
    }

    fn plan(&self, offset: usize, removed: usize) -> Result<Rescan> {
        let end = offset
            .checked_add(removed)
            .filter(|&end| end <= self.char_len)
            .ok_or(TextError::BadRange {
                offset,
                length: removed,
                document_length: self.char_len,
            })?;

        let mut first = self.line_of_offset(offset)?;
        let last = self.line_of_offset(end)?;

        // A "\r" ending the previous line may merge with text arriving at the
        // start of this one.
        if first > 0
            && self.lines[first - 1]
                .delimiter
                .is_some_and(|index| self.matcher.is_proper_prefix(index))
        {
            first -= 1;
        }

        let first_line = &self.lines[first];
        let last_line = &self.lines[last];
        Ok(Rescan {
            first,
            last,
            char_start: first_line.offset,
            char_end: self.char_span(last_line).end,
            byte_start: first_line.byte_offset,
            byte_end: self.byte_span(last_line).end,
        })
    }

    /// Bring the index up to date with replacing `removed` characters at
    /// `offset` by `inserted`.
    ///
    /// `source` reads byte ranges of the text *before* the edit. Only the lines
    /// touched by the edit are rescanned; later lines are shifted. Returns the
    /// byte range of the old text that the edit replaces.
    ///
    /// Fails without modifying the index if the range is outside the text.
    pub fn update<F>(
        &mut self,
        offset: usize,
        removed: usize,
        inserted: &str,
        source: F,
    ) -> Result<Range<usize>>
    where
        F: Fn(Range<usize>) -> String,
    {
        let plan = self.plan(offset, removed)?;
        let edit_start = self.byte_offset(offset, &source)?;
        let edit_end = self.byte_offset(offset + removed, &source)?;

        let mut text = source(plan.byte_start..edit_start);
        text.push_str(inserted);
        text.push_str(&source(edit_end..plan.byte_end));

        let mut rescanned = scan(&self.matcher, &text, plan.char_start, plan.byte_start);
        let at_end = plan.last + 1 == self.lines.len();
        let mut carry = None;
        if !at_end {
            // The region ends on a line boundary, so the trailing piece is
            // normally empty and belongs to the next, unaffected line.
            if let Some(trailing) = rescanned.pop() {
                if trailing.length > 0 {
                    carry = Some(trailing);
                }
            }
        }

        let new_char_end = plan.char_start + text.chars().count();
        let new_byte_end = plan.byte_start + text.len();
        let inserted_lines = rescanned.len();

        log::trace!(
            "line index splice: lines {}..={} replaced by {} lines",
            plan.first,
            plan.last,
            inserted_lines
        );

        self.lines.splice(plan.first..=plan.last, rescanned);
        for line in &mut self.lines[plan.first + inserted_lines..] {
            line.offset = line.offset - plan.char_end + new_char_end;
            line.byte_offset = line.byte_offset - plan.byte_end + new_byte_end;
        }
        if let Some(trailing) = carry {
            let next = &mut self.lines[plan.first + inserted_lines];
            next.offset = trailing.offset;
            next.length += trailing.length;
            next.byte_offset = trailing.byte_offset;
            next.byte_length += trailing.byte_length;
        }

        self.char_len = self.char_len - plan.char_end + new_char_end;
        self.byte_len = self.byte_len - plan.byte_end + new_byte_end;

        Ok(edit_start..edit_end)
    }

    /// Verify the structural invariants, describing the first violation.
    pub fn check(&self) -> std::result::Result<(), String> {
        let Some(last) = self.lines.last() else {
            return Err("line index is empty".to_string());
        };
        if last.delimiter.is_some() {
            return Err("last line has a delimiter".to_string());
        }
        let mut char_offset = 0;
        let mut byte_offset = 0;
        for (number, line) in self.lines.iter().enumerate() {
            if line.offset != char_offset || line.byte_offset != byte_offset {
                return Err(format!(
                    "line {number} starts at {} (byte {}), expected {char_offset} (byte {byte_offset})",
                    line.offset, line.byte_offset
                ));
            }
            if number + 1 < self.lines.len() && line.delimiter.is_none() {
                return Err(format!("line {number} has no delimiter"));
            }
            char_offset = self.char_span(line).end;
            byte_offset = self.byte_span(line).end;
        }
        if char_offset != self.char_len || byte_offset != self.byte_len {
            return Err(format!(
                "lines cover {char_offset} chars ({byte_offset} bytes), document has {} ({})",
                self.char_len, self.byte_len
            ));
        }
        Ok(())
    }
}

/// Split `text` into lines. The result always ends with the (possibly empty)
/// piece after the last delimiter.
fn scan(matcher: &DelimiterMatcher, text: &str, char_base: usize, byte_base: usize) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut from = 0;
    let mut char_offset = char_base;
    while let Some(found) = matcher.find(text, from) {
        let length = text[from..found.start].chars().count();
        lines.push(Line {
            offset: char_offset,
            length,
            delimiter: Some(found.index),
            byte_offset: byte_base + from,
            byte_length: found.start - from,
        });
        char_offset += length + matcher.char_len(found.index);
        from = found.end;
    }
    let rest = &text[from..];
    lines.push(Line {
        offset: char_offset,
        length: rest.chars().count(),
        delimiter: None,
        byte_offset: byte_base + from,
        byte_length: rest.len(),
    });
    lines
}
