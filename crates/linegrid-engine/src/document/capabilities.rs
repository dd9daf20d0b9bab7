use super::delimiters::{DelimiterMatcher, PLATFORM_LINE_SEPARATOR};
use super::event::DocumentEvent;
use crate::error::Result;
use crate::selection::Region;

/// Read access to the characters of a document.
pub trait TextContent {
    /// Length in characters.
    fn length(&self) -> usize;

    /// The `length` characters starting at `offset`.
    fn get(&self, offset: usize, length: usize) -> Result<String>;

    /// The whole content.
    fn text(&self) -> String;
}

/// Line structure of a document.
pub trait LineQueries {
    fn number_of_lines(&self) -> usize;

    /// Line containing `offset`; the document length maps to the last line.
    fn line_of_offset(&self, offset: usize) -> Result<usize>;

    /// Offset and length (delimiter excluded) of `line`.
    fn line_information(&self, line: usize) -> Result<Region>;

    /// Delimiter terminating `line`, `None` for the last line.
    fn line_delimiter(&self, line: usize) -> Result<Option<&str>>;

    fn delimiter_matcher(&self) -> &DelimiterMatcher;

    fn line_information_of_offset(&self, offset: usize) -> Result<Region> {
        self.line_information(self.line_of_offset(offset)?)
    }

    fn legal_line_delimiters(&self) -> &[String] {
        self.delimiter_matcher().delimiters()
    }

    /// Delimiter to use when new lines are created: the one ending the first
    /// line, else the platform separator if legal, else the first legal one.
    fn default_line_delimiter(&self) -> &str {
        if let Ok(Some(delimiter)) = self.line_delimiter(0) {
            return delimiter;
        }
        let matcher = self.delimiter_matcher();
        if matcher.is_legal(PLATFORM_LINE_SEPARATOR) {
            return PLATFORM_LINE_SEPARATOR;
        }
        matcher
            .delimiters()
            .first()
            .map_or(PLATFORM_LINE_SEPARATOR, String::as_str)
    }

    /// Offset of `(line, column)` with every coordinate clamped into the document.
    ///
    /// - a line before the document resolves to 0
    /// - a line past the last one resolves to the document end
    /// - a column past the line end (virtual space) resolves to the line end
    fn resolve_offset(&self, line: isize, column: usize) -> usize
    where
        Self: TextContent,
    {
        let Ok(line) = usize::try_from(line) else {
            return 0;
        };
        match self.line_information(line) {
            Ok(info) => info.offset() + column.min(info.length()),
            Err(_) => self.length(),
        }
    }
}

/// The only way content changes.
pub trait TextMutation {
    /// Replace `length` characters at `offset` with `text`.
    ///
    /// Either applies completely or fails before anything is modified.
    fn replace(&mut self, offset: usize, length: usize, text: &str) -> Result<DocumentEvent>;
}

/// Everything the selection geometry needs to read.
pub trait TextRead: TextContent + LineQueries {}

impl<T: TextContent + LineQueries + ?Sized> TextRead for T {}
