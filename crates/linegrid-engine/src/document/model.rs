use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use xi_rope::{Delta, Rope, RopeInfo};

use super::capabilities::{LineQueries, TextContent, TextMutation};
use super::delimiters::DelimiterMatcher;
use super::event::DocumentEvent;
use super::line_index::LineIndex;
use crate::error::{Result, TextError};
use crate::selection::Region;

/// Rope buffer plus the line table describing it.
///
/// The line table sits behind an `Arc` so snapshots share it until the
/// document is edited again.
#[derive(Clone)]
struct Contents {
    buffer: Rope,
    line_index: Arc<LineIndex>,
}

impl Contents {
    fn new(matcher: DelimiterMatcher, text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            line_index: Arc::new(LineIndex::new(matcher, text)),
        }
    }

    fn slice(&self, range: Range<usize>) -> String {
        self.buffer.slice_to_cow(range).into_owned()
    }

    fn byte_offset(&self, offset: usize) -> Result<usize> {
        self.line_index.byte_offset(offset, |range| self.slice(range))
    }

    fn get(&self, offset: usize, length: usize) -> Result<String> {
        let document_length = self.line_index.char_len();
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= document_length)
            .ok_or(TextError::BadRange {
                offset,
                length,
                document_length,
            })?;
        if length == 0 {
            return Ok(String::new());
        }
        let start = self.byte_offset(offset)?;
        let end = self.byte_offset(end)?;
        Ok(self.slice(start..end))
    }

    fn replace(&mut self, offset: usize, length: usize, text: &str) -> Result<()> {
        let buffer = &self.buffer;
        let bytes = Arc::make_mut(&mut self.line_index).update(offset, length, text, |range| {
            buffer.slice_to_cow(range).into_owned()
        })?;
        let delta: Delta<RopeInfo> = Delta::simple_edit(bytes, Rope::from(text), self.buffer.len());
        self.buffer = delta.apply(&self.buffer);
        Ok(())
    }
}

/// A mutable text document with an incrementally maintained line table.
///
/// All positions are character offsets. Content only changes through
/// [`Document::replace`], which either applies completely or fails with
/// nothing modified.
///
/// ```rust
/// use linegrid_engine::{Document, LineQueries, TextContent};
///
/// let mut doc = Document::new("abc\ndef\nghi");
/// assert_eq!(doc.number_of_lines(), 3);
/// assert_eq!(doc.line_of_offset(5).unwrap(), 1);
///
/// doc.replace(3, 1, "").unwrap();
/// assert_eq!(doc.text(), "abcdef\nghi");
/// assert_eq!(doc.number_of_lines(), 2);
/// ```
#[derive(Clone)]
pub struct Document {
    contents: Contents,
    /// Incremented by every successful replace.
    modification_stamp: u64,
}

impl Document {
    /// Document recognising the default line delimiters.
    pub fn new(text: &str) -> Self {
        Self {
            contents: Contents::new(DelimiterMatcher::default(), text),
            modification_stamp: 0,
        }
    }

    /// Document recognising only `delimiters`.
    pub fn with_delimiters<I, S>(text: &str, delimiters: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            contents: Contents::new(DelimiterMatcher::new(delimiters)?, text),
            modification_stamp: 0,
        })
    }

    /// Create a document from raw UTF-8 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| TextError::IllegalArgument(format!("content is not UTF-8: {e}")))?;
        Ok(Self::new(text))
    }

    /// Replace `length` characters at `offset` with `text`.
    pub fn replace(&mut self, offset: usize, length: usize, text: &str) -> Result<DocumentEvent> {
        self.contents.replace(offset, length, text)?;
        self.modification_stamp += 1;
        log::trace!(
            "replaced {length} chars at {offset} with {} chars, stamp {}",
            text.chars().count(),
            self.modification_stamp
        );
        Ok(DocumentEvent {
            offset,
            length,
            text: text.to_string(),
            modification_stamp: self.modification_stamp,
        })
    }

    /// Replace the whole content.
    pub fn set(&mut self, text: &str) -> Result<DocumentEvent> {
        self.replace(0, self.length(), text)
    }

    pub fn modification_stamp(&self) -> u64 {
        self.modification_stamp
    }

    /// Read-only view of the current state.
    ///
    /// The view shares storage with the document and is unaffected by later
    /// edits to it.
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            contents: self.contents.clone(),
            modification_stamp: self.modification_stamp,
        }
    }

    /// The line table, for diagnostics.
    pub fn line_index(&self) -> &LineIndex {
        &self.contents.line_index
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.contents.buffer.to_string().into_bytes()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("length", &self.length())
            .field("lines", &self.number_of_lines())
            .field("modification_stamp", &self.modification_stamp)
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}

/// Frozen, read-only state of a [`Document`].
#[derive(Clone)]
pub struct DocumentSnapshot {
    contents: Contents,
    modification_stamp: u64,
}

impl DocumentSnapshot {
    pub fn modification_stamp(&self) -> u64 {
        self.modification_stamp
    }
}

impl fmt::Debug for DocumentSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentSnapshot")
            .field("length", &self.length())
            .field("lines", &self.number_of_lines())
            .field("modification_stamp", &self.modification_stamp)
            .finish()
    }
}

macro_rules! impl_read_capabilities {
    ($ty:ty) => {
        impl TextContent for $ty {
            fn length(&self) -> usize {
                self.contents.line_index.char_len()
            }

            fn get(&self, offset: usize, length: usize) -> Result<String> {
                self.contents.get(offset, length)
            }

            fn text(&self) -> String {
                self.contents.buffer.to_string()
            }
        }

        impl LineQueries for $ty {
            fn number_of_lines(&self) -> usize {
                self.contents.line_index.line_count()
            }

            fn line_of_offset(&self, offset: usize) -> Result<usize> {
                self.contents.line_index.line_of_offset(offset)
            }

            fn line_information(&self, line: usize) -> Result<Region> {
                self.contents.line_index.line_information(line)
            }

            fn line_delimiter(&self, line: usize) -> Result<Option<&str>> {
                self.contents.line_index.line_delimiter(line)
            }

            fn delimiter_matcher(&self) -> &DelimiterMatcher {
                self.contents.line_index.matcher()
            }
        }
    };
}

impl_read_capabilities!(Document);
impl_read_capabilities!(DocumentSnapshot);

impl TextMutation for Document {
    fn replace(&mut self, offset: usize, length: usize, text: &str) -> Result<DocumentEvent> {
        Document::replace(self, offset, length, text)
    }
}

impl TextMutation for DocumentSnapshot {
    fn replace(&mut self, _offset: usize, _length: usize, _text: &str) -> Result<DocumentEvent> {
        Err(TextError::ReadOnly)
    }
}
