use crate::error::{Result, TextError};

/// Delimiters recognised when no explicit set is given.
pub const DEFAULT_LINE_DELIMITERS: [&str; 3] = ["\n", "\r\n", "\r"];

/// Line separator of the platform we are running on.
pub const PLATFORM_LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// A delimiter occurrence found by [`DelimiterMatcher::find`].
///
/// `start` and `end` are byte positions into the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterMatch {
    /// Index of the matched delimiter in the matcher's delimiter list.
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

/// Finds line delimiters in text.
///
/// The scan is a single left-to-right pass. At each position candidates are
/// tried longest first, so `"\r\n"` wins over `"\r"` when both are legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterMatcher {
    delimiters: Vec<String>,
    /// Indices into `delimiters`, longest delimiter first.
    longest_first: Vec<usize>,
    char_lens: Vec<usize>,
}

impl DelimiterMatcher {
    pub fn new<I, S>(delimiters: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let delimiters: Vec<String> = delimiters.into_iter().map(Into::into).collect();
        if delimiters.is_empty() {
            return Err(TextError::IllegalArgument(
                "at least one line delimiter is required".to_string(),
            ));
        }
        if delimiters.iter().any(|d| d.is_empty()) {
            return Err(TextError::IllegalArgument(
                "line delimiters must not be empty".to_string(),
            ));
        }

        let mut longest_first: Vec<usize> = (0..delimiters.len()).collect();
        // Stable sort keeps declaration order among delimiters of equal length.
        longest_first.sort_by(|&a, &b| delimiters[b].len().cmp(&delimiters[a].len()));
        let char_lens = delimiters.iter().map(|d| d.chars().count()).collect();

        Ok(Self {
            delimiters,
            longest_first,
            char_lens,
        })
    }

    /// The delimiters in declaration order.
    pub fn delimiters(&self) -> &[String] {
        &self.delimiters
    }

    pub fn delimiter(&self, index: usize) -> &str {
        &self.delimiters[index]
    }

    /// Length of the delimiter at `index` in characters.
    pub fn char_len(&self, index: usize) -> usize {
        self.char_lens[index]
    }

    /// Length of the delimiter at `index` in bytes.
    pub fn byte_len(&self, index: usize) -> usize {
        self.delimiters[index].len()
    }

    pub fn is_legal(&self, delimiter: &str) -> bool {
        self.delimiters.iter().any(|d| d == delimiter)
    }

    /// True if another legal delimiter starts with the delimiter at `index`,
    /// i.e. text following it could turn it into a longer delimiter.
    pub fn is_proper_prefix(&self, index: usize) -> bool {
        let delimiter = &self.delimiters[index];
        self.delimiters
            .iter()
            .any(|other| other.len() > delimiter.len() && other.starts_with(delimiter.as_str()))
    }

    /// Leftmost delimiter at or after byte position `from`.
    pub fn find(&self, text: &str, from: usize) -> Option<DelimiterMatch> {
        let tail = text.get(from..)?;
        for (pos, _) in tail.char_indices() {
            let rest = &tail[pos..];
            for &index in &self.longest_first {
                let delimiter = &self.delimiters[index];
                if rest.starts_with(delimiter.as_str()) {
                    let start = from + pos;
                    return Some(DelimiterMatch {
                        index,
                        start,
                        end: start + delimiter.len(),
                    });
                }
            }
        }
        None
    }

    /// Splits `text` into pieces separated by legal delimiters.
    ///
    /// A trailing delimiter produces a trailing empty piece.
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut pieces = Vec::new();
        let mut from = 0;
        while let Some(m) = self.find(text, from) {
            pieces.push(&text[from..m.start]);
            from = m.end;
        }
        pieces.push(&text[from..]);
        pieces
    }
}

impl Default for DelimiterMatcher {
    fn default() -> Self {
        let delimiters = DEFAULT_LINE_DELIMITERS.iter().map(|d| d.to_string()).collect();
        let longest_first = vec![1, 0, 2];
        let char_lens = vec![1, 2, 1];
        Self {
            delimiters,
            longest_first,
            char_lens,
        }
    }
}
