use thiserror::Error;

/// Errors raised by document queries, edits and selection geometry.
///
/// The three `Bad*` variants are the shapes of a bad location: something that
/// does not exist in the current state of the document. Callers re-validate
/// against the current document and retry; nothing here is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("offset {offset} is outside the document (length {document_length})")]
    BadOffset {
        offset: usize,
        document_length: usize,
    },

    #[error("range {offset}..{offset}+{length} is outside the document (length {document_length})")]
    BadRange {
        offset: usize,
        length: usize,
        document_length: usize,
    },

    #[error("line {line} does not exist (document has {line_count} lines)")]
    BadLine { line: usize, line_count: usize },

    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    #[error("document is read-only")]
    ReadOnly,

    #[error("malformed edit: {0}")]
    MalformedEdit(String),
}

impl TextError {
    /// True for the location errors (offset, range or line outside the document).
    pub fn is_bad_location(&self) -> bool {
        matches!(
            self,
            TextError::BadOffset { .. } | TextError::BadRange { .. } | TextError::BadLine { .. }
        )
    }
}

pub type Result<T, E = TextError> = std::result::Result<T, E>;
