/// Description of an applied replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEvent {
    /// Character offset where the change starts.
    pub offset: usize,
    /// Number of characters removed.
    pub length: usize,
    /// Text inserted in their place.
    pub text: String,
    /// Modification stamp of the document after the change.
    pub modification_stamp: u64,
}

impl DocumentEvent {
    /// Net change of the document length in characters.
    pub fn length_delta(&self) -> isize {
        self.text.chars().count() as isize - self.length as isize
    }
}
