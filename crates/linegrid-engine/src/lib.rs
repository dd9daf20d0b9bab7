pub mod document;
pub mod editing;
pub mod error;
pub mod selection;

// Re-export key types for easier usage
pub use document::*;
pub use editing::{SelectionProcessor, columns, edit::*};
pub use error::{Result, TextError};
pub use selection::*;
