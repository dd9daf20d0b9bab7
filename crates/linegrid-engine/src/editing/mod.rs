/*!
 * # Editing
 *
 * Turns selections into edits and edits into document changes.
 *
 * - **`columns`**: tab expansion between character and visual columns
 * - **`edit`**: `TextEdit` / `MultiTextEdit`, changes described against the
 *   current document and applied atomically
 * - **`processor`**: `SelectionProcessor`, the edit and follow-up selection
 *   for replace, delete and backspace on text, multi and block selections
 *
 * ## Usage Pattern
 *
 * ```rust
 * use linegrid_engine::*;
 *
 * let shared = SharedDocument::new(Document::new("one\ntwo"));
 * let carets = MultiTextSelection::new(&shared, [Region::new(0, 0), Region::new(4, 0)]);
 * let processor = SelectionProcessor::new(4);
 *
 * let edit = processor
 *     .replace(&*shared.read(), &carets.into(), "> ")
 *     .unwrap();
 * edit.apply(&mut *shared.write()).unwrap();
 * assert_eq!(shared.read().text(), "> one\n> two");
 * ```
 */

pub mod columns;
pub mod edit;
pub mod processor;

pub use processor::SelectionProcessor;
