/*!
 * # Document Model
 *
 * A mutable character sequence with an incrementally maintained line table.
 *
 * ## Storage
 *
 * - Text lives in a single **`xi_rope::Rope`** buffer; every replace is a
 *   one-interval `Delta`
 * - Positions exposed to callers are **character offsets**. The line table
 *   records each line's byte position as well, so converting an offset to a
 *   byte position only scans one line
 *
 * ## Lines
 *
 * - A document always has at least one line; the last has no delimiter
 * - Delimiters are matched longest first (`"\r\n"` before `"\r"`) from a
 *   configurable legal set
 * - After an edit only the touched lines are rescanned. A trailing `"\r"` on
 *   the line before the edit is rescanned too, since inserted text starting
 *   with `"\n"` merges with it
 *
 * ## Access
 *
 * - [`TextContent`], [`LineQueries`] and [`TextMutation`] split read and write
 *   capabilities; the selection geometry only needs [`TextRead`]
 * - [`DocumentSnapshot`] is a frozen copy sharing storage with the document
 * - [`SharedDocument`] / [`WeakDocument`] let selections refer back to their
 *   document without owning it
 */

pub mod capabilities;
pub mod delimiters;
pub mod event;
pub mod line_index;
pub mod model;
pub mod shared;

pub use capabilities::{LineQueries, TextContent, TextMutation, TextRead};
pub use delimiters::{DEFAULT_LINE_DELIMITERS, DelimiterMatcher, PLATFORM_LINE_SEPARATOR};
pub use event::DocumentEvent;
pub use line_index::{Line, LineIndex};
pub use model::{Document, DocumentSnapshot};
pub use shared::{SharedDocument, WeakDocument};
