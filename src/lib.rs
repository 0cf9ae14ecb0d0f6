/*!
 * # subline - time-indexed subtitle lines
 *
 * A Rust library for holding subtitle cues in order and querying them by time.
 *
 * ## Features
 *
 * - Doubly-linked chain of lines bounded by head and tail sentinels
 * - Bounded traversal: every line before and/or after a time or another line
 * - First/last N lookups and positional deletion with negative offsets
 * - Scoped traversal from any single line through its virtual sentinels
 * - Character range formatting (bold, italic, underline, color, font)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle`: The collection root
 * - `line_set`: Traversal algorithms shared by every set of lines:
 *   - `line_set::item`: Arena, sentinels and link primitives
 * - `line`: Timing, text and formatting of a single line
 * - `formatting`: Formatting records and sections
 * - `time_span`: Time spans and the `Spanned` trait
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod formatting;
pub mod line;
pub mod line_set;
pub mod subtitle;
pub mod time_span;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main types for easier usage
pub use app_config::{Config, LogLevel};
pub use errors::SubtitleError;
pub use formatting::{FormatOptions, Formatting, Section, SectionSpec};
pub use line::Line;
pub use line_set::{Bound, Chain, LineSet, Lines, NodeId, NodeKind, Scope};
pub use subtitle::{CueRecord, Subtitle};
pub use time_span::{Extent, Spanned, TimeSpan, Timestamp};
