/*!
 * Error types for the subline library.
 *
 * Every fallible chain, traversal and formatting operation returns
 * `SubtitleError`, defined with the thiserror crate. None of these are fatal;
 * each one is local to the call that produced it.
 */

use thiserror::Error;

/// Errors that can occur while navigating, querying or formatting lines
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// Checked navigation reached a sentinel
    #[error("End of sequence reached")]
    EndOfSequence,

    /// An argument does not have the shape the operation needs
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// A section lies outside the text of a line
    #[error("Range error: {0}")]
    RangeError(String),

    /// An attempt to break the chain structure, e.g. linking past a tail
    #[error("Structural error: {0}")]
    StructuralError(String),
}

impl SubtitleError {
    /// Whether this error only signals the boundary of a chain
    pub fn is_end_of_sequence(&self) -> bool {
        matches!(self, Self::EndOfSequence)
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, SubtitleError>;
