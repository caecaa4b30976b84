//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Most variants describe contract violations that the catalog and the
/// story line reject up front, so the player never sees them.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A story line position outside `0..len` was requested.
    #[error("story line index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of collections in the story line.
        len: usize,
    },

    /// Catalog data breaks one of the story line invariants.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A validation error in domain logic or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure error (I/O, parsing, poisoned locks, runtime).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
