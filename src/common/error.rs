//! Error types for btindex.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in btindex.
///
/// A missing key is not an error: `search` and `delete` report absence through
/// their return shape (`Option` / `bool`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The minimum degree cannot build a tree.
    #[error("invalid minimum degree {degree}: must be in {min}..={max}")]
    InvalidDegree { degree: usize, min: usize, max: usize },

    /// `insert` was called with a key that is already in the index.
    ///
    /// Use `upsert` to overwrite instead.
    #[error("key already present in index")]
    DuplicateKey,

    /// A structural invariant does not hold.
    ///
    /// Only produced by `validate()`. This indicates a bug in the tree code.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
