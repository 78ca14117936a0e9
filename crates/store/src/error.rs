//! Store Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A store error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// A persisted document that can't be read or parsed is *not* an error: the
/// run starts from an empty document instead.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Writing the document failed; the previous file is untouched.
    #[display("could not write compendium: {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// An entry or the document could not be serialised.
    #[display("could not serialise compendium")]
    Serialize,
    /// A reference-source lookup failed; see the error tree for which.
    #[display("lookup failed for {_0:?}")]
    Lookup(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Lookup(_))
    }
}
