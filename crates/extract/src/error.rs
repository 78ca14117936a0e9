//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required input document does not exist.
    #[display("missing required file: {}", _0.display())]
    MissingInput(#[error(not(source))] PathBuf),
    /// The input document exists but could not be read.
    #[display("could not read input file: {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// The input document is not JSON of the expected shape.
    #[display("malformed input file: {}", _0.display())]
    MalformedInput(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Input files are either there and well-formed, or they aren't.
        matches!(self, Self::Io(_))
    }
}
