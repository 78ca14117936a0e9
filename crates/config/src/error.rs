//! Configuration Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A config file was named explicitly but doesn't exist.
    #[display("config file not found: {}", _0.display())]
    MissingFile(#[error(not(source))] PathBuf),
    /// The layered providers couldn't be merged into a configuration (bad syntax, wrong types).
    #[display("could not load configuration")]
    Extract,
    /// The configuration loaded but a value is unusable.
    #[display("invalid configuration: {_0}")]
    Invalid(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
