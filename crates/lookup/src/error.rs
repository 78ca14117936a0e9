//! Lookup Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A lookup error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// A reference source answering "not found" is *not* an error; fetchers
/// report that as `Ok(None)` and the lookup chain moves on.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never got a response (DNS, connection, timeout).
    #[display("network error requesting {_0}")]
    Network(#[error(not(source))] String),
    /// The source answered with a status other than success or not-found.
    #[display("unexpected HTTP status {status} from {url}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
    },
    /// The response body wasn't JSON of the expected shape.
    #[display("unexpected response body from {_0}")]
    Decode(#[error(not(source))] String),
    /// A URL could not be built from the configured base.
    #[display("invalid URL: {_0}")]
    InvalidUrl(#[error(not(source))] String),
    /// The HTTP client could not be constructed.
    #[display("could not build HTTP client")]
    Client,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// Nothing in this crate retries; a failed run is simply run again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
