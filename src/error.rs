//! Top-level error kinds, one per stage of a run.

use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("configuration error")]
    Config,
    /// Reading the facilities or tools documents failed. Nothing was fetched.
    #[display("could not read craftable inputs")]
    Input,
    /// The HTTP client couldn't be set up.
    #[display("could not prepare reference-source lookups")]
    Lookup,
    /// Merging or writing the compendium failed. The previous file is untouched.
    #[display("could not build compendium")]
    Store,
}

impl ErrorKind {
    /// Returns `true` if re-running might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store)
    }
}
