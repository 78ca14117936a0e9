//! Fetcher trait and implementations.
//!
//! A [`Fetcher`] performs a single JSON `GET`. Both reference sources share
//! one fetcher, which is where request pacing lives, so every outbound call
//! is paced the same way regardless of which source made it.

mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::http::HttpFetcher;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockFetcher;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// Unified interface for fetching JSON documents from a reference source.
///
/// # Examples
///
/// ```
/// use compendium_lookup::{error::Result, fetch::Fetcher};
/// use url::Url;
///
/// async fn count_results(fetcher: &dyn Fetcher, url: &Url) -> Result<usize> {
///     Ok(match fetcher.get_json(url).await? {
///         Some(body) => body["results"].as_array().map(Vec::len).unwrap_or(0),
///         None => 0,
///     })
/// }
/// ```
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Name of the fetcher (used for logging only).
    fn name(&self) -> &str;

    /// Fetch and decode a JSON document.
    ///
    /// Returns `Ok(None)` when the source answers "not found"; any other
    /// unsuccessful status, network failure, or non-JSON body is an error.
    async fn get_json(&self, url: &Url) -> Result<Option<Value>>;
}
