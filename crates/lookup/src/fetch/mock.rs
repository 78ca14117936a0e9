//! In-memory fetcher for testing.

use super::Fetcher;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use url::Url;

enum Canned {
    Json(Value),
    Status(u16),
}

/// In-memory fetcher for testing.
///
/// Responses are keyed by the full request URL (query string included).
/// Any URL without a canned response answers "not found". Every request is
/// recorded, in order, so tests can assert on the lookup sequence.
///
/// # Examples
///
/// ```
/// use compendium_lookup::fetch::{Fetcher, MockFetcher};
/// use serde_json::json;
/// use url::Url;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let fetcher = MockFetcher::default()
///     .with_json("https://srd.test/api/magic-items", json!({"results": []}));
/// let url = Url::parse("https://srd.test/api/magic-items").unwrap();
/// assert_eq!(fetcher.get_json(&url).await.unwrap(), Some(json!({"results": []})));
/// assert_eq!(fetcher.requests().await, vec![url.to_string()]);
/// # }
/// ```
pub struct MockFetcher {
    name: String,
    responses: HashMap<String, Canned>,
    requests: RwLock<Vec<String>>,
}

impl MockFetcher {
    /// Answer `url` with a JSON body.
    pub fn with_json(mut self, url: impl Into<String>, body: Value) -> Self {
        self.responses.insert(url.into(), Canned::Json(body));
        self
    }

    /// Answer `url` with a bare HTTP status.
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), Canned::Status(status));
        self
    }

    /// Every URL requested so far, in request order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}
impl Default for MockFetcher {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            responses: HashMap::new(),
            requests: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_json(&self, url: &Url) -> Result<Option<Value>> {
        self.requests.write().await.push(url.to_string());
        match self.responses.get(url.as_str()) {
            Some(Canned::Json(body)) => Ok(Some(body.clone())),
            Some(Canned::Status(404)) | None => Ok(None),
            Some(Canned::Status(status)) => exn::bail!(ErrorKind::Status {
                status: *status,
                url: url.to_string(),
            }),
        }
    }
}
