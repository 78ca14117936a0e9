//! HTTP fetcher backed by `reqwest`.

use super::Fetcher;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Fetches JSON over HTTP(S), pausing for a fixed delay before every request.
///
/// # Examples
///
/// ```no_run
/// use compendium_lookup::fetch::HttpFetcher;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::new("http", Duration::from_secs(20), "compendium/0.1")?
///     .with_delay(Duration::from_millis(80));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpFetcher {
    name: String,
    client: reqwest::Client,
    delay: Duration,
}
impl HttpFetcher {
    /// Create a new HTTP fetcher with a per-request `timeout` and no pacing delay.
    ///
    /// # Errors
    ///
    /// Returns [`Client`](ErrorKind::Client) if the TLS backend can't be initialised.
    pub fn new(name: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self {
            name: name.into(),
            client,
            delay: Duration::ZERO,
        })
    }

    /// Pause for `delay` before every request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_json(&self, url: &Url) -> Result<Option<Value>> {
        if !self.delay.is_zero() {
            tracing::trace!(delay_ms = self.delay.as_millis() as u64, "Pacing before request");
            tokio::time::sleep(self.delay).await;
        }
        tracing::debug!(fetcher = self.name(), url = %url, "GET");
        let response =
            self.client.get(url.clone()).send().await.or_raise(|| ErrorKind::Network(url.to_string()))?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(url = %url, "Resource not found");
            return Ok(None);
        }
        if !status.is_success() {
            exn::bail!(ErrorKind::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.json::<Value>().await.or_raise(|| ErrorKind::Decode(url.to_string()))?;
        Ok(Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::ops::Deref;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new("test", Duration::from_secs(5), "compendium-test").unwrap()
    }

    fn url(server: &MockServer, suffix: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), suffix)).unwrap()
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/magic-items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .mount(&server)
            .await;
        let body = fetcher().get_json(&url(&server, "/magic-items")).await.unwrap();
        assert_eq!(body, Some(json!({"results": []})));
    }

    #[tokio::test]
    async fn test_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(404)).mount(&server).await;
        let body = fetcher().get_json(&url(&server, "/equipment/nope")).await.unwrap();
        assert_eq!(body, None);
    }

    #[tokio::test]
    async fn test_server_error_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(503)).mount(&server).await;
        let target = url(&server, "/equipment");
        let err = fetcher().get_json(&target).await.unwrap_err();
        assert_eq!(
            err.deref(),
            &ErrorKind::Status {
                status: 503,
                url: target.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        let target = url(&server, "/equipment");
        let err = fetcher().get_json(&target).await.unwrap_err();
        assert!(matches!(err.deref(), ErrorKind::Decode(_)));
    }

    #[tokio::test]
    async fn test_query_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weapons/"))
            .and(query_param("search", "Light Hammer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [{"name": "Light Hammer"}]})))
            .mount(&server)
            .await;
        let mut target = url(&server, "/weapons/");
        target.query_pairs_mut().append_pair("search", "Light Hammer");
        let body = fetcher().with_delay(Duration::from_millis(1)).get_json(&target).await.unwrap().unwrap();
        assert_eq!(body["results"][0]["name"], "Light Hammer");
    }

    #[tokio::test]
    async fn test_delay_precedes_every_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(2)
            .mount(&server)
            .await;
        let fetcher = fetcher().with_delay(Duration::from_millis(50));
        let started = std::time::Instant::now();
        fetcher.get_json(&url(&server, "/magic-items")).await.unwrap();
        fetcher.get_json(&url(&server, "/equipment")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(100), "took {:?}", started.elapsed());
    }
}
