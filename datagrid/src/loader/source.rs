//! Row sources.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::LoadRequest;
use crate::error::LoadError;

/// Fetches the JSON body for a [`LoadRequest`].
///
/// The grid never performs I/O itself; hosts hand it a source. Tests use
/// [`StaticSource`], applications [`HttpSource`] or their own transport.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use datagrid::{DataSource, LoadRequest, LoadError};
///
/// struct Fixture;
///
/// #[async_trait]
/// impl DataSource for Fixture {
///     async fn fetch(&self, _request: &LoadRequest) -> Result<serde_json::Value, LoadError> {
///         Ok(serde_json::json!([{"id": 1}]))
///     }
/// }
/// ```
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Perform the request and return the parsed JSON body.
    async fn fetch(&self, request: &LoadRequest) -> Result<Value, LoadError>;
}

/// [`DataSource`] performing HTTP GET requests with reqwest.
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    http_client: Client,
    /// Base for relative grid URLs.
    base_url: Option<url::Url>,
    timeout: Option<Duration>,
}

impl HttpSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative URLs against `base`.
    pub fn base_url(mut self, base: &str) -> Result<Self, LoadError> {
        let base =
            url::Url::parse(base).map_err(|e| LoadError::InvalidUrl(format!("{base}: {e}")))?;
        self.base_url = Some(base);
        Ok(self)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use an existing reqwest client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, request: &LoadRequest) -> Result<Value, LoadError> {
        let url = request.to_url(self.base_url.as_ref())?;
        log::debug!("GET {url}");

        let mut builder = self
            .http_client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body
            };
            return Err(LoadError::http(status.as_u16(), message));
        }

        serde_json::from_str(&body).map_err(|e| LoadError::parse_with_body(e.to_string(), body))
    }
}

/// In-memory [`DataSource`] for tests and inline data.
///
/// Responses are looked up by URL path (query ignored), falling back to the
/// default response. Every request is recorded.
#[derive(Debug, Default)]
pub struct StaticSource {
    responses: HashMap<String, Result<Value, String>>,
    fallback: Option<Result<Value, String>>,
    requests: Mutex<Vec<LoadRequest>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request with `body`.
    pub fn always(body: Value) -> Self {
        Self {
            fallback: Some(Ok(body)),
            ..Default::default()
        }
    }

    /// Answer requests for `url` with `body`.
    pub fn route(mut self, url: impl Into<String>, body: Value) -> Self {
        self.responses.insert(url.into(), Ok(body));
        self
    }

    /// Fail requests for `url` with an HTTP 500 carrying `message`.
    pub fn fail(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses.insert(url.into(), Err(message.into()));
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<LoadRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn fetch(&self, request: &LoadRequest) -> Result<Value, LoadError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        let path = request.url.split('?').next().unwrap_or_default();
        match self.responses.get(path).or(self.fallback.as_ref()) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(LoadError::http(500, message.clone())),
            None => Err(LoadError::http(404, format!("no route for {path}"))),
        }
    }
}
