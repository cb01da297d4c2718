//! HTTP fetcher implementation
//!
//! This module handles every page request the crawler makes:
//! - Building an HTTP client with the configured user agent and timeout
//! - GET requests for page markup
//! - Classifying failures into [`TransportError`]
//!
//! The crawler talks to the network only through the [`Fetcher`] trait, so
//! tests can substitute an in-memory site.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A failed page request
///
/// Every variant is recoverable: the crawler marks the URL visited and moves on.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The request did not complete within the configured timeout
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    /// Connection, DNS, TLS or body-read failure
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },
}

impl TransportError {
    /// The URL the failed request was for
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Timeout { url } | Self::Network { url, .. } => url,
        }
    }
}

/// Capability to fetch the raw markup of a page
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the response body
    async fn fetch(&self, url: &Url) -> Result<String, TransportError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, url: &Url) -> Result<String, TransportError> {
        (**self).fetch(url).await
    }
}

/// Builds an HTTP client with the crawl's user agent and timeout
///
/// # Example
///
/// ```no_run
/// use sitegist::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client("Mozilla/5.0", Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Fetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with its own client
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, timeout)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, TransportError> {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL and returns its body, classifying any failure
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Ok(body)` |
/// | any other status | `TransportError::Status` |
/// | timeout | `TransportError::Timeout` |
/// | connect / DNS / TLS / body read | `TransportError::Network` |
///
/// Redirects are followed by the client; there are no retries.
pub async fn fetch_url(client: &Client, url: &Url) -> Result<String, TransportError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(status_error(url, status));
    }

    response.text().await.map_err(|e| classify_error(url, e))
}

fn status_error(url: &Url, status: StatusCode) -> TransportError {
    TransportError::Status {
        url: url.to_string(),
        status: status.as_u16(),
    }
}

fn classify_error(url: &Url, error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        TransportError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        TransportError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client("Mozilla/5.0 (X11; Linux x86_64)", Duration::from_secs(10));
        assert!(client.is_ok());
    }

    #[test]
    fn test_transport_error_url() {
        let err = TransportError::Status {
            url: "https://example.com/missing".to_string(),
            status: 404,
        };
        assert_eq!(err.url(), "https://example.com/missing");
        assert_eq!(err.to_string(), "HTTP 404 for https://example.com/missing");

        let err = TransportError::Timeout {
            url: "https://example.com/slow".to_string(),
        };
        assert_eq!(err.url(), "https://example.com/slow");
    }

    // HTTP behaviour is covered with wiremock in tests/fetcher_tests.rs
}
