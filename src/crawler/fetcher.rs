//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - The [`Fetcher`] capability the frontier and pipeline are written against
//! - Building a `reqwest` client from the site configuration
//! - GET requests decoded with the configured encoding
//! - Error classification
//!
//! No retries are made. A failed fetch is fatal to the step or article that
//! asked for it.

use crate::config::SiteConfig;
use crate::{FetchError, FetchResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Connect timeout applied even when the overall timeout is disabled
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Decoded page body
    pub body: String,
}

/// Capability to GET a page
///
/// Implementations must honor their timeout and fail rather than hang.
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, failing on network errors, timeouts and non-2xx answers
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult<FetchedPage>> + Send;
}

/// [`Fetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    encoding: String,
}

impl HttpFetcher {
    /// Builds a fetcher from the site configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gazeta_scraper::config::load_config;
    /// use gazeta_scraper::crawler::HttpFetcher;
    /// use std::path::Path;
    ///
    /// let config = load_config(Path::new("scraper.toml")).unwrap();
    /// let fetcher = HttpFetcher::new(&config.site).unwrap();
    /// ```
    pub fn new(config: &SiteConfig) -> FetchResult<Self> {
        let client = build_http_client(config)?;
        Ok(Self {
            client,
            encoding: config.encoding.clone(),
        })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Non-success response");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response
            .text_with_charset(&self.encoding)
            .await
            .map_err(|e| classify_error(url, e))?;

        tracing::trace!(%url, bytes = body.len(), "Fetched page");

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }
}

/// Builds an HTTP client with the configured headers, timeout and TLS policy
///
/// A timeout of 0 disables the overall request timeout; the connect timeout
/// still applies.
pub fn build_http_client(config: &SiteConfig) -> FetchResult<Client> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| FetchError::Client(format!("invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| FetchError::Client(format!("invalid value for '{}': {}", name, e)))?;
        headers.insert(name, value);
    }

    let mut builder = Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .danger_accept_invalid_certs(!config.should_verify_certificate)
        .gzip(true)
        .brotli(true);

    if config.timeout > 0 {
        builder = builder.timeout(Duration::from_secs(config.timeout));
    }

    builder.build().map_err(|e| FetchError::Client(e.to_string()))
}

/// Maps a `reqwest` error onto the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
