//! HTTP fetch client
//!
//! This module handles every HTTP request Seedsift makes:
//! - Building a reqwest client with the fixed header set
//! - Retried GET for search result pages
//! - Single-shot GET for detail pages

use crate::config::HttpConfig;
use crate::fetch::retry::RetryPolicy;
use crate::{Result, SiftError};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::Client;
use std::time::Duration;

/// Content type sent with every request
const PLAIN_TEXT_UTF8: &str = "text/plain; charset=UTF-8";

/// Builds an HTTP client with the fixed header set
///
/// Every request carries `Content-Type: text/plain; charset=UTF-8` and the
/// configured User-Agent.
///
/// # Arguments
///
/// * `config` - User-Agent and timeout settings
///
/// # Example
///
/// ```no_run
/// use seedsift::config::HttpConfig;
/// use seedsift::fetch::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(PLAIN_TEXT_UTF8));

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Owns the HTTP session and the retry policy for primary fetches
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    retry: RetryPolicy,
}

impl FetchClient {
    /// Creates a fetch client from the HTTP configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Header, timeout and retry settings
    ///
    /// # Returns
    ///
    /// * `Ok(FetchClient)` - Client ready for use
    /// * `Err(SiftError::Reqwest)` - The underlying client could not be built
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            retry: RetryPolicy::from_config(config),
        })
    }

    /// Wraps an existing client with the given retry policy
    pub fn with_client(client: Client, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Returns the retry policy applied to search page fetches
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Fetches a search page, retrying per the retry policy
    ///
    /// Both transport failures and non-success statuses count as failed
    /// attempts. Once the attempts are exhausted the last failure is returned
    /// as [`SiftError::Network`].
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the search page
    /// * `cookies` - Raw `Cookie` header value, if the site needs one
    pub async fn fetch(&self, url: &str, cookies: Option<&str>) -> Result<String> {
        self.retry
            .run(|attempt| async move {
                tracing::debug!("GET {} (attempt {})", url, attempt);
                self.fetch_checked(url, cookies).await
            })
            .await
    }

    /// Fetches a detail page once
    ///
    /// The status code is not checked: whatever body the server sends back
    /// (possibly empty) is returned. Only transport failures are errors.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the detail page
    /// * `cookies` - Raw `Cookie` header value, if the site needs one
    pub async fn fetch_page(&self, url: &str, cookies: Option<&str>) -> Result<String> {
        let response = self
            .get(url, cookies)
            .send()
            .await
            .map_err(|e| network_error(url, &e))?;

        if !response.status().is_success() {
            tracing::debug!("Detail page {} answered {}", url, response.status());
        }

        response.text().await.map_err(|e| network_error(url, &e))
    }

    async fn fetch_checked(&self, url: &str, cookies: Option<&str>) -> Result<String> {
        let response = self
            .get(url, cookies)
            .send()
            .await
            .map_err(|e| network_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiftError::Network {
                url: url.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        response.text().await.map_err(|e| network_error(url, &e))
    }

    fn get(&self, url: &str, cookies: Option<&str>) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        match cookies {
            Some(cookies) => request.header(COOKIE, cookies),
            None => request,
        }
    }
}

/// Classifies a reqwest failure into a network error
fn network_error(url: &str, error: &reqwest::Error) -> SiftError {
    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        "Connection refused".to_string()
    } else {
        error.to_string()
    };

    SiftError::Network {
        url: url.to_string(),
        message,
    }
}
