//! Document fetcher
//!
//! This module loads the raw content of a document, either over HTTP(S) with a
//! shared `reqwest` client or from the local filesystem for `file://` URLs.

use crate::config::UserAgentConfig;
use crate::{PageError, PageResult};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum number of redirects followed for a single document
const MAX_REDIRECTS: usize = 10;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `fetch_timeout` - Timeout applied to each request
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use word_ripple::config::UserAgentConfig;
/// use word_ripple::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    fetch_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version
    let user_agent = format!("{}/{}", config.crawler_name, config.crawler_version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(fetch_timeout)
        .connect_timeout(fetch_timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// A fetched document
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// URL the content was finally served from (after redirects)
    pub final_url: Url,

    /// Document body
    pub body: String,
}

/// Fetches the content behind `url`
///
/// | Scheme | Behavior |
/// |--------|----------|
/// | `http`, `https` | GET with the shared client; non-2xx is an error |
/// | `file` | read from disk |
/// | anything else | `PageError::UnsupportedScheme` |
pub async fn fetch_document(client: &Client, url: &str) -> PageResult<FetchedDocument> {
    let parsed = Url::parse(url).map_err(|e| PageError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => fetch_http(client, parsed).await,
        "file" => fetch_file(parsed).await,
        other => Err(PageError::UnsupportedScheme(other.to_string())),
    }
}

async fn fetch_http(client: &Client, url: Url) -> PageResult<FetchedDocument> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| PageError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(PageError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(|source| PageError::Fetch {
        url: url.to_string(),
        source,
    })?;

    Ok(FetchedDocument { final_url, body })
}

async fn fetch_file(url: Url) -> PageResult<FetchedDocument> {
    let path = url.to_file_path().map_err(|_| PageError::InvalidUrl {
        url: url.to_string(),
        message: "not a local file path".to_string(),
    })?;

    let body = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| PageError::Io {
            url: url.to_string(),
            source,
        })?;

    Ok(FetchedDocument {
        final_url: url,
        body,
    })
}
