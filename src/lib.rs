//! Word-Ripple: a deadline-bounded parallel word-frequency crawler
//!
//! This crate follows outbound links from a set of seed documents up to a bounded
//! depth, counts the words of every document it visits exactly once, and reports
//! the most popular words together with the number of documents visited.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Word-Ripple operations
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Errors raised while fetching or parsing a single document
///
/// These never abort a crawl; the task that hit one logs it and moves on.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("HTTP error for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {url}: {source}")]
    Io {
        url: String,
        source: std::io::Error,
    },

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Result type alias for Word-Ripple operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page operations
pub type PageResult<T> = std::result::Result<T, PageError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlResult, TraversalEngine};
pub use crate::url::IgnoreMatcher;

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(pattern: &str) -> Result<IgnoreMatcher> {
        Ok(IgnoreMatcher::new(&[pattern])?)
    }

    #[test]
    fn test_config_errors_surface_as_ripple_errors() {
        assert!(matcher("https://example\\.com/.*").is_ok());
        assert!(matches!(
            matcher("("),
            Err(RippleError::Config(ConfigError::InvalidPattern(_)))
        ));
    }

    #[test]
    fn test_page_result_carries_page_errors() {
        let result: PageResult<()> = Err(PageError::UnsupportedScheme("ftp".to_string()));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Unsupported URL scheme: ftp"
        );
    }
}
