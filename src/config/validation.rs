use crate::config::types::{Config, CrawlerConfig, UserAgentConfig};
use crate::url::IgnoreMatcher;
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Upper bound on the requested worker count
const MAX_PARALLELISM: u32 = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    // max_depth and timeout are unsigned; zero is a legal (empty) crawl

    if config.parallelism < 1 || config.parallelism > MAX_PARALLELISM {
        return Err(ConfigError::Validation(format!(
            "parallelism must be between 1 and {}, got {}",
            MAX_PARALLELISM, config.parallelism
        )));
    }

    if config.fetch_timeout_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_seconds must be >= 1, got {}",
            config.fetch_timeout_seconds
        )));
    }

    IgnoreMatcher::new(&config.ignored_urls)?;
    IgnoreMatcher::new(&config.ignored_words)?;

    for page in &config.start_pages {
        validate_start_page(page)?;
    }

    Ok(())
}

/// Validates a single seed URL
fn validate_start_page(page: &str) -> ConfigResult<()> {
    let url = Url::parse(page)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start page '{}': {}", page, e)))?;

    match url.scheme() {
        "http" | "https" | "file" => Ok(()),
        other => Err(ConfigError::Validation(format!(
            "Start page '{}' uses unsupported scheme '{}'",
            page, other
        ))),
    }
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Ok(())
}
