use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Word-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URLs the crawl starts from
    #[serde(rename = "start-pages", default)]
    pub start_pages: Vec<String>,

    /// Full-match regular expressions for URLs that must never be visited
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// Full-match regular expressions for words that are never counted
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,

    /// Requested number of concurrent workers
    pub parallelism: u32,

    /// Depth budget given to every seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget for the whole crawl (seconds)
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Number of words reported in the result
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: usize,

    /// Timeout for a single document fetch (seconds)
    #[serde(rename = "fetch-timeout-seconds", default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,
}

impl CrawlerConfig {
    /// Returns the whole-crawl timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Returns the per-document fetch timeout as a `Duration`
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

fn default_fetch_timeout() -> u64 {
    30
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "word-ripple".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// File the JSON crawl result is appended to; stdout when absent
    #[serde(rename = "result-path")]
    pub result_path: Option<String>,

    /// File the profiling data is appended to; stdout when absent
    #[serde(rename = "profile-output-path")]
    pub profile_output_path: Option<String>,
}
