//! Traversal engine - crawl orchestration
//!
//! This module contains the entry point that coordinates one crawl:
//! - Building the immutable policy and fresh shared state
//! - Submitting one task per seed URL to a bounded worker pool
//! - Waiting for quiescence or the timeout, whichever comes first
//! - Reducing the accumulated counts into the final result

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::parser::{HtmlPageParser, PageParser};
use crate::crawler::policy::TraversalPolicy;
use crate::crawler::reducer::top_words;
use crate::crawler::result::CrawlResult;
use crate::crawler::state::SharedCrawlState;
use crate::crawler::task::{propagate_panic, CrawlTask, TaskContext};
use crate::output::Profiler;
use crate::url::IgnoreMatcher;
use crate::{ConfigError, ConfigResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Operation name recorded for every crawl
pub const CRAWL_OPERATION: &str = "TraversalEngine::crawl";

/// Number of CPUs the process may use, at least one
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Orchestrates crawls with a fixed configuration
pub struct TraversalEngine {
    timeout: Duration,
    max_depth: u32,
    popular_word_count: usize,
    ignored_urls: IgnoreMatcher,
    pool_size: usize,
    parser: Arc<dyn PageParser>,
    profiler: Arc<Profiler>,
}

impl TraversalEngine {
    /// Creates an engine that parses pages with `parser`
    ///
    /// Fails before any crawl can start if the parallelism is zero or an ignore
    /// pattern does not compile.
    pub fn new(config: &CrawlerConfig, parser: Arc<dyn PageParser>) -> ConfigResult<Self> {
        if config.parallelism == 0 {
            return Err(ConfigError::Validation(
                "parallelism must be >= 1".to_string(),
            ));
        }

        let ignored_urls = IgnoreMatcher::new(&config.ignored_urls)?;
        let pool_size = (config.parallelism as usize).min(available_parallelism());

        Ok(Self {
            timeout: config.timeout(),
            max_depth: config.max_depth,
            popular_word_count: config.popular_word_count,
            ignored_urls,
            pool_size,
            parser,
            profiler: Arc::new(Profiler::new()),
        })
    }

    /// Creates an engine backed by the HTML parser described in `config`
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let ignored_words = IgnoreMatcher::new(&config.crawler.ignored_words)?;
        let client = build_http_client(&config.user_agent, config.crawler.fetch_timeout())?;
        let parser = HtmlPageParser::new(client, ignored_words);

        Ok(Self::new(&config.crawler, Arc::new(parser))?)
    }

    /// Records timings into `profiler` instead of a private one
    pub fn with_profiler(mut self, profiler: Arc<Profiler>) -> Self {
        self.profiler = profiler;
        self
    }

    /// Profiler holding this engine's timings
    pub fn profiler(&self) -> &Arc<Profiler> {
        &self.profiler
    }

    /// Maximum number of pages parsed at the same time
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Crawls from `seed_urls` and returns the most popular words
    ///
    /// The result is best effort: if the timeout elapses before every task has
    /// finished, whatever was merged by then is reported and the remaining tasks are
    /// abandoned. URLs are claimed only by tasks holding a worker, so the visited count
    /// then exceeds the pages merged by at most [`pool_size`](Self::pool_size).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use word_ripple::config::load_config;
    /// use word_ripple::crawler::TraversalEngine;
    /// use std::path::Path;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = load_config(Path::new("crawl.toml"))?;
    /// let engine = TraversalEngine::from_config(&config)?;
    /// let result = engine.crawl(&config.crawler.start_pages).await;
    /// println!("Visited {} pages", result.urls_visited());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn crawl(&self, seed_urls: &[String]) -> CrawlResult {
        self.profiler
            .profile(CRAWL_OPERATION, self.run(seed_urls))
            .await
    }

    async fn run(&self, seed_urls: &[String]) -> CrawlResult {
        let policy = Arc::new(TraversalPolicy::starting_now(
            self.timeout,
            self.max_depth,
            self.ignored_urls.clone(),
            self.popular_word_count,
        ));
        let state = Arc::new(SharedCrawlState::new());

        let ctx = Arc::new(TaskContext {
            policy: Arc::clone(&policy),
            state: Arc::clone(&state),
            parser: Arc::clone(&self.parser),
            profiler: Arc::clone(&self.profiler),
            workers: Arc::new(Semaphore::new(self.pool_size)),
        });

        tracing::info!(
            "Starting crawl of {} seed URLs (max depth {}, {} workers, timeout {:?})",
            seed_urls.len(),
            self.max_depth,
            self.pool_size,
            self.timeout
        );

        let mut seeds = JoinSet::new();
        for url in seed_urls {
            seeds.spawn(CrawlTask::new(url.clone(), policy.max_depth()).execute(Arc::clone(&ctx)));
        }

        let quiesced = tokio::time::timeout(policy.remaining(), async {
            while let Some(joined) = seeds.join_next().await {
                propagate_panic(joined);
            }
        })
        .await
        .is_ok();

        let (counts, urls_visited) = state.snapshot();

        if quiesced {
            tracing::info!("Crawl finished: {} pages visited", urls_visited);
        } else {
            tracing::warn!(
                "Timeout reached with {} seed tasks still running; reporting partial result ({} pages visited)",
                seeds.len(),
                urls_visited
            );
        }

        // Dropping a task cancels the JoinSet of children it owns as well
        seeds.abort_all();

        if counts.is_empty() {
            return CrawlResult::new(Vec::new(), urls_visited);
        }

        CrawlResult::new(
            top_words(&counts, policy.popular_word_count()),
            urls_visited,
        )
    }
}
