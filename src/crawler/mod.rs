//! Crawler module for the parallel word-count traversal
//!
//! This module contains the core crawling logic, including:
//! - Document fetching and HTML parsing into words and links
//! - The shared dedup set and word-count accumulator
//! - The recursive fork/join crawl task
//! - Overall crawl orchestration and top-N reduction

mod engine;
mod fetcher;
mod parser;
mod policy;
mod reducer;
mod result;
mod state;
mod task;

pub use engine::{available_parallelism, TraversalEngine, CRAWL_OPERATION};
pub use fetcher::{build_http_client, fetch_document, FetchedDocument};
pub use parser::{count_words, parse_html, HtmlPageParser, PageParser, ParsedPage};
pub use policy::TraversalPolicy;
pub use reducer::top_words;
pub use result::CrawlResult;
pub use state::SharedCrawlState;
pub use task::{CrawlTask, TaskContext, PARSE_OPERATION};

use crate::config::Config;

/// Runs a complete crawl described by a configuration
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and HTML parser
/// 2. Build the traversal engine (failing fast on a bad policy)
/// 3. Crawl the configured start pages until quiescence or timeout
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlResult)` - The most popular words and the number of pages visited
/// * `Err(RippleError)` - The configuration could not be turned into an engine
pub async fn crawl(config: &Config) -> crate::Result<CrawlResult> {
    let engine = TraversalEngine::from_config(config)?;
    Ok(engine.crawl(&config.crawler.start_pages).await)
}
