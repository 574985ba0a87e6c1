//! Recursive crawl task
//!
//! A task visits one URL and forks one child task per outbound link. A parent
//! awaits all of its children before it completes, so a seed task finishes only
//! once its whole subtree has finished.

use crate::crawler::parser::{PageParser, ParsedPage};
use crate::crawler::policy::TraversalPolicy;
use crate::crawler::state::SharedCrawlState;
use crate::output::Profiler;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::{Semaphore, SemaphorePermit};
use tokio::task::{JoinError, JoinSet};

/// Operation name recorded for every parser call
pub const PARSE_OPERATION: &str = "PageParser::parse";

/// Everything a task shares with the other tasks of the same crawl
pub struct TaskContext {
    pub policy: Arc<TraversalPolicy>,
    pub state: Arc<SharedCrawlState>,
    pub parser: Arc<dyn PageParser>,
    pub profiler: Arc<Profiler>,

    /// Bounds how many parser calls run at once
    pub workers: Arc<Semaphore>,
}

impl TaskContext {
    /// Waits until a worker is free; `None` once the pool has been closed
    async fn acquire_worker(&self) -> Option<SemaphorePermit<'_>> {
        self.workers.acquire().await.ok()
    }

    /// Runs the parser for `url`
    ///
    /// A failing page is logged and treated as having no words and no links.
    async fn parse(&self, url: &str) -> ParsedPage {
        match self
            .profiler
            .profile(PARSE_OPERATION, self.parser.parse(url))
            .await
        {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", url, e);
                ParsedPage::default()
            }
        }
    }
}

/// One attempt to visit a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    url: String,
    remaining_depth: u32,
}

impl CrawlTask {
    /// Creates a task for `url` with the given depth budget
    pub fn new(url: impl Into<String>, remaining_depth: u32) -> Self {
        Self {
            url: url.into(),
            remaining_depth,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn remaining_depth(&self) -> u32 {
        self.remaining_depth
    }

    /// Task for a link found on this task's page
    fn child(&self, url: String) -> Self {
        Self::new(url, self.remaining_depth.saturating_sub(1))
    }

    /// Visits the URL and everything reachable from it within the depth budget
    ///
    /// Each step short-circuits:
    /// 1. depth budget exhausted
    /// 2. deadline reached (checked once a worker is free, never while parsing)
    /// 3. URL matches an ignore pattern
    /// 4. URL already claimed by another task
    ///
    /// Otherwise the page is parsed and its words merged, all on the same worker.
    /// The worker is released before one child per link is forked and awaited.
    pub fn execute(self, ctx: Arc<TaskContext>) -> BoxFuture<'static, ()> {
        async move {
            if self.remaining_depth == 0 {
                return;
            }

            let Some(worker) = ctx.acquire_worker().await else {
                return;
            };

            if ctx.policy.is_expired() {
                tracing::debug!("Deadline reached, not visiting {}", self.url);
                return;
            }

            if ctx.policy.is_ignored(&self.url) {
                tracing::debug!("Ignoring {}", self.url);
                return;
            }

            if !ctx.state.try_claim(&self.url) {
                tracing::trace!("Already visited {}", self.url);
                return;
            }

            tracing::debug!(
                "Visiting {} (remaining depth {})",
                self.url,
                self.remaining_depth
            );

            let page = ctx.parse(&self.url).await;
            ctx.state.merge_word_counts(&page.word_counts);

            // A parent waiting on its children must not hold a worker
            drop(worker);

            let mut children = JoinSet::new();
            for link in page.links {
                children.spawn(self.child(link).execute(Arc::clone(&ctx)));
            }

            while let Some(joined) = children.join_next().await {
                propagate_panic(joined);
            }
        }
        .boxed()
    }
}

/// Re-raises a child's panic in the parent; cancelled children are ignored
pub(crate) fn propagate_panic(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        if e.is_panic() {
            std::panic::resume_unwind(e.into_panic());
        }
    }
}
