//! Immutable traversal policy shared by every task of one crawl

use crate::url::IgnoreMatcher;
use std::time::Duration;
use tokio::time::Instant;

/// Far-future fallback when `now + timeout` does not fit in an `Instant`
const UNBOUNDED_TIMEOUT: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// The rules that bound one crawl
///
/// Built once per `crawl` call and shared by reference with every task; never mutated.
#[derive(Debug)]
pub struct TraversalPolicy {
    deadline: Instant,
    max_depth: u32,
    ignored_urls: IgnoreMatcher,
    popular_word_count: usize,
}

impl TraversalPolicy {
    /// Creates a policy whose deadline is `timeout` from now
    pub fn starting_now(
        timeout: Duration,
        max_depth: u32,
        ignored_urls: IgnoreMatcher,
        popular_word_count: usize,
    ) -> Self {
        let now = Instant::now();
        let deadline = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + UNBOUNDED_TIMEOUT);

        Self {
            deadline,
            max_depth,
            ignored_urls,
            popular_word_count,
        }
    }

    /// Absolute instant after which no task starts new work
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Depth budget handed to seed URLs
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Number of words kept in the result
    pub fn popular_word_count(&self) -> usize {
        self.popular_word_count
    }

    /// Returns true once the current time is at or past the deadline
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Time left until the deadline, zero once it has passed
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Returns true if the URL matches one of the ignore patterns
    pub fn is_ignored(&self, url: &str) -> bool {
        self.ignored_urls.matches(url)
    }
}
