//! Deduplication and word-count aggregation shared by all tasks of one crawl

use dashmap::DashSet;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Mutable state shared by every task of one crawl
///
/// `visited` only grows; a URL enters it exactly once, through [`try_claim`].
/// `counts` only grows; a whole page is merged under a single lock acquisition so
/// readers never observe half of a page's contribution.
///
/// [`try_claim`]: SharedCrawlState::try_claim
#[derive(Debug, Default)]
pub struct SharedCrawlState {
    visited: DashSet<String>,
    counts: Mutex<HashMap<String, u64>>,
}

impl SharedCrawlState {
    /// Creates an empty state for a new crawl
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically marks `url` as visited
    ///
    /// Returns true for exactly one caller per URL, no matter how many tasks race on
    /// it; every other caller gets false and must not process the URL.
    pub fn try_claim(&self, url: &str) -> bool {
        // DashSet::insert checks and inserts under the same shard lock
        self.visited.insert(url.to_string())
    }

    /// Adds every count of `page_counts` to the running totals
    pub fn merge_word_counts(&self, page_counts: &HashMap<String, u64>) {
        if page_counts.is_empty() {
            return;
        }

        let mut counts = self.lock_counts();
        for (word, count) in page_counts {
            *counts.entry(word.clone()).or_insert(0) += count;
        }
    }

    /// Number of distinct URLs claimed so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Returns true if `url` has been claimed
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Point-in-time copy of the accumulated word counts
    pub fn snapshot_counts(&self) -> HashMap<String, u64> {
        self.lock_counts().clone()
    }

    /// Point-in-time copy of the word counts together with the visited count
    ///
    /// The visited count is read while the counts are locked, so no page is merged
    /// between the two reads. It can still include pages whose parse is in flight.
    pub fn snapshot(&self) -> (HashMap<String, u64>, usize) {
        let counts = self.lock_counts();
        (counts.clone(), self.visited.len())
    }

    fn lock_counts(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        // A panic elsewhere cannot leave a half-applied increment behind
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
