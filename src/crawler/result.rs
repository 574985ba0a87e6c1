use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// Outcome of one crawl
///
/// Serializes as `{"wordCounts": {word: count, ...}, "urlsVisited": n}` with the words
/// kept in their popularity order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    word_counts: Vec<(String, u64)>,
    urls_visited: usize,
}

impl CrawlResult {
    /// Creates a result from already ordered word counts
    pub fn new(word_counts: Vec<(String, u64)>, urls_visited: usize) -> Self {
        Self {
            word_counts,
            urls_visited,
        }
    }

    /// The most popular words, most frequent first
    pub fn word_counts(&self) -> &[(String, u64)] {
        &self.word_counts
    }

    /// Number of distinct URLs visited
    pub fn urls_visited(&self) -> usize {
        self.urls_visited
    }
}

/// Serializes ordered pairs as a JSON object without re-sorting them
struct OrderedCounts<'a>(&'a [(String, u64)]);

impl Serialize for OrderedCounts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut result = serializer.serialize_struct("CrawlResult", 2)?;
        result.serialize_field("wordCounts", &OrderedCounts(&self.word_counts))?;
        result.serialize_field("urlsVisited", &self.urls_visited)?;
        result.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_keeps_word_order() {
        let result = CrawlResult::new(
            vec![("zebra".to_string(), 5), ("apple".to_string(), 2)],
            3,
        );
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"wordCounts":{"zebra":5,"apple":2},"urlsVisited":3}"#);
    }

    #[test]
    fn test_empty_result() {
        let result = CrawlResult::default();
        assert!(result.word_counts().is_empty());
        assert_eq!(result.urls_visited(), 0);
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"wordCounts":{},"urlsVisited":0}"#
        );
    }
}
