use crate::{ConfigError, ConfigResult};
use regex::Regex;

/// Tests strings against an ordered set of full-match regular expressions
///
/// A pattern only matches when it covers the whole candidate, so `http://x` does
/// not match `http://x/page`. The matcher is immutable once built and can be shared
/// freely between tasks.
///
/// # Examples
///
/// ```
/// use word_ripple::url::IgnoreMatcher;
///
/// let matcher = IgnoreMatcher::new(&["https://example\\.com/private/.*"]).unwrap();
/// assert!(matcher.matches("https://example.com/private/a"));
/// assert!(!matcher.matches("https://example.com/public"));
/// assert!(!matcher.matches("see https://example.com/private/a"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<Regex>,
}

impl IgnoreMatcher {
    /// Compiles every pattern, failing on the first one that is malformed
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> ConfigResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| compile_full_match(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if any pattern matches the whole candidate
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(candidate))
    }

    /// Number of configured patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true when no pattern is configured
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Anchors a pattern at both ends so it has to match the entire input
fn compile_full_match(pattern: &str) -> ConfigResult<Regex> {
    Regex::new(&format!("^(?:{})$", pattern))
        .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", pattern, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let matcher = IgnoreMatcher::new(&["http://x"]).unwrap();
        assert!(matcher.matches("http://x"));
    }

    #[test]
    fn test_substring_does_not_match() {
        let matcher = IgnoreMatcher::new(&["http://x"]).unwrap();
        assert!(!matcher.matches("http://x/page"));
        assert!(!matcher.matches("ahttp://x"));
    }

    #[test]
    fn test_wildcard_pattern() {
        let matcher = IgnoreMatcher::new(&[r"https?://ads\..*"]).unwrap();
        assert!(matcher.matches("http://ads.example.com/banner"));
        assert!(matcher.matches("https://ads.example.com/"));
        assert!(!matcher.matches("https://example.com/ads.html"));
    }

    #[test]
    fn test_any_pattern_matches() {
        let matcher = IgnoreMatcher::new(&["http://a", "http://b"]).unwrap();
        assert!(matcher.matches("http://a"));
        assert!(matcher.matches("http://b"));
        assert!(!matcher.matches("http://c"));
    }

    #[test]
    fn test_pattern_order_irrelevant() {
        let forward = IgnoreMatcher::new(&["http://a", ".*\\.pdf"]).unwrap();
        let backward = IgnoreMatcher::new(&[".*\\.pdf", "http://a"]).unwrap();

        for candidate in ["http://a", "http://b/doc.pdf", "http://c"] {
            assert_eq!(forward.matches(candidate), backward.matches(candidate));
        }
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        // Without grouping, "^a|b$" would match "bz" via the first branch
        let matcher = IgnoreMatcher::new(&["a|b"]).unwrap();
        assert!(matcher.matches("a"));
        assert!(matcher.matches("b"));
        assert!(!matcher.matches("az"));
        assert!(!matcher.matches("zb"));
    }

    #[test]
    fn test_already_anchored_pattern() {
        let matcher = IgnoreMatcher::new(&["^.{1,3}$"]).unwrap();
        assert!(matcher.matches("the"));
        assert!(!matcher.matches("word"));
    }

    #[test]
    fn test_empty_matcher() {
        let matcher = IgnoreMatcher::new::<&str>(&[]).unwrap();
        assert!(matcher.is_empty());
        assert!(!matcher.matches("anything"));
        assert!(!matcher.matches(""));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = IgnoreMatcher::new(&["valid", "(unclosed"]);
        assert!(matches!(result, Err(ConfigError::InvalidPattern(_))));
    }
}
