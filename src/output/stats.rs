//! Human-readable crawl summaries

use crate::crawler::CrawlResult;

/// Formats a crawl result as a short text report
pub fn format_summary(result: &CrawlResult) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Summary ===\n\n");
    out.push_str(&format!("Pages visited: {}\n", result.urls_visited()));

    if result.word_counts().is_empty() {
        out.push_str("No words counted\n");
        return out;
    }

    out.push_str(&format!(
        "\nMost popular words ({}):\n",
        result.word_counts().len()
    ));

    let width = result
        .word_counts()
        .iter()
        .map(|(word, _)| word.chars().count())
        .max()
        .unwrap_or(0);

    for (rank, (word, count)) in result.word_counts().iter().enumerate() {
        out.push_str(&format!(
            "  {:>3}. {:<width$}  {}\n",
            rank + 1,
            word,
            count,
            width = width
        ));
    }

    out
}

/// Prints a crawl result to stdout in a formatted manner
pub fn print_summary(result: &CrawlResult) {
    print!("{}", format_summary(result));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_words_in_order() {
        let result = CrawlResult::new(
            vec![("elephant".to_string(), 7), ("dog".to_string(), 4)],
            3,
        );
        let summary = format_summary(&result);

        assert!(summary.contains("Pages visited: 3"));
        assert!(summary.contains("Most popular words (2):"));
        assert!(summary.contains("    1. elephant  7"));
        assert!(summary.contains("    2. dog       4"));
    }

    #[test]
    fn test_summary_without_words() {
        let summary = format_summary(&CrawlResult::new(vec![], 1));
        assert!(summary.contains("Pages visited: 1"));
        assert!(summary.contains("No words counted"));
    }
}
