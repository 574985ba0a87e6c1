//! Top-N selection over the aggregated word counts

use std::cmp::Ordering;
use std::collections::HashMap;

/// Returns the `n` most frequent words, most frequent first
///
/// Ties are broken by word length (longer first), then alphabetically. Because words
/// are unique keys, this is a total order and the output depends only on the input
/// mapping, never on its iteration order.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use word_ripple::crawler::top_words;
///
/// let counts: HashMap<String, u64> =
///     [("dog", 4), ("cat", 2), ("eel", 2)].iter().map(|(w, c)| (w.to_string(), *c)).collect();
/// assert_eq!(top_words(&counts, 2), vec![("dog".to_string(), 4), ("cat".to_string(), 2)]);
/// ```
pub fn top_words(counts: &HashMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(&String, &u64)> = counts.iter().collect();
    entries.sort_unstable_by(|a, b| compare_entries(a, b));

    entries
        .into_iter()
        .take(n)
        .map(|(word, count)| (word.clone(), *count))
        .collect()
}

fn compare_entries(a: &(&String, &u64), b: &(&String, &u64)) -> Ordering {
    b.1.cmp(a.1)
        .then_with(|| b.0.len().cmp(&a.0.len()))
        .then_with(|| a.0.cmp(b.0))
}
