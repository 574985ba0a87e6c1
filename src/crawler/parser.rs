//! Page parser collaborator
//!
//! This module turns a document into the two things the traversal needs:
//! - the occurrence count of every word in the document body
//! - the outbound links to follow

use crate::crawler::fetcher::fetch_document;
use crate::url::{resolve_link, IgnoreMatcher};
use crate::PageResult;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use url::Url;

/// Elements whose text is never counted
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Words and links extracted from a single document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Occurrence count of every (lowercased) word in the document
    pub word_counts: HashMap<String, u64>,

    /// Absolute URLs of the outbound links, in document order
    pub links: Vec<String>,
}

/// Fetches and parses one document
///
/// Implementations must be safe to call from many tasks at once.
#[async_trait]
pub trait PageParser: Send + Sync {
    /// Returns the word counts and outbound links of the document at `url`
    async fn parse(&self, url: &str) -> PageResult<ParsedPage>;
}

/// Parser for HTML documents reachable over HTTP(S) or `file://`
#[derive(Debug, Clone)]
pub struct HtmlPageParser {
    client: Client,
    ignored_words: IgnoreMatcher,
}

impl HtmlPageParser {
    /// Creates a parser using `client` for HTTP and dropping words matched by `ignored_words`
    pub fn new(client: Client, ignored_words: IgnoreMatcher) -> Self {
        Self {
            client,
            ignored_words,
        }
    }
}

#[async_trait]
impl PageParser for HtmlPageParser {
    async fn parse(&self, url: &str) -> PageResult<ParsedPage> {
        let document = fetch_document(&self.client, url).await?;
        Ok(parse_html(
            &document.body,
            &document.final_url,
            &self.ignored_words,
        ))
    }
}

/// Parses HTML content into word counts and absolute links
///
/// Words come from the text of `<body>` (the whole document when there is no body),
/// skipping `<script>`, `<style>`, `<noscript>` and `<template>` contents. Links follow
/// the rules of [`resolve_link`].
///
/// # Example
///
/// ```
/// use url::Url;
/// use word_ripple::crawler::parse_html;
/// use word_ripple::url::IgnoreMatcher;
///
/// let html = r#"<html><body><p>Dog dog cat</p><a href="/next">next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_html(html, &base_url, &IgnoreMatcher::default());
/// assert_eq!(page.word_counts.get("dog"), Some(&2));
/// assert_eq!(page.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, ignored_words: &IgnoreMatcher) -> ParsedPage {
    let document = Html::parse_document(html);

    let text = extract_text(&document);
    let word_counts = count_words(&text, ignored_words);
    let links = extract_links(&document, base_url);

    ParsedPage { word_counts, links }
}

/// Splits text into lowercase words and counts them
///
/// A word is a maximal run of alphanumeric characters. Words fully matching one of
/// `ignored_words` are dropped.
pub fn count_words(text: &str, ignored_words: &IgnoreMatcher) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
    {
        if ignored_words.matches(&word) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    counts
}

/// Collects the visible text of the body, one text node per segment
fn extract_text(document: &Html) -> String {
    let root = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut text = String::new();
    for node in root.descendants() {
        let Some(segment) = node.value().as_text() else {
            continue;
        };

        let skipped = node
            .parent()
            .and_then(ElementRef::wrap)
            .map(|parent| SKIPPED_ELEMENTS.contains(&parent.value().name()))
            .unwrap_or(false);
        if skipped {
            continue;
        }

        text.push_str(segment);
        text.push(' ');
    }

    text
}

/// Extracts every followable `<a href>` link in document order
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}
