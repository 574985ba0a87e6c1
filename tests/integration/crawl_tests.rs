//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use std::path::Path;
use word_ripple::config::{parse_config, Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use word_ripple::crawler::{crawl, TraversalEngine};
use word_ripple::output::CrawlResultWriter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for the given seeds
fn create_test_config(seeds: Vec<String>, max_depth: u32, popular_word_count: usize) -> Config {
    Config {
        crawler: CrawlerConfig {
            start_pages: seeds,
            ignored_urls: vec![],
            ignored_words: vec![],
            parallelism: 4,
            max_depth,
            timeout_seconds: 30,
            popular_word_count,
            fetch_timeout_seconds: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
        },
        output: OutputConfig::default(),
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

/// Mounts a small site:
///
/// - `/` : "cat cat dog", links to `/page1` and `/missing`
/// - `/page1` : "dog dog", links back to `/`
/// - `/missing` : 404
async fn mount_site(server: &MockServer, root_hits: u64, page1_hits: u64) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<p>cat cat dog</p><a href="/page1">next</a><a href="/missing">gone</a>"#,
        ))
        .expect(root_hits)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html(r#"<p>dog dog</p><a href="/">home</a>"#))
        .expect(page1_hits)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, 1, 1).await;

    let seed = format!("{}/", mock_server.uri());
    let config = create_test_config(vec![seed], 3, 2);

    let result = crawl(&config).await.expect("crawl should start");

    // `/`, `/page1` and the unreachable `/missing` are all claimed once
    assert_eq!(result.urls_visited(), 3);
    assert_eq!(
        result.word_counts(),
        &[("dog".to_string(), 3), ("cat".to_string(), 2)]
    );
}

#[tokio::test]
async fn test_depth_one_fetches_only_seed() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, 1, 0).await;

    let seed = format!("{}/", mock_server.uri());
    let config = create_test_config(vec![seed.clone(), seed], 1, 10);

    let result = crawl(&config).await.unwrap();

    assert_eq!(result.urls_visited(), 1);
    assert_eq!(
        result.word_counts().first(),
        Some(&("cat".to_string(), 2))
    );
}

#[tokio::test]
async fn test_ignored_urls_and_words() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, 1, 0).await;

    let seed = format!("{}/", mock_server.uri());
    let mut config = create_test_config(vec![seed], 3, 5);
    config.crawler.ignored_urls = vec![".*/page1".to_string()];
    config.crawler.ignored_words = vec!["^.{1,3}$".to_string()];

    let result = crawl(&config).await.unwrap();

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(
        result.word_counts(),
        &[("gone".to_string(), 1), ("next".to_string(), 1)]
    );
}

#[tokio::test]
async fn test_expired_timeout_fetches_nothing() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, 0, 0).await;

    let seed = format!("{}/", mock_server.uri());
    let mut config = create_test_config(vec![seed], 3, 5);
    config.crawler.timeout_seconds = 0;

    let result = crawl(&config).await.unwrap();

    assert_eq!(result.urls_visited(), 0);
    assert!(result.word_counts().is_empty());
}

#[tokio::test]
async fn test_invalid_ignore_pattern_fails_before_crawling() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, 0, 0).await;

    let seed = format!("{}/", mock_server.uri());
    let mut config = create_test_config(vec![seed], 3, 5);
    config.crawler.ignored_urls = vec!["[unclosed".to_string()];

    assert!(TraversalEngine::from_config(&config).is_err());
    assert!(crawl(&config).await.is_err());
}

#[tokio::test]
async fn test_crawl_local_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("index.html"),
        r#"<html><body>Rust rust crab <a href="about.html">about</a></body></html>"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("about.html"),
        r#"<html><body>crab crab <a href="index.html#top">home</a></body></html>"#,
    )
    .unwrap();

    let seed = url::Url::from_file_path(dir.path().join("index.html")).unwrap();
    let config = parse_config(&format!(
        r#"
[crawler]
start-pages = ["{}"]
parallelism = 2
max-depth = 5
timeout-seconds = 30
popular-word-count = 2
"#,
        seed
    ))
    .unwrap();

    let result = crawl(&config).await.unwrap();

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(
        result.word_counts(),
        &[("crab".to_string(), 3), ("rust".to_string(), 2)]
    );
}

#[tokio::test]
async fn test_results_appended_to_file() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, 2, 2).await;

    let seed = format!("{}/", mock_server.uri());
    let config = create_test_config(vec![seed], 3, 3);
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("results.json");

    for _ in 0..2 {
        let result = crawl(&config).await.unwrap();
        CrawlResultWriter::new(&result)
            .write_path(Path::new(&output))
            .unwrap();
    }

    let content = std::fs::read_to_string(&output).unwrap();
    let documents: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&content)
        .into_iter::<serde_json::Value>()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(documents.len(), 2);
    for document in documents {
        assert_eq!(document["urlsVisited"], 3);
        assert_eq!(document["wordCounts"]["dog"], 3);
    }
}
