//! Word-Ripple main entry point
//!
//! This is the command-line interface for the Word-Ripple crawler.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use word_ripple::config::{load_config_with_hash, Config};
use word_ripple::crawler::{available_parallelism, TraversalEngine};
use word_ripple::output::{print_summary, CrawlResultWriter, Profiler};

/// Word-Ripple: a deadline-bounded parallel word-frequency crawler
///
/// Word-Ripple follows links from the configured start pages up to a maximum
/// depth, counts the words of every page it visits, and reports the most
/// popular ones.
#[derive(Parser, Debug)]
#[command(name = "word-ripple")]
#[command(version)]
#[command(about = "A deadline-bounded parallel word-frequency crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Seed URL to start from instead of the configured start pages (repeatable)
    #[arg(long = "seed", value_name = "URL")]
    seeds: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if !cli.seeds.is_empty() {
        config.crawler.start_pages = cli.seeds;
    }

    if config.crawler.start_pages.is_empty() {
        bail!("No start pages configured; add `start-pages` or pass --seed");
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("word_ripple=info,warn"),
            1 => EnvFilter::new("word_ripple=debug,info"),
            2 => EnvFilter::new("word_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so a JSON result on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    let crawler = &config.crawler;

    println!("=== Word-Ripple Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", crawler.max_depth);
    println!(
        "  Parallelism: {} requested, {} used",
        crawler.parallelism,
        (crawler.parallelism as usize).min(available_parallelism())
    );
    println!("  Timeout: {}s", crawler.timeout_seconds);
    println!("  Fetch timeout: {}s", crawler.fetch_timeout_seconds);
    println!("  Popular word count: {}", crawler.popular_word_count);

    println!("\nUser Agent:");
    println!(
        "  {}/{}",
        config.user_agent.crawler_name, config.user_agent.crawler_version
    );

    println!("\nOutput:");
    println!(
        "  Result: {}",
        config.output.result_path.as_deref().unwrap_or("<stdout>")
    );
    println!(
        "  Profile: {}",
        config
            .output
            .profile_output_path
            .as_deref()
            .unwrap_or("<stdout>")
    );

    println!("\nStart Pages ({}):", crawler.start_pages.len());
    for page in &crawler.start_pages {
        println!("  - {}", page);
    }

    println!("\nIgnored URL Patterns ({}):", crawler.ignored_urls.len());
    for pattern in &crawler.ignored_urls {
        println!("  - {}", pattern);
    }

    println!("\nIgnored Word Patterns ({}):", crawler.ignored_words.len());
    for pattern in &crawler.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let profiler = Arc::new(Profiler::new());
    let engine = TraversalEngine::from_config(config)
        .context("Failed to build traversal engine")?
        .with_profiler(Arc::clone(&profiler));

    let result = engine.crawl(&config.crawler.start_pages).await;
    let writer = CrawlResultWriter::new(&result);

    match &config.output.result_path {
        Some(path) => {
            writer
                .write_path(Path::new(path))
                .with_context(|| format!("Failed to write crawl result to {}", path))?;
            tracing::info!("Crawl result appended to: {}", path);
            print_summary(&result);
        }
        None => writer
            .write_to(std::io::stdout().lock())
            .context("Failed to write crawl result to stdout")?,
    }

    match &config.output.profile_output_path {
        Some(path) => {
            profiler
                .write_path(Path::new(path))
                .with_context(|| format!("Failed to write profile data to {}", path))?;
            tracing::info!("Profile data appended to: {}", path);
        }
        None => profiler
            .write_to(std::io::stdout().lock())
            .context("Failed to write profile data to stdout")?,
    }

    Ok(())
}
