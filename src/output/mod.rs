//! Output module for crawl results and diagnostics
//!
//! This module handles:
//! - Appending crawl results to a JSON file
//! - Printing a readable summary of a crawl
//! - Recording per-operation timings and writing them out

mod profiler;
pub mod stats;
mod writer;

pub use profiler::{OperationStats, Profiler};
pub use stats::{format_summary, print_summary};
pub use writer::CrawlResultWriter;
