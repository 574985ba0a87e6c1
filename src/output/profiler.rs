//! Per-operation timing
//!
//! The profiler keeps, for every named operation, how often it ran and how long it
//! took in total. Recording takes a short mutex; it never changes what the timed
//! code does.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::future::Future;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Accumulated timings of one operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationStats {
    /// Number of recorded calls
    pub calls: u64,

    /// Sum of the elapsed time of every call
    pub total: Duration,
}

/// Thread-safe recorder of operation timings
#[derive(Debug)]
pub struct Profiler {
    started_at: DateTime<Utc>,
    operations: Mutex<BTreeMap<String, OperationStats>>,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    /// Creates an empty profiler stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            operations: Mutex::new(BTreeMap::new()),
        }
    }

    /// Adds one call of `operation` that took `elapsed`
    pub fn record(&self, operation: &str, elapsed: Duration) {
        let mut operations = self.lock();
        let stats = operations.entry(operation.to_string()).or_default();
        stats.calls += 1;
        stats.total += elapsed;
    }

    /// Awaits `future` and records how long it took under `operation`
    ///
    /// The call is recorded whatever the future's output, including errors.
    pub async fn profile<F: Future>(&self, operation: &str, future: F) -> F::Output {
        let started = Instant::now();
        let output = future.await;
        self.record(operation, started.elapsed());
        output
    }

    /// Timings recorded so far for `operation`
    pub fn stats(&self, operation: &str) -> Option<OperationStats> {
        self.lock().get(operation).copied()
    }

    /// Writes a report of every operation, sorted by name
    ///
    /// ```text
    /// Run at Sat, 17 Oct 2026 10:15:00 GMT
    /// PageParser::parse took 0m 3s 120ms (42 calls)
    /// TraversalEngine::crawl took 0m 4s 7ms (1 calls)
    /// ```
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(
            writer,
            "Run at {}",
            self.started_at.format("%a, %-d %b %Y %H:%M:%S GMT")
        )?;

        for (operation, stats) in self.lock().iter() {
            writeln!(
                writer,
                "{} took {} ({} calls)",
                operation,
                format_duration(stats.total),
                stats.calls
            )?;
        }

        writeln!(writer)?;
        writer.flush()
    }

    /// Appends the report to the file at `path`, creating it if needed
    pub fn write_path(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_to(BufWriter::new(file))
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, OperationStats>> {
        self.operations.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Formats as `<minutes>m <seconds>s <millis>ms`
fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!(
        "{}m {}s {}ms",
        total_secs / 60,
        total_secs % 60,
        duration.subsec_millis()
    )
}
