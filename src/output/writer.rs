//! JSON persistence of crawl results

use crate::crawler::CrawlResult;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a [`CrawlResult`] as pretty-printed JSON
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use word_ripple::crawler::CrawlResult;
/// use word_ripple::output::CrawlResultWriter;
///
/// let result = CrawlResult::new(vec![("dog".to_string(), 4)], 2);
/// CrawlResultWriter::new(&result).write_path(Path::new("results.json")).unwrap();
/// ```
pub struct CrawlResultWriter<'a> {
    result: &'a CrawlResult,
}

impl<'a> CrawlResultWriter<'a> {
    /// Creates a writer for `result`
    pub fn new(result: &'a CrawlResult) -> Self {
        Self { result }
    }

    /// Appends the result to the file at `path`
    ///
    /// An existing file is never truncated; the new result is added after its
    /// current content.
    pub fn write_path(&self, path: &Path) -> crate::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_to(BufWriter::new(file))
    }

    /// Writes the result, followed by a newline, to `writer`
    pub fn write_to<W: Write>(&self, mut writer: W) -> crate::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self.result)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CrawlResult {
        CrawlResult::new(vec![("dog".to_string(), 4), ("cat".to_string(), 2)], 2)
    }

    #[test]
    fn test_write_to_pretty_json() {
        let mut buffer = Vec::new();
        CrawlResultWriter::new(&sample())
            .write_to(&mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["wordCounts"]["dog"], 4);
        assert_eq!(value["wordCounts"]["cat"], 2);
        assert_eq!(value["urlsVisited"], 2);

        // Popularity order survives serialization
        assert!(text.find("\"dog\"").unwrap() < text.find("\"cat\"").unwrap());
    }

    #[test]
    fn test_write_path_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        CrawlResultWriter::new(&sample()).write_path(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["urlsVisited"], 2);
    }

    #[test]
    fn test_write_path_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, "existing data\n").unwrap();

        CrawlResultWriter::new(&sample()).write_path(&path).unwrap();
        CrawlResultWriter::new(&CrawlResult::default())
            .write_path(&path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("existing data\n"));
        assert_eq!(content.matches("\"urlsVisited\"").count(), 2);
    }
}
