//! Statistics for extraction runs

use std::time::{Duration, Instant};

/// Statistics collected during one extraction
#[derive(Debug, Default, Clone)]
pub struct ExtractStats {
    /// Number of eligible files found below the root
    pub files_discovered: usize,

    /// Number of files scanned without error
    pub files_scanned: usize,

    /// Number of files that failed to scan
    pub files_failed: usize,

    /// Total number of signatures extracted
    pub signatures_found: usize,

    /// Worker count used for the run
    pub pool_size: usize,

    /// Time elapsed during extraction
    pub elapsed: Duration,

    start_time: Option<Instant>,
}

impl ExtractStats {
    /// Create new stats and start timing
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Stop timing and record elapsed time
    pub fn stop_timing(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed = start.elapsed();
        }
    }

    /// One-line summary used for logging
    pub fn summary(&self) -> String {
        format!(
            "{} signatures from {}/{} files ({} failed) in {:.2}s",
            self.signatures_found,
            self.files_scanned,
            self.files_discovered,
            self.files_failed,
            self.elapsed.as_secs_f64()
        )
    }

    /// Display the statistics on stderr; stdout may carry the generated code
    pub fn display(&self) {
        eprintln!("\nExtraction Complete:");
        eprintln!("  Files discovered: {}", self.files_discovered);
        eprintln!("  Files scanned: {}", self.files_scanned);
        eprintln!("  Files failed: {}", self.files_failed);
        eprintln!("  Signatures found: {}", self.signatures_found);
        eprintln!("  Workers: {}", self.pool_size);
        eprintln!("  Time elapsed: {:.2}s", self.elapsed.as_secs_f64());

        let secs = self.elapsed.as_secs_f64();
        if self.files_scanned > 0 && secs > 0.0 {
            let files_per_sec = self.files_scanned as f64 / secs;
            eprintln!("  Performance: {files_per_sec:.0} files/second");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_display() {
        let mut stats = ExtractStats::new();
        stats.files_discovered = 12;
        stats.files_scanned = 10;
        stats.files_failed = 2;
        stats.signatures_found = 40;
        stats.elapsed = Duration::from_millis(250);

        // Should not panic
        stats.display();
        assert_eq!(
            stats.summary(),
            "40 signatures from 10/12 files (2 failed) in 0.25s"
        );
    }

    #[test]
    fn test_stop_timing_is_idempotent() {
        let mut stats = ExtractStats::new();
        stats.stop_timing();
        let first = stats.elapsed;
        stats.stop_timing();
        assert_eq!(stats.elapsed, first);
    }
}
