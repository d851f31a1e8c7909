//! Extraction entry point
//!
//! Ties the pipeline together:
//!
//! ```text
//! FileWalker::discover → WorkerPool (one scan task per file) → Aggregator → sorted signatures
//! ```
//!
//! Only a bad root or an empty file set abort the run, and both are detected
//! before any worker starts. Per-file failures are returned next to the
//! signatures that were extracted; the caller decides whether partial results
//! are acceptable.

use super::aggregate::{Aggregator, ScanResult};
use super::pool::WorkerPool;
use super::progress::ExtractStats;
use super::walker::{FileWalker, SourceFilter};
use crate::Settings;
use crate::error::{ExtractResult, MultiError};
use crate::parsing::find_methods_in_file;
use std::path::Path;
use std::sync::Arc;

/// Outcome of a full extraction
#[derive(Debug)]
pub struct Extraction {
    /// All signatures, sorted ascending
    pub signatures: Vec<String>,

    /// Per-file failures, `None` when every file was scanned
    pub errors: Option<MultiError>,

    pub stats: ExtractStats,
}

impl Extraction {
    /// True when no file failed
    pub fn is_complete(&self) -> bool {
        self.errors.is_none()
    }

    /// Treat any per-file failure as a failure of the whole run
    pub fn into_result(self) -> Result<Vec<String>, MultiError> {
        match self.errors {
            None => Ok(self.signatures),
            Some(errors) => Err(errors),
        }
    }
}

/// Runs the scan pipeline with a fixed file filter and worker count
#[derive(Debug)]
pub struct Extractor {
    walker: FileWalker,
    pool_size: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Extractor {
    pub fn new(pool_size: usize) -> Self {
        Self {
            walker: FileWalker::default(),
            pool_size,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            walker: FileWalker::new(SourceFilter::from_config(&settings.extraction)),
            pool_size: settings.extraction.effective_pool_size(),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: SourceFilter) -> Self {
        self.walker = FileWalker::new(filter);
        self
    }

    #[must_use]
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Find every exported method of `receiver` in the tree below `root`.
    #[must_use = "The extraction may carry per-file errors that should be checked"]
    pub fn extract(&self, receiver: &str, root: &Path) -> ExtractResult<Extraction> {
        let mut stats = ExtractStats::new();

        let files = self.walker.discover(root)?;
        stats.files_discovered = files.len();

        let mut pool = WorkerPool::<ScanResult>::new(self.pool_size)?;
        stats.pool_size = pool.size();
        let aggregator = Aggregator::spawn(pool.results());

        let receiver: Arc<str> = Arc::from(receiver);
        for path in files {
            let receiver = Arc::clone(&receiver);
            pool.submit(move || {
                tracing::debug!("scanning {}", path.display());
                find_methods_in_file(&path, &receiver)
            })?;
        }

        // Close-then-drain: joining the workers disconnects the result
        // stream, which ends the aggregator's loop.
        pool.wait();
        let state = aggregator.join();

        stats.files_scanned = state.files_scanned();
        stats.files_failed = state.files_failed();
        let (signatures, errors) = state.finish();
        stats.signatures_found = signatures.len();
        stats.stop_timing();

        tracing::info!("{}", stats.summary());

        Ok(Extraction {
            signatures,
            errors,
            stats,
        })
    }
}

/// Extract with the default file filter.
///
/// `pool_size` bounds how many files are opened and scanned at once.
pub fn extract(
    receiver: &str,
    root: impl AsRef<Path>,
    pool_size: usize,
) -> ExtractResult<Extraction> {
    Extractor::new(pool_size).extract(receiver, root.as_ref())
}
