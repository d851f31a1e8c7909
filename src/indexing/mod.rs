pub mod aggregate;
pub mod extract;
pub mod pool;
pub mod progress;
pub mod walker;

pub use aggregate::{AggregateState, Aggregator, ScanResult};
pub use extract::{Extraction, Extractor, extract};
pub use pool::{PoolError, TaskOutcome, WorkerPool};
pub use progress::ExtractStats;
pub use walker::{FileWalker, SourceFilter};
