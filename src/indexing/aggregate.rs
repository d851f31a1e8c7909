//! Single-owner aggregation of scan outcomes
//!
//! Workers never touch the merged state. They only emit outcomes onto the
//! pool's result stream; one aggregator thread owns [`AggregateState`] and
//! drains the stream until it disconnects, which happens exactly when the
//! pool has been closed and every worker has exited.

use super::pool::{PoolError, TaskOutcome};
use crate::error::{ExtractError, ExtractResult, MultiError};
use crossbeam_channel::Receiver;
use std::thread::{self, JoinHandle};

/// Result of scanning one file
pub type ScanResult = ExtractResult<Vec<String>>;

/// Merged per-file signatures and errors
#[derive(Debug, Default)]
pub struct AggregateState {
    per_file: Vec<Vec<String>>,
    errors: MultiError,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one task outcome
    pub fn absorb(&mut self, outcome: TaskOutcome<ScanResult>) {
        match outcome {
            Ok(Ok(signatures)) => self.per_file.push(signatures),
            Ok(Err(error)) => {
                tracing::debug!("scan failed: {error}");
                self.errors.push(error);
            }
            Err(PoolError::TaskPanicked { message, .. }) => {
                tracing::debug!("scan task panicked: {message}");
                self.errors.push(ExtractError::WorkerPanicked { message });
            }
            Err(error) => self.errors.push(ExtractError::Pool(error)),
        }
    }

    /// Files whose scan succeeded
    pub fn files_scanned(&self) -> usize {
        self.per_file.len()
    }

    /// Files whose scan failed
    pub fn files_failed(&self) -> usize {
        self.errors.len()
    }

    /// Flatten and sort all signatures; collapse an empty error list to `None`.
    pub fn finish(self) -> (Vec<String>, Option<MultiError>) {
        let total = self.per_file.iter().map(Vec::len).sum();
        let mut signatures = Vec::with_capacity(total);
        for file_signatures in self.per_file {
            signatures.extend(file_signatures);
        }
        signatures.sort();

        (signatures, self.errors.into_error())
    }
}

/// Handle to the thread that owns the [`AggregateState`]
pub struct Aggregator {
    handle: JoinHandle<AggregateState>,
}

impl Aggregator {
    /// Start draining `results` on a dedicated thread
    pub fn spawn(results: Receiver<TaskOutcome<ScanResult>>) -> Self {
        let handle = thread::spawn(move || {
            let mut state = AggregateState::new();
            for outcome in results.iter() {
                state.absorb(outcome);
            }
            state
        });
        Self { handle }
    }

    /// Block until the result stream has disconnected and return the state.
    pub fn join(self) -> AggregateState {
        match self.handle.join() {
            Ok(state) => state,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}
