//! Bounded worker pool
//!
//! A fixed number of threads pull tasks from a shared queue. Every submitted
//! task produces exactly one outcome on the result stream, in completion
//! order. A panicking task yields [`PoolError::TaskPanicked`] and the worker
//! keeps serving the queue.
//!
//! Completion handshake: [`WorkerPool::close`] drops the task sender, workers
//! drain the queue and exit, and the result stream disconnects once the last
//! worker has dropped its sender. Consumers iterate the stream until it ends.

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread::{self, JoinHandle};
use thiserror::Error;

type Task<T> = Box<dyn FnOnce() -> T + Send + 'static>;

/// Outcome of one submitted task
pub type TaskOutcome<T> = Result<T, PoolError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Worker pool is closed")]
    Closed,

    #[error("Task panicked on worker {worker}: {message}")]
    TaskPanicked { worker: usize, message: String },

    #[error("Worker thread {worker} could not be spawned: {reason}")]
    Spawn { worker: usize, reason: String },
}

/// A fixed-size set of worker threads consuming a shared task queue
pub struct WorkerPool<T: Send + 'static> {
    tasks: Option<Sender<Task<T>>>,
    results: Receiver<TaskOutcome<T>>,
    workers: Vec<JoinHandle<()>>,
    submitted: usize,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Spawn `size` workers. A size of zero is raised to one.
    pub fn new(size: usize) -> Result<Self, PoolError> {
        let size = size.max(1);
        let (task_tx, task_rx) = unbounded::<Task<T>>();
        let (result_tx, result_rx) = unbounded::<TaskOutcome<T>>();

        let mut workers = Vec::with_capacity(size);
        for worker in 0..size {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("ifacegen-worker-{worker}"))
                .spawn(move || run_worker(worker, task_rx, result_tx))
                .map_err(|e| PoolError::Spawn {
                    worker,
                    reason: e.to_string(),
                })?;
            workers.push(handle);
        }
        // Only workers hold result senders from here on
        drop(result_tx);

        tracing::debug!("worker pool started with {size} workers");

        Ok(Self {
            tasks: Some(task_tx),
            results: result_rx,
            workers,
            submitted: 0,
        })
    }

    /// Number of worker threads
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Number of tasks accepted so far
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Queue a task. Fails once the pool has been closed.
    pub fn submit<F>(&mut self, task: F) -> Result<(), PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let sender = self.tasks.as_ref().ok_or(PoolError::Closed)?;
        sender
            .send(Box::new(task))
            .map_err(|_| PoolError::Closed)?;
        self.submitted += 1;
        Ok(())
    }

    /// Stop accepting tasks and let workers drain the queue
    pub fn close(&mut self) {
        self.tasks.take();
    }

    pub fn is_closed(&self) -> bool {
        self.tasks.is_none()
    }

    /// Result stream, one outcome per task in completion order.
    ///
    /// Iteration ends after the pool is closed and every task has reported.
    pub fn results(&self) -> Receiver<TaskOutcome<T>> {
        self.results.clone()
    }

    /// Close the pool and block until every worker has exited.
    ///
    /// When this returns, every outcome has been sent to the result stream.
    pub fn wait(mut self) {
        self.close();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                tracing::error!("worker thread terminated abnormally");
            }
        }
    }
}

impl<T: Send + 'static> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        self.close();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

fn run_worker<T>(worker: usize, tasks: Receiver<Task<T>>, results: Sender<TaskOutcome<T>>) {
    for task in tasks.iter() {
        let outcome = catch_unwind(AssertUnwindSafe(task)).map_err(|payload| {
            PoolError::TaskPanicked {
                worker,
                message: panic_message(payload.as_ref()),
            }
        });
        if results.send(outcome).is_err() {
            // Consumer is gone; the outcome is dropped
            tracing::trace!("worker {worker} dropped an outcome with no consumer");
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
