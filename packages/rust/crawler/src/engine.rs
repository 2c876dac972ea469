//! Bounded worker pool shared by the discovery and fetch stages.
//!
//! Each stage builds its own pool. A pool spawns one task per item, lets at
//! most `concurrency` of them run at once, and streams results back in
//! completion order. The result channel closes once every task finished,
//! which is how a stage knows it has drained.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::debug;

/// Concurrency-capped task runner. No delay between dispatches.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    concurrency: usize,
}

impl WorkerPool {
    /// Create a pool running at most `concurrency` tasks at a time (minimum 1).
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    /// The effective concurrency cap.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Run `work` over every item.
    ///
    /// Results arrive on the returned receiver as tasks complete; `recv()`
    /// yields `None` once all of them are done. Must be called from within a
    /// tokio runtime.
    pub fn run<T, R, F, Fut>(&self, items: Vec<T>, work: F) -> mpsc::UnboundedReceiver<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let work = Arc::new(work);

        debug!(
            tasks = items.len(),
            concurrency = self.concurrency,
            "dispatching tasks"
        );

        for item in items {
            let tx = tx.clone();
            let sem = semaphore.clone();
            let work = work.clone();

            tokio::spawn(async move {
                let Ok(_permit) = sem.acquire_owned().await else {
                    return;
                };
                let result = work(item).await;
                // Receiver gone means the stage aborted; nothing left to report to.
                let _ = tx.send(result);
            });
        }

        rx
    }
}
