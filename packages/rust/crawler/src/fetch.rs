//! Fetch Stage: entry documents -> normalized, persisted content.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use wikisync_shared::{
    DetailTask, DocumentSource, KnowledgeBase, ProgressReporter, Result, SyncEvent, SyncState,
};
use wikisync_storage::Store;

use crate::engine::WorkerPool;

/// Counts for one Fetch Stage run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Entries written to the knowledge base and persisted.
    pub persisted: usize,
    /// Entries whose fetch or parse failed; left absent for the next run.
    pub failed: usize,
}

/// Fetch every task, merge successes into `kb`, and persist after each one.
///
/// Network work runs concurrently on `pool`; merging and saving happen here,
/// one completion at a time, so every save captures a superset of the
/// previous one. Item failures are logged and skipped. A failed save ends
/// the stage with an error, as does any source error that
/// [`wikisync_shared::WikiSyncError::is_fatal`] classifies as fatal.
#[instrument(skip_all, fields(tasks = tasks.len(), concurrency = pool.concurrency()))]
pub async fn run_fetch_stage(
    tasks: Vec<DetailTask>,
    source: Arc<dyn DocumentSource>,
    pool: &WorkerPool,
    kb: &mut KnowledgeBase,
    store: &Store,
    progress: &dyn ProgressReporter,
    state: &mut SyncState,
) -> Result<FetchOutcome> {
    let total = tasks.len();
    let mut outcome = FetchOutcome::default();

    info!(total, "starting fetch stage");

    let mut results = pool.run(tasks, move |task: DetailTask| {
        let source = source.clone();
        async move {
            let content = fetch_one(source.as_ref(), &task).await;
            (task, content)
        }
    });

    while let Some((task, content)) = results.recv().await {
        state.fetched_count += 1;

        match content {
            Ok(content) => {
                kb.insert(&task.topic, &task.canonical_name, content);
                store.save(kb).await?;

                state.total_fetched += 1;
                outcome.persisted += 1;
                debug!(topic = %task.topic, name = %task.canonical_name, "entry persisted");

                progress.report(&SyncEvent::FetchProgress {
                    topic: task.topic,
                    name: task.canonical_name,
                    completed: state.fetched_count,
                    total,
                });
            }
            Err(e) if e.is_fatal() => {
                warn!(
                    topic = %task.topic,
                    name = %task.canonical_name,
                    error = %e,
                    "fatal error while fetching, aborting stage"
                );
                return Err(e);
            }
            Err(e) => {
                outcome.failed += 1;
                warn!(
                    topic = %task.topic,
                    name = %task.canonical_name,
                    url = %task.detail_url,
                    error = %e,
                    "entry fetch failed, leaving gap"
                );
            }
        }
    }

    info!(
        persisted = outcome.persisted,
        failed = outcome.failed,
        "fetch stage drained"
    );

    Ok(outcome)
}

/// Fetch and normalize a single entry.
async fn fetch_one(source: &dyn DocumentSource, task: &DetailTask) -> Result<String> {
    let node = source.fetch_entry(&task.detail_url).await?;
    Ok(wikisync_markup::normalize(&node))
}
