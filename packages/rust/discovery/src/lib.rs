//! Connectivity preflight and the Discovery Stage.
//!
//! Before anything is fetched, the [`gate`] confirms the remote host resolves.
//! The Discovery Stage then scans every configured index document and turns
//! entries missing from the local knowledge base into [`DetailTask`]s.

pub mod gate;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use url::Url;

use wikisync_crawler::WorkerPool;
use wikisync_markup::canonicalize_name;
use wikisync_shared::{
    DetailTask, DiscoveryTask, DocumentSource, IndexLink, KnowledgeBase, ProgressReporter, Result,
    SyncEvent, SyncState,
};

pub use gate::{ConnectivityProbe, DnsProbe, check_connectivity};

// ---------------------------------------------------------------------------
// Discovery Stage
// ---------------------------------------------------------------------------

/// Scan every index document and return the entries still to fetch.
///
/// `kb` is the pre-run snapshot (already force-cleared where requested);
/// the stage only reads it. Per-index failures are logged and skipped; an
/// error classified as fatal ends the stage. The returned list is complete:
/// the stage has drained when this resolves.
#[instrument(skip_all, fields(tasks = tasks.len(), concurrency = pool.concurrency()))]
pub async fn run_discovery_stage(
    tasks: Vec<DiscoveryTask>,
    source: Arc<dyn DocumentSource>,
    pool: &WorkerPool,
    kb: &KnowledgeBase,
    base_url: &Url,
    progress: &dyn ProgressReporter,
    state: &mut SyncState,
) -> Result<Vec<DetailTask>> {
    let total = tasks.len();
    let mut known: HashMap<String, HashSet<String>> = HashMap::new();
    let mut detail_tasks = Vec::new();

    info!(total, "starting discovery stage");

    let mut results = pool.run(tasks, move |task: DiscoveryTask| {
        let source = source.clone();
        async move {
            let links = source.fetch_index(&task.source_url).await;
            (task, links)
        }
    });

    while let Some((task, links)) = results.recv().await {
        state.discovered_count += 1;

        match links {
            Ok(links) => {
                let names = known
                    .entry(task.topic.to_lowercase())
                    .or_insert_with(|| kb.known_names(&task.topic));
                let found = select_new_entries(&task.topic, links, base_url, names);

                debug!(
                    topic = %task.topic,
                    url = %task.source_url,
                    new = found.len(),
                    "index scanned"
                );
                state.total_discovered += found.len();
                detail_tasks.extend(found);
            }
            Err(e) if e.is_fatal() => {
                warn!(
                    topic = %task.topic,
                    url = %task.source_url,
                    error = %e,
                    "fatal error while scanning index, aborting stage"
                );
                return Err(e);
            }
            Err(e) => {
                warn!(
                    topic = %task.topic,
                    url = %task.source_url,
                    error = %e,
                    "index fetch failed, skipping"
                );
            }
        }

        progress.report(&SyncEvent::DiscoveryProgress {
            topic: task.topic,
            newly_found: state.total_discovered,
            total_processed: state.discovered_count,
            total_to_process: total,
        });
    }

    info!(new_entries = detail_tasks.len(), "discovery stage drained");
    Ok(detail_tasks)
}

/// Canonicalize each link and keep those not already in `known`.
///
/// `known` holds lowercased canonical names and is updated, so the same
/// entry listed on two index pages of a topic yields one task.
pub fn select_new_entries(
    topic: &str,
    links: Vec<IndexLink>,
    base_url: &Url,
    known: &mut HashSet<String>,
) -> Vec<DetailTask> {
    let mut tasks = Vec::new();

    for link in links {
        let name = canonicalize_name(&link.label);
        if name.is_empty() || known.contains(&name.to_lowercase()) {
            continue;
        }

        let detail_url = match base_url.join(&link.href) {
            Ok(url) => url,
            Err(e) => {
                warn!(topic, href = %link.href, error = %e, "unusable entry link, skipping");
                continue;
            }
        };

        known.insert(name.to_lowercase());
        tasks.push(DetailTask {
            topic: topic.to_string(),
            canonical_name: name,
            detail_url,
        });
    }

    tasks
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
