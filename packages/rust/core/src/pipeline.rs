//! End-to-end `update` pipeline: resolve -> probe -> discover -> fetch.
//!
//! The run is a small state machine. Discovery always drains completely
//! before the Fetch Stage is built, and the fetch loop is the only writer of
//! the knowledge base for the duration of the run.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use wikisync_crawler::{FetchOutcome, WorkerPool, run_fetch_stage};
use wikisync_discovery::{check_connectivity, run_discovery_stage};
use wikisync_shared::{
    AppConfig, DiscoveryTask, ProgressReporter, Result, SyncEvent, SyncState, TopicConfig,
    WikiSyncError,
};

use crate::context::SyncContext;
use crate::resolve::resolve_topics;

/// Orchestrator states. `Done` and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Resolving,
    ConnectivityCheck,
    Discovering,
    Fetching,
    Done,
    Aborted,
}

/// Summary of a run that reached `Done`.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Names of the topics that were synced.
    pub topics: Vec<String>,
    /// Stage counters at the end of the run.
    pub state: SyncState,
    /// Entries whose fetch failed and stay absent until the next run.
    pub failed: usize,
    /// Wall-clock duration.
    pub elapsed: Duration,
}

impl SyncReport {
    /// Discovery found nothing new.
    pub fn is_up_to_date(&self) -> bool {
        self.state.total_discovered == 0
    }
}

/// A run that ended `Aborted`, with the phase it was in when it failed.
#[derive(Debug, thiserror::Error)]
#[error("sync aborted during {phase:?}")]
pub struct SyncAborted {
    /// Phase that was active when the error occurred.
    pub phase: SyncPhase,
    #[source]
    pub source: WikiSyncError,
}

struct PhaseTracker {
    phase: SyncPhase,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            phase: SyncPhase::Idle,
        }
    }

    fn advance(&mut self, next: SyncPhase) {
        debug!(from = ?self.phase, to = ?next, "phase transition");
        self.phase = next;
    }
}

/// Run one sync.
///
/// Unknown topics and an unreachable host are reported as events and returned
/// as errors before the store is read. Per-entry failures never surface here;
/// they are counted in [`SyncReport::failed`]. A store read or write failure
/// aborts the run. Every abort carries the phase it happened in.
#[instrument(skip_all, fields(topic = ?ctx.request.topic, force = ctx.request.force, fast = ctx.request.fast))]
pub async fn run_sync(
    ctx: &SyncContext,
    progress: &dyn ProgressReporter,
) -> std::result::Result<SyncReport, SyncAborted> {
    let start = Instant::now();
    let mut tracker = PhaseTracker::new();

    info!("starting sync");

    match drive(ctx, progress, &mut tracker).await {
        Ok((topics, state, outcome)) => {
            tracker.advance(SyncPhase::Done);
            let report = SyncReport {
                topics,
                state,
                failed: outcome.failed,
                elapsed: start.elapsed(),
            };
            info!(
                new_entries = report.state.total_fetched,
                failed = report.failed,
                elapsed_ms = report.elapsed.as_millis(),
                "sync complete"
            );
            Ok(report)
        }
        Err(source) => {
            let phase = tracker.phase;
            warn!(?phase, error = %source, "sync aborted");
            tracker.advance(SyncPhase::Aborted);
            Err(SyncAborted { phase, source })
        }
    }
}

async fn drive(
    ctx: &SyncContext,
    progress: &dyn ProgressReporter,
    tracker: &mut PhaseTracker,
) -> Result<(Vec<String>, SyncState, FetchOutcome)> {
    // --- Resolving ---
    tracker.advance(SyncPhase::Resolving);
    let topics = resolve_topics(&ctx.config.topics, ctx.request.topic.as_deref()).inspect_err(
        |e| {
            if let WikiSyncError::UnknownTopic {
                requested,
                available,
            } = e
            {
                progress.report(&SyncEvent::UnknownTopic {
                    requested: requested.clone(),
                    available: available.clone(),
                });
            }
        },
    )?;
    let names: Vec<String> = topics.iter().map(|t| t.name.clone()).collect();

    // --- ConnectivityCheck ---
    tracker.advance(SyncPhase::ConnectivityCheck);
    let host = ctx.config.check_host()?;
    check_connectivity(ctx.probe.as_ref(), &host)
        .await
        .inspect_err(|_| {
            progress.report(&SyncEvent::Connectivity { host: host.clone() });
        })?;

    // --- Discovering ---
    tracker.advance(SyncPhase::Discovering);
    let mut kb = ctx.store.load().await?;
    if ctx.request.force {
        for topic in &topics {
            info!(topic = %topic.name, cached = kb.entry_count(&topic.name), "force: ignoring cached entries");
            kb.clear_topic(&topic.name);
        }
    }

    let base_url = ctx.config.base_url()?;
    let discovery_tasks = build_discovery_tasks(&ctx.config, &topics)?;
    let concurrency = ctx.config.concurrency(ctx.request.fast);
    let mut state = SyncState::default();

    let detail_tasks = run_discovery_stage(
        discovery_tasks,
        ctx.source.clone(),
        &WorkerPool::new(concurrency),
        &kb,
        &base_url,
        progress,
        &mut state,
    )
    .await?;

    progress.report(&SyncEvent::DiscoveryComplete {
        total_new: detail_tasks.len(),
    });

    if detail_tasks.is_empty() {
        info!("nothing new, knowledge base is up to date");
        progress.report(&SyncEvent::SyncUpToDate);
        return Ok((names, state, FetchOutcome::default()));
    }

    // --- Fetching ---
    tracker.advance(SyncPhase::Fetching);
    let outcome = run_fetch_stage(
        detail_tasks,
        ctx.source.clone(),
        &WorkerPool::new(concurrency),
        &mut kb,
        &ctx.store,
        progress,
        &mut state,
    )
    .await?;

    progress.report(&SyncEvent::SyncComplete {
        total_new_items: state.total_fetched,
    });

    Ok((names, state, outcome))
}

/// One discovery task per configured source of each selected topic.
fn build_discovery_tasks(config: &AppConfig, topics: &[TopicConfig]) -> Result<Vec<DiscoveryTask>> {
    let mut tasks = Vec::new();
    for topic in topics {
        for source in &topic.sources {
            tasks.push(DiscoveryTask {
                topic: topic.name.clone(),
                source_url: config.index_url(source)?,
            });
        }
    }
    Ok(tasks)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use url::Url;
    use uuid::Uuid;
    use wikisync_crawler::HttpSource;
    use wikisync_discovery::ConnectivityProbe;
    use wikisync_shared::{DocNode, DocumentSource, IndexLink, KnowledgeBase};
    use wikisync_storage::Store;

    use crate::context::SyncRequest;

    // -- fakes --------------------------------------------------------------

    /// In-memory wiki. Index pages are keyed by source fragment, entries by
    /// slug; anything unregistered fails like a 404.
    #[derive(Default)]
    struct FakeSource {
        indexes: HashMap<String, (Vec<IndexLink>, Duration)>,
        entries: HashMap<String, DocNode>,
        log: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn index(self, source: &str, links: &[(&str, &str)]) -> Self {
            self.slow_index(source, links, Duration::ZERO)
        }

        fn slow_index(mut self, source: &str, links: &[(&str, &str)], delay: Duration) -> Self {
            let links = links
                .iter()
                .map(|(label, slug)| IndexLink {
                    label: label.to_string(),
                    href: format!("entry/{slug}.html"),
                })
                .collect();
            self.indexes
                .insert(format!("/index.php/{source}.html"), (links, delay));
            self
        }

        fn entry(mut self, slug: &str, text: &str) -> Self {
            let node = DocNode::element("div", vec![DocNode::element("p", vec![DocNode::text(text)])]);
            self.entries.insert(format!("/entry/{slug}.html"), node);
            self
        }

        fn log(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }

        fn entry_calls(&self) -> Vec<String> {
            self.log()
                .into_iter()
                .filter(|l| l.starts_with("entry:"))
                .collect()
        }
    }

    #[async_trait]
    impl DocumentSource for FakeSource {
        async fn fetch_index(&self, url: &Url) -> wikisync_shared::Result<Vec<IndexLink>> {
            self.log.lock().unwrap().push(format!("index:{}", url.path()));
            let found = self.indexes.get(url.path()).cloned();
            if let Some((_, delay)) = &found {
                tokio::time::sleep(*delay).await;
            }
            self.log
                .lock()
                .unwrap()
                .push(format!("index-done:{}", url.path()));
            found
                .map(|(links, _)| links)
                .ok_or_else(|| WikiSyncError::Network(format!("{url}: HTTP 404")))
        }

        async fn fetch_entry(&self, url: &Url) -> wikisync_shared::Result<DocNode> {
            self.log.lock().unwrap().push(format!("entry:{}", url.path()));
            self.entries
                .get(url.path())
                .cloned()
                .ok_or_else(|| WikiSyncError::Network(format!("{url}: HTTP 404")))
        }
    }

    struct FakeProbe {
        reachable: bool,
        calls: AtomicUsize,
    }

    impl FakeProbe {
        fn new(reachable: bool) -> Arc<Self> {
            Arc::new(Self {
                reachable,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ConnectivityProbe for FakeProbe {
        async fn probe(&self, host: &str) -> wikisync_shared::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.reachable {
                Ok(())
            } else {
                Err(WikiSyncError::Connectivity {
                    host: host.to_string(),
                })
            }
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<SyncEvent>>,
    }

    impl RecordingProgress {
        fn events(&self) -> Vec<SyncEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressReporter for RecordingProgress {
        fn report(&self, event: &SyncEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    // -- helpers ------------------------------------------------------------

    fn test_config(base_url: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.remote.base_url = base_url.into();
        config.remote.check_host = Some("wiki.test".into());
        config.topics = vec![
            TopicConfig::new("weapons", &["waffen"]),
            TopicConfig::new("spells", &["zauber_a", "zauber_b"]),
        ];
        config
    }

    fn temp_data_file() -> PathBuf {
        std::env::temp_dir()
            .join(format!("wikisync-sync-{}", Uuid::now_v7()))
            .join("data.json")
    }

    fn remove_temp(data_file: &Path) {
        if let Some(dir) = data_file.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    fn request(topic: Option<&str>, force: bool, fast: bool) -> SyncRequest {
        SyncRequest {
            topic: topic.map(str::to_string),
            force,
            fast,
        }
    }

    fn context(
        source: &Arc<FakeSource>,
        probe: &Arc<FakeProbe>,
        data_file: &Path,
        request: SyncRequest,
    ) -> SyncContext {
        SyncContext::from_parts(
            test_config("http://wiki.test/"),
            request,
            source.clone(),
            probe.clone(),
            Store::new(data_file),
        )
    }

    async fn seed(data_file: &Path, entries: &[(&str, &str, &str)]) {
        let mut kb = KnowledgeBase::new();
        for (topic, name, content) in entries {
            kb.insert(topic, name, content.to_string());
        }
        Store::new(data_file).save(&kb).await.unwrap();
    }

    async fn stored(data_file: &Path) -> KnowledgeBase {
        Store::new(data_file).load().await.unwrap()
    }

    fn armory() -> FakeSource {
        FakeSource::default()
            .index("waffen", &[("Sword", "sword"), ("Axe", "axe")])
            .index("zauber_a", &[])
            .index("zauber_b", &[])
            .entry("sword", "Sharp.")
            .entry("axe", "Heavy.")
    }

    // -- properties ---------------------------------------------------------

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let data_file = temp_data_file();
        let source = Arc::new(armory());
        let probe = FakeProbe::new(true);

        let first = run_sync(&context(&source, &probe, &data_file, request(None, false, false)), &RecordingProgress::default())
            .await
            .unwrap();
        assert_eq!(first.state.total_fetched, 2);
        let before = std::fs::read(&data_file).unwrap();

        let progress = RecordingProgress::default();
        let second = run_sync(&context(&source, &probe, &data_file, request(None, false, false)), &progress)
            .await
            .unwrap();

        assert!(second.is_up_to_date());
        assert_eq!(source.entry_calls().len(), 2);
        assert_eq!(std::fs::read(&data_file).unwrap(), before);
        assert_eq!(progress.events().last(), Some(&SyncEvent::SyncUpToDate));

        remove_temp(&data_file);
    }

    #[tokio::test]
    async fn stored_entries_are_not_refetched() {
        let data_file = temp_data_file();
        seed(&data_file, &[("weapons", "Sword", "...")]).await;
        let source = Arc::new(armory());

        let report = run_sync(
            &context(&source, &FakeProbe::new(true), &data_file, request(Some("weapons"), false, false)),
            &RecordingProgress::default(),
        )
        .await
        .unwrap();

        assert_eq!(report.state.total_discovered, 1);
        assert_eq!(source.entry_calls(), vec!["entry:/entry/axe.html"]);
        let kb = stored(&data_file).await;
        assert_eq!(kb.get("weapons", "Sword"), Some("..."));
        assert_eq!(kb.get("weapons", "Axe"), Some("__Heavy."));

        remove_temp(&data_file);
    }

    #[tokio::test]
    async fn force_refetches_only_selected_topic() {
        let data_file = temp_data_file();
        seed(
            &data_file,
            &[("weapons", "Sword", "..."), ("spells", "Ignifaxus", "hot")],
        )
        .await;
        let source = Arc::new(armory());

        let report = run_sync(
            &context(&source, &FakeProbe::new(true), &data_file, request(Some("weapons"), true, false)),
            &RecordingProgress::default(),
        )
        .await
        .unwrap();

        assert_eq!(report.state.total_discovered, 2);
        let kb = stored(&data_file).await;
        assert_eq!(kb.get("weapons", "Sword"), Some("__Sharp."));
        assert_eq!(kb.get("weapons", "Axe"), Some("__Heavy."));
        assert_eq!(kb.get("spells", "Ignifaxus"), Some("hot"));

        remove_temp(&data_file);
    }

    #[tokio::test]
    async fn entries_are_stored_under_canonical_names() {
        let data_file = temp_data_file();
        let source = Arc::new(
            FakeSource::default()
                .index("zauber_a", &[("Ignifaxus I-III", "ignifaxus"), ("Fulminictus (*)", "fulminictus")])
                .index("zauber_b", &[("Ignifaxus", "ignifaxus")])
                .entry("ignifaxus", "Fire.")
                .entry("fulminictus", "Bolt."),
        );

        run_sync(
            &context(&source, &FakeProbe::new(true), &data_file, request(Some("spells"), false, false)),
            &RecordingProgress::default(),
        )
        .await
        .unwrap();

        let kb = stored(&data_file).await;
        let names: Vec<_> = kb.topic("spells").unwrap().keys().cloned().collect();
        assert_eq!(names, vec!["Fulminictus", "Ignifaxus"]);
        assert_eq!(source.entry_calls().len(), 2);

        remove_temp(&data_file);
    }

    #[tokio::test]
    async fn unreachable_host_touches_nothing() {
        let data_file = temp_data_file();
        seed(&data_file, &[("weapons", "Sword", "...")]).await;
        let before = std::fs::read(&data_file).unwrap();
        let source = Arc::new(armory());
        let progress = RecordingProgress::default();

        let err = run_sync(
            &context(&source, &FakeProbe::new(false), &data_file, request(None, true, false)),
            &progress,
        )
        .await
        .unwrap_err();

        assert!(matches!(err.source, WikiSyncError::Connectivity { .. }));
        assert_eq!(err.phase, SyncPhase::ConnectivityCheck);
        assert!(source.log().is_empty());
        assert_eq!(std::fs::read(&data_file).unwrap(), before);
        assert_eq!(
            progress.events(),
            vec![SyncEvent::Connectivity {
                host: "wiki.test".into()
            }]
        );

        remove_temp(&data_file);
    }

    #[tokio::test]
    async fn unknown_topic_stops_before_probe() {
        let data_file = temp_data_file();
        let source = Arc::new(armory());
        let probe = FakeProbe::new(true);
        let progress = RecordingProgress::default();

        let err = run_sync(
            &context(&source, &probe, &data_file, request(Some("armor"), false, false)),
            &progress,
        )
        .await
        .unwrap_err();

        assert!(matches!(err.source, WikiSyncError::UnknownTopic { .. }));
        assert_eq!(err.phase, SyncPhase::Resolving);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
        assert!(source.log().is_empty());
        assert!(!data_file.exists());
        assert_eq!(
            progress.events(),
            vec![SyncEvent::UnknownTopic {
                requested: "armor".into(),
                available: vec!["weapons".into(), "spells".into()],
            }]
        );

        remove_temp(&data_file);
    }

    #[tokio::test]
    async fn unreadable_store_aborts_while_discovering() {
        let data_file = temp_data_file();
        std::fs::create_dir_all(data_file.parent().unwrap()).unwrap();
        std::fs::write(&data_file, "{ not json").unwrap();
        let source = Arc::new(armory());

        let err = run_sync(
            &context(&source, &FakeProbe::new(true), &data_file, request(None, false, false)),
            &RecordingProgress::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.phase, SyncPhase::Discovering);
        assert!(matches!(err.source, WikiSyncError::Storage(_)));
        assert!(source.log().is_empty());
        assert_eq!(std::fs::read_to_string(&data_file).unwrap(), "{ not json");

        remove_temp(&data_file);
    }

    #[tokio::test]
    async fn failed_entry_is_retried_next_run() {
        let data_file = temp_data_file();
        let flaky = Arc::new(
            FakeSource::default()
                .index("waffen", &[("Sword", "sword"), ("Axe", "axe"), ("Mace", "mace")])
                .entry("sword", "Sharp.")
                .entry("mace", "Blunt."),
        );

        let first = run_sync(
            &context(&flaky, &FakeProbe::new(true), &data_file, request(Some("weapons"), false, false)),
            &RecordingProgress::default(),
        )
        .await
        .unwrap();

        assert_eq!(first.state.total_fetched, 2);
        assert_eq!(first.failed, 1);
        let kb = stored(&data_file).await;
        assert!(kb.contains("weapons", "Sword"));
        assert!(kb.contains("weapons", "Mace"));
        assert!(!kb.contains("weapons", "Axe"));

        let healed = Arc::new(
            FakeSource::default()
                .index("waffen", &[("Sword", "sword"), ("Axe", "axe"), ("Mace", "mace")])
                .entry("sword", "Sharp.")
                .entry("axe", "Heavy.")
                .entry("mace", "Blunt."),
        );
        run_sync(
            &context(&healed, &FakeProbe::new(true), &data_file, request(Some("weapons"), false, false)),
            &RecordingProgress::default(),
        )
        .await
        .unwrap();

        assert_eq!(healed.entry_calls(), vec!["entry:/entry/axe.html"]);
        assert_eq!(stored(&data_file).await.entry_count("weapons"), 3);

        remove_temp(&data_file);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn fetch_waits_for_discovery_to_drain() {
        let data_file = temp_data_file();
        let source = Arc::new(
            FakeSource::default()
                .slow_index("waffen", &[("Sword", "sword")], Duration::from_millis(80))
                .index("zauber_a", &[("Ignifaxus", "ignifaxus")])
                .slow_index("zauber_b", &[("Fulminictus", "fulminictus")], Duration::from_millis(40))
                .entry("sword", "Sharp.")
                .entry("ignifaxus", "Fire.")
                .entry("fulminictus", "Bolt."),
        );
        let progress = RecordingProgress::default();

        let report = run_sync(
            &context(&source, &FakeProbe::new(true), &data_file, request(None, false, true)),
            &progress,
        )
        .await
        .unwrap();
        assert_eq!(report.state.total_fetched, 3);

        let log = source.log();
        let last_index = log.iter().rposition(|l| l.starts_with("index-done:")).unwrap();
        let first_entry = log.iter().position(|l| l.starts_with("entry:")).unwrap();
        assert!(last_index < first_entry, "entry fetched before discovery drained: {log:?}");

        let events = progress.events();
        let complete = events
            .iter()
            .position(|e| matches!(e, SyncEvent::DiscoveryComplete { .. }))
            .unwrap();
        assert!(events[..complete]
            .iter()
            .all(|e| matches!(e, SyncEvent::DiscoveryProgress { .. })));

        remove_temp(&data_file);
    }

    #[tokio::test]
    async fn events_follow_pipeline_order() {
        let data_file = temp_data_file();
        let source = Arc::new(armory());
        let progress = RecordingProgress::default();

        run_sync(
            &context(&source, &FakeProbe::new(true), &data_file, request(Some("Weapons"), false, false)),
            &progress,
        )
        .await
        .unwrap();

        let events = progress.events();
        assert_eq!(events.len(), 5);
        assert_eq!(
            events[0],
            SyncEvent::DiscoveryProgress {
                topic: "weapons".into(),
                newly_found: 2,
                total_processed: 1,
                total_to_process: 1,
            }
        );
        assert_eq!(events[1], SyncEvent::DiscoveryComplete { total_new: 2 });
        let completed: Vec<_> = events[2..4]
            .iter()
            .map(|e| match e {
                SyncEvent::FetchProgress {
                    completed, total, ..
                } => (*completed, *total),
                other => panic!("expected fetch progress, got {other:?}"),
            })
            .collect();
        assert_eq!(completed, vec![(1, 2), (2, 2)]);
        assert_eq!(events[4], SyncEvent::SyncComplete { total_new_items: 2 });

        remove_temp(&data_file);
    }

    #[tokio::test]
    async fn syncs_a_wiki_over_http() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        let index = r#"<html><body><table>
            <tr><td><a href="/index.php/W_Schwert.html">Schwert</a></td></tr>
            <tr><td><a href="/index.php/W_Axt.html">Axt I-II</a></td></tr>
        </table></body></html>"#;
        let entry = |title: &str, text: &str| {
            format!(
                r#"<html><body><div id="main"><div class="ce_text"><h1>{title}</h1><p>{text}</p></div></div></body></html>"#
            )
        };

        Mock::given(method("GET"))
            .and(path("/index.php/waffen.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(index))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/index.php/W_Schwert.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(entry("Schwert", "Scharf.")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/index.php/W_Axt.html"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = test_config(&format!("{}/", server.uri()));
        let source = HttpSource::new(&config.selectors, Duration::from_secs(5)).unwrap();
        let data_file = temp_data_file();
        let ctx = SyncContext::from_parts(
            config,
            request(Some("weapons"), false, false),
            Arc::new(source),
            FakeProbe::new(true),
            Store::new(&data_file),
        );

        let report = run_sync(&ctx, &RecordingProgress::default()).await.unwrap();

        assert_eq!(report.topics, vec!["weapons"]);
        assert_eq!(report.state.total_discovered, 2);
        assert_eq!(report.failed, 1);
        let kb = stored(&data_file).await;
        assert_eq!(kb.get("weapons", "Schwert"), Some("++Schwert++____Scharf."));
        assert!(!kb.contains("weapons", "Axt"));

        remove_temp(&data_file);
    }
}
