//! Per-invocation state handed to every pipeline stage.

use std::sync::Arc;
use std::time::Duration;

use wikisync_crawler::HttpSource;
use wikisync_discovery::{ConnectivityProbe, DnsProbe};
use wikisync_shared::{AppConfig, DocumentSource, Result};
use wikisync_storage::Store;

/// What the caller asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncRequest {
    /// Topic to sync; `None` syncs the whole catalog.
    pub topic: Option<String>,
    /// Ignore cached entries of the selected topics.
    pub force: bool,
    /// Use the fast concurrency cap.
    pub fast: bool,
}

/// Everything one sync run needs. Built once per invocation, never shared
/// between runs.
pub struct SyncContext {
    pub config: AppConfig,
    pub request: SyncRequest,
    pub source: Arc<dyn DocumentSource>,
    pub probe: Arc<dyn ConnectivityProbe>,
    pub store: Store,
}

impl SyncContext {
    /// Validate `config` and wire up the HTTP source, DNS probe and store.
    pub fn new(config: AppConfig, request: SyncRequest) -> Result<Self> {
        config.validate()?;

        let source = HttpSource::new(
            &config.selectors,
            Duration::from_secs(config.sync.request_timeout_secs),
        )?;
        let probe = DnsProbe::new(Duration::from_secs(config.sync.probe_timeout_secs));
        let store = Store::new(config.data_file()?);

        Ok(Self::from_parts(
            config,
            request,
            Arc::new(source),
            Arc::new(probe),
            store,
        ))
    }

    /// Assemble a context from explicit capabilities.
    pub fn from_parts(
        config: AppConfig,
        request: SyncRequest,
        source: Arc<dyn DocumentSource>,
        probe: Arc<dyn ConnectivityProbe>,
        store: Store,
    ) -> Self {
        Self {
            config,
            request,
            source,
            probe,
            store,
        }
    }
}
