//! Progress events emitted by the sync pipeline, and the sink that receives them.

/// One event in the ordered stream a sync run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// The requested topic is not configured. Terminal.
    UnknownTopic {
        requested: String,
        available: Vec<String>,
    },
    /// The remote host did not resolve. Terminal.
    Connectivity { host: String },
    /// An index document was processed (success or failure).
    DiscoveryProgress {
        topic: String,
        newly_found: usize,
        total_processed: usize,
        total_to_process: usize,
    },
    /// The Discovery Stage drained; `total_new` entries are queued for fetching.
    DiscoveryComplete { total_new: usize },
    /// An entry was fetched, normalized and persisted.
    FetchProgress {
        topic: String,
        name: String,
        completed: usize,
        total: usize,
    },
    /// The Fetch Stage drained; `total_new_items` entries were persisted.
    SyncComplete { total_new_items: usize },
    /// Discovery found nothing new.
    SyncUpToDate,
}

impl SyncEvent {
    /// Percentage of index documents processed, for `DiscoveryProgress`.
    pub fn discovery_percent(&self) -> Option<u8> {
        match self {
            Self::DiscoveryProgress {
                total_processed,
                total_to_process,
                ..
            } if *total_to_process > 0 => {
                Some((total_processed * 100 / total_to_process).min(100) as u8)
            }
            _ => None,
        }
    }
}

/// Receives pipeline events in emission order.
pub trait ProgressReporter: Send + Sync {
    /// Called once per event.
    fn report(&self, event: &SyncEvent);
}

/// No-op reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn report(&self, _event: &SyncEvent) {}
}
