//! Topic Resolver: requested name -> topics to sync.

use tracing::debug;

use wikisync_shared::{Result, TopicConfig, WikiSyncError};

/// Select the topics for this run.
///
/// `None` or a blank name selects the whole catalog. Otherwise the name must
/// match exactly one configured topic, ignoring case.
pub fn resolve_topics(catalog: &[TopicConfig], requested: Option<&str>) -> Result<Vec<TopicConfig>> {
    let requested = requested.map(str::trim).unwrap_or_default();

    if requested.is_empty() {
        debug!(topics = catalog.len(), "no topic requested, syncing all");
        return Ok(catalog.to_vec());
    }

    let lowered = requested.to_lowercase();
    match catalog.iter().find(|t| t.name.to_lowercase() == lowered) {
        Some(topic) => Ok(vec![topic.clone()]),
        None => Err(WikiSyncError::UnknownTopic {
            requested: requested.to_string(),
            available: available_topics(catalog),
        }),
    }
}

/// Topic names in catalog order.
pub fn available_topics(catalog: &[TopicConfig]) -> Vec<String> {
    catalog.iter().map(|t| t.name.clone()).collect()
}
