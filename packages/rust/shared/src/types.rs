//! Core domain types for the knowledge base and the sync pipeline.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use url::Url;

// ---------------------------------------------------------------------------
// KnowledgeBase
// ---------------------------------------------------------------------------

/// Entries of a single topic: canonical name -> normalized content.
pub type TopicEntries = BTreeMap<String, String>;

/// The local mirror: topic -> canonical entry name -> normalized content.
///
/// Keys keep the case they were stored with, but every lookup compares
/// case-insensitively. Within one topic no two names differ only by case.
/// Ordered maps keep the serialized form byte-stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBase(BTreeMap<String, TopicEntries>);

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Topic names as stored.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries of a topic, looked up case-insensitively.
    pub fn topic(&self, topic: &str) -> Option<&TopicEntries> {
        self.stored_topic_key(topic).and_then(|key| self.0.get(key))
    }

    /// Content of an entry, looked up case-insensitively on both levels.
    pub fn get(&self, topic: &str, name: &str) -> Option<&str> {
        let lowered = name.to_lowercase();
        self.topic(topic)?
            .iter()
            .find(|(key, _)| key.to_lowercase() == lowered)
            .map(|(_, content)| content.as_str())
    }

    /// Whether `name` is already present in `topic`.
    pub fn contains(&self, topic: &str, name: &str) -> bool {
        self.get(topic, name).is_some()
    }

    /// Lowercased names present in `topic`, for dedup comparisons.
    pub fn known_names(&self, topic: &str) -> HashSet<String> {
        self.topic(topic)
            .map(|entries| entries.keys().map(|k| k.to_lowercase()).collect())
            .unwrap_or_default()
    }

    /// Reset a topic to an empty entry set (force refresh).
    pub fn clear_topic(&mut self, topic: &str) {
        let key = self.topic_key_or(topic);
        self.0.insert(key, TopicEntries::new());
    }

    /// Store `content` under `topic`/`name`.
    ///
    /// An existing key that differs only in case is replaced, so the
    /// no-collision invariant holds after every insert.
    pub fn insert(&mut self, topic: &str, name: &str, content: String) {
        let key = self.topic_key_or(topic);
        let entries = self.0.entry(key).or_default();
        let lowered = name.to_lowercase();
        entries.retain(|existing, _| existing.to_lowercase() != lowered);
        entries.insert(name.to_string(), content);
    }

    /// Number of entries in a topic (0 if absent).
    pub fn entry_count(&self, topic: &str) -> usize {
        self.topic(topic).map_or(0, BTreeMap::len)
    }

    /// Total number of entries across all topics.
    pub fn total_entries(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    fn stored_topic_key(&self, topic: &str) -> Option<&String> {
        let lowered = topic.to_lowercase();
        self.0.keys().find(|key| key.to_lowercase() == lowered)
    }

    fn topic_key_or(&self, topic: &str) -> String {
        self.stored_topic_key(topic)
            .cloned()
            .unwrap_or_else(|| topic.to_string())
    }
}

// ---------------------------------------------------------------------------
// Pipeline tasks
// ---------------------------------------------------------------------------

/// One index document to scan: created per configured topic source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryTask {
    /// Owning topic name.
    pub topic: String,
    /// Absolute URL of the index document.
    pub source_url: Url,
}

/// One entry document to fetch: produced by the Discovery Stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTask {
    /// Owning topic name.
    pub topic: String,
    /// Canonical entry name (dedup and storage key).
    pub canonical_name: String,
    /// Absolute URL of the entry document.
    pub detail_url: Url,
}

/// A raw link found on an index page, before canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLink {
    /// Visible link text, trimmed.
    pub label: String,
    /// Raw `href` attribute value.
    pub href: String,
}

// ---------------------------------------------------------------------------
// SyncState
// ---------------------------------------------------------------------------

/// Progress counters for one run. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncState {
    /// Discovery tasks processed (success or failure).
    pub discovered_count: usize,
    /// Detail tasks processed (success or failure).
    pub fetched_count: usize,
    /// New entries found across all index documents.
    pub total_discovered: usize,
    /// Entries fetched, normalized and persisted.
    pub total_fetched: usize,
}

// ---------------------------------------------------------------------------
// DocNode
// ---------------------------------------------------------------------------

/// A parsed document fragment, independent of the HTML parser that built it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocNode {
    /// An element with a lowercase tag name and its children.
    Element { tag: String, children: Vec<DocNode> },
    /// A raw text node.
    Text(String),
}

impl DocNode {
    /// Build an element node.
    pub fn element(tag: impl Into<String>, children: Vec<DocNode>) -> Self {
        Self::Element {
            tag: tag.into().to_lowercase(),
            children,
        }
    }

    /// Build a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Tag name for elements, `None` for text.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text(_) => None,
        }
    }

    /// Child nodes (empty for text).
    pub fn children(&self) -> &[DocNode] {
        match self {
            Self::Element { children, .. } => children,
            Self::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}
