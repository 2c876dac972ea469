//! Shared types, error model, and configuration for wikisync.
//!
//! This crate is the foundation depended on by all other wikisync crates.
//! It provides:
//! - [`WikiSyncError`]: the unified error type
//! - Domain types ([`KnowledgeBase`], [`DiscoveryTask`], [`DetailTask`], [`SyncState`], [`DocNode`])
//! - Configuration ([`AppConfig`], [`TopicConfig`], config loading)
//! - Progress events ([`SyncEvent`], [`ProgressReporter`])
//! - The [`DocumentSource`] capability

pub mod config;
pub mod error;
pub mod events;
pub mod source;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, RemoteConfig, SelectorsConfig, SyncSettings, TopicConfig, config_dir,
    config_file_path, init_config, init_config_at, load_config, load_config_from,
};
pub use error::{Result, WikiSyncError};
pub use events::{ProgressReporter, SilentProgress, SyncEvent};
pub use source::DocumentSource;
pub use types::{
    DetailTask, DiscoveryTask, DocNode, IndexLink, KnowledgeBase, SyncState, TopicEntries,
};
