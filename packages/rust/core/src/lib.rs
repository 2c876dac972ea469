//! Sync orchestration for wikisync.
//!
//! Ties the topic catalog, connectivity gate, discovery and fetch stages
//! together into a single `update` run (see [`run_sync`]).

pub mod context;
pub mod pipeline;
pub mod resolve;

pub use context::{SyncContext, SyncRequest};
pub use pipeline::{SyncAborted, SyncPhase, SyncReport, run_sync};
pub use resolve::{available_topics, resolve_topics};
