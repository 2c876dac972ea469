//! Error types for wikisync.
//!
//! Library crates use [`WikiSyncError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all wikisync operations.
#[derive(Debug, thiserror::Error)]
pub enum WikiSyncError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching an index or entry document.
    #[error("network error: {0}")]
    Network(String),

    /// HTML parsing or content extraction error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Knowledge-base file read/write error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The requested topic is not part of the configured catalog.
    #[error("unknown topic '{requested}' (available: {})", available.join(", "))]
    UnknownTopic {
        requested: String,
        available: Vec<String>,
    },

    /// The remote host could not be resolved; nothing was fetched.
    #[error("cannot reach {host}")]
    Connectivity { host: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WikiSyncError>;

impl WikiSyncError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error ends the run rather than just the task that hit it.
    ///
    /// Stages skip non-fatal errors and leave the item for the next run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Network(_) | Self::Parse { .. })
    }
}
