//! The document-fetching capability the pipeline stages depend on.
//!
//! Stages never see a concrete HTTP client or HTML parser: they ask a
//! [`DocumentSource`] for index links or an entry's content fragment.

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::types::{DocNode, IndexLink};

/// Fetches and parses remote documents into pipeline-friendly shapes.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch an index document and return every entry link on it.
    async fn fetch_index(&self, url: &Url) -> Result<Vec<IndexLink>>;

    /// Fetch an entry document and return its content region.
    ///
    /// A page without a content region is a parse error.
    async fn fetch_entry(&self, url: &Url) -> Result<DocNode>;
}
