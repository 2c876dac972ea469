//! Knowledge-base file storage.
//!
//! The [`Store`] reads the whole `topic -> name -> content` mapping from a
//! single JSON file and rewrites it wholesale on every save.
//!
//! **Write rules:**
//! - A save never leaves a half-written file behind: content goes to a
//!   sibling temp file which is then renamed over the target.
//! - Callers serialize saves through one writer; the store itself does
//!   not lock.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};
use uuid::Uuid;

use wikisync_shared::{KnowledgeBase, Result, WikiSyncError};

/// Handle to the knowledge-base file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Create a store backed by the file at `path`. Nothing is touched yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the knowledge base. A missing or empty file yields an empty one.
    ///
    /// A file that exists but does not parse is an error: overwriting it
    /// would silently discard the user's data.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<KnowledgeBase> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("knowledge base file not found, starting empty");
                return Ok(KnowledgeBase::new());
            }
            Err(e) => return Err(WikiSyncError::io(&self.path, e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(KnowledgeBase::new());
        }

        let kb: KnowledgeBase = serde_json::from_slice(&bytes).map_err(|e| {
            WikiSyncError::Storage(format!("cannot parse {}: {e}", self.path.display()))
        })?;

        debug!(entries = kb.total_entries(), "knowledge base loaded");
        Ok(kb)
    }

    /// Replace the file with the serialized `kb`.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub async fn save(&self, kb: &KnowledgeBase) -> Result<()> {
        let json = serde_json::to_vec_pretty(kb)
            .map_err(|e| WikiSyncError::Storage(format!("cannot serialize knowledge base: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| WikiSyncError::io(parent, e))?;
        }

        let tmp_path = self.temp_path();
        if let Err(e) = write_synced(&tmp_path, &json).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e);
        }

        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(WikiSyncError::io(&self.path, e));
        }

        debug!(bytes = json.len(), entries = kb.total_entries(), "knowledge base saved");
        Ok(())
    }

    /// Unique sibling path for the pending write.
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data.json".into());
        self.path
            .with_file_name(format!(".{file_name}.{}.tmp", Uuid::now_v7()))
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| WikiSyncError::io(path, e))?;
    file.write_all(bytes)
        .await
        .map_err(|e| WikiSyncError::io(path, e))?;
    file.sync_all().await.map_err(|e| WikiSyncError::io(path, e))
}
