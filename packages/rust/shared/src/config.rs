//! Application configuration for wikisync.
//!
//! User config lives at `~/.wikisync/wikisync.toml`.
//! CLI flags override config file values, which override defaults.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, WikiSyncError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "wikisync.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".wikisync";

/// Knowledge-base file name inside the data directory.
const DATA_FILE_NAME: &str = "data.json";

// ---------------------------------------------------------------------------
// Config structs (matching wikisync.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote host and URL layout.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// CSS selectors for index entries and entry content.
    #[serde(default)]
    pub selectors: SelectorsConfig,

    /// Concurrency, timeouts and data file location.
    #[serde(default)]
    pub sync: SyncSettings,

    /// The topic catalog.
    #[serde(default = "default_topics")]
    pub topics: Vec<TopicConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            selectors: SelectorsConfig::default(),
            sync: SyncSettings::default(),
            topics: default_topics(),
        }
    }
}

/// `[remote]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL; entry links are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prepended to a topic source fragment to build its index URL.
    #[serde(default = "default_index_prefix")]
    pub index_prefix: String,

    /// Suffix appended to a topic source fragment.
    #[serde(default = "default_index_suffix")]
    pub index_suffix: String,

    /// Host probed before any fetch. Defaults to the `base_url` host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_host: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            index_prefix: default_index_prefix(),
            index_suffix: default_index_suffix(),
            check_host: Some("ulisses-regelwiki.de".into()),
        }
    }
}

fn default_base_url() -> String {
    "http://www.ulisses-regelwiki.de/".into()
}
fn default_index_prefix() -> String {
    "index.php/".into()
}
fn default_index_suffix() -> String {
    ".html".into()
}

/// `[selectors]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorsConfig {
    /// Selector matching entry links on an index page.
    #[serde(default = "default_index_entry")]
    pub index_entry: String,

    /// Selector matching the content region of an entry page.
    #[serde(default = "default_content")]
    pub content: String,
}

impl Default for SelectorsConfig {
    fn default() -> Self {
        Self {
            index_entry: default_index_entry(),
            content: default_content(),
        }
    }
}

fn default_index_entry() -> String {
    "td > a".into()
}
fn default_content() -> String {
    "#main .ce_text".into()
}

/// `[sync]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Simultaneous fetches per stage.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Simultaneous fetches per stage in fast mode.
    #[serde(default = "default_fast_concurrency")]
    pub fast_concurrency: usize,

    /// Timeout for the connectivity probe.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Timeout for a single document request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Knowledge-base file location (defaults to the user data dir).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            fast_concurrency: default_fast_concurrency(),
            probe_timeout_secs: default_probe_timeout(),
            request_timeout_secs: default_request_timeout(),
            data_file: None,
        }
    }
}

fn default_concurrency() -> usize {
    1
}
fn default_fast_concurrency() -> usize {
    10
}
fn default_probe_timeout() -> u64 {
    5
}
fn default_request_timeout() -> u64 {
    30
}

/// `[[topics]]` entry: a named topic backed by one or more index pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicConfig {
    /// Topic name, matched case-insensitively.
    pub name: String,
    /// Index URL fragments, e.g. `vorteile`.
    pub sources: Vec<String>,
}

impl TopicConfig {
    /// Build a topic from a name and its sources.
    pub fn new(name: impl Into<String>, sources: &[&str]) -> Self {
        Self {
            name: name.into(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn default_topics() -> Vec<TopicConfig> {
    vec![
        TopicConfig::new("vorteil", &["vorteile"]),
        TopicConfig::new("nachteil", &["nachteile"]),
        TopicConfig::new("zauber", &["za_zaubersprueche"]),
    ]
}

impl AppConfig {
    /// Parsed `base_url`.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.remote.base_url).map_err(|e| {
            WikiSyncError::config(format!("invalid base_url '{}': {e}", self.remote.base_url))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(WikiSyncError::config(format!(
                "base_url must be http(s), got '{}'",
                url.scheme()
            )));
        }
        Ok(url)
    }

    /// Host name the connectivity gate resolves.
    pub fn check_host(&self) -> Result<String> {
        if let Some(host) = self.remote.check_host.as_deref().filter(|h| !h.is_empty()) {
            return Ok(host.to_string());
        }
        self.base_url()?
            .host_str()
            .map(str::to_string)
            .ok_or_else(|| WikiSyncError::config("base_url has no host"))
    }

    /// Absolute index URL for one topic source fragment.
    pub fn index_url(&self, source: &str) -> Result<Url> {
        let path = format!(
            "{}{}{}",
            self.remote.index_prefix, source, self.remote.index_suffix
        );
        self.base_url()?.join(&path).map_err(|e| {
            WikiSyncError::config(format!("invalid index URL for source '{source}': {e}"))
        })
    }

    /// Concurrency cap for this run.
    pub fn concurrency(&self, fast: bool) -> usize {
        if fast {
            self.sync.fast_concurrency
        } else {
            self.sync.concurrency
        }
    }

    /// Knowledge-base file path: explicit setting, else `<data_dir>/wikisync/data.json`.
    pub fn data_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.sync.data_file {
            return Ok(path.clone());
        }
        let base = dirs::data_dir()
            .ok_or_else(|| WikiSyncError::config("could not determine data directory"))?;
        Ok(base.join("wikisync").join(DATA_FILE_NAME))
    }

    /// Check the catalog and settings before any network use.
    ///
    /// Selector syntax is checked where the selectors are compiled.
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        self.check_host()?;

        if self.topics.is_empty() {
            return Err(WikiSyncError::config("no topics configured"));
        }

        let mut seen = HashSet::new();
        for topic in &self.topics {
            let name = topic.name.trim();
            if name.is_empty() {
                return Err(WikiSyncError::config("topic with empty name"));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(WikiSyncError::config(format!("duplicate topic '{name}'")));
            }
            if topic.sources.is_empty() || topic.sources.iter().any(|s| s.trim().is_empty()) {
                return Err(WikiSyncError::config(format!(
                    "topic '{name}' needs at least one non-empty source"
                )));
            }
            for source in &topic.sources {
                self.index_url(source)?;
            }
        }

        if self.selectors.index_entry.trim().is_empty() || self.selectors.content.trim().is_empty()
        {
            return Err(WikiSyncError::config("selectors must not be empty"));
        }

        if self.sync.concurrency == 0 || self.sync.fast_concurrency == 0 {
            return Err(WikiSyncError::config("concurrency must be at least 1"));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.wikisync/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| WikiSyncError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.wikisync/wikisync.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| WikiSyncError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| WikiSyncError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let path = config_file_path()?;
    init_config_at(&path)?;
    Ok(path)
}

/// Write the default config to `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| WikiSyncError::io(dir, e))?;
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| WikiSyncError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| WikiSyncError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(())
}
