//! Filesystem-backed artifact store configuration.

use std::path::{Path, PathBuf};

use crate::artifact::{ArtifactKind, Slot};

/// URL prefix under which the publish directory is served.
pub const DEFAULT_URL_PREFIX: &str = "/static";

/// Configuration for [`ArtifactStore`].
///
/// ```
/// use bridge_core::StoreConfig;
///
/// let config = StoreConfig::new("static")
///     .with_url_prefix("/media")
///     .with_history_limit(20);
/// assert_eq!(config.history_limit(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub(crate) root: PathBuf,
    pub(crate) url_prefix: String,
    pub(crate) history_limit: usize,
}

impl StoreConfig {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
            history_limit: 0,
        }
    }

    /// Set the URL prefix used when building artifact URLs.
    #[must_use]
    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix: String = prefix.into();
        self.url_prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    /// Keep the newest `limit` timestamped copies per slot. Zero disables
    /// history entirely, which is the default.
    #[must_use]
    pub const fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    #[must_use]
    pub const fn history_limit(&self) -> usize {
        self.history_limit
    }
}

/// Publishes artifacts into a directory and answers latest-pointer queries.
///
/// The store holds no in-memory state about what is current; the directory
/// is the only source of truth, so any number of handlers can share one
/// store (or several stores over the same directory) without locking.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    pub(crate) config: StoreConfig,
}

impl ArtifactStore {
    #[must_use]
    pub const fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Absolute location of the canonical file for `slot` + `kind`.
    #[must_use]
    pub fn canonical_path(&self, slot: Slot, kind: ArtifactKind) -> PathBuf {
        self.config.root.join(slot.file_name(kind))
    }

    /// Public URL of the canonical file for `slot` + `kind`.
    #[must_use]
    pub fn canonical_url(&self, slot: Slot, kind: ArtifactKind) -> String {
        format!("{}/{}", self.config.url_prefix, slot.file_name(kind))
    }

    /// Public URL of a history copy returned by [`history`](Self::history).
    #[must_use]
    pub fn history_url(&self, name: &str) -> String {
        format!("{}/history/{name}", self.config.url_prefix)
    }

    pub(crate) fn history_dir(&self) -> PathBuf {
        self.config.root.join("history")
    }
}
