//! Bounded timestamped copies of promoted artifacts.
//!
//! History lives in `<root>/history/<stem>_<millis>_<id>.<ext>`. It is
//! disabled unless a limit is configured, and failures here only log.

use std::io;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::artifact::{ArtifactKind, Slot};
use crate::store::ArtifactStore;

impl ArtifactStore {
    pub(crate) async fn record_history(&self, slot: Slot, kind: ArtifactKind, data: &[u8]) {
        let dir = self.history_dir();
        if let Err(e) = tokio::fs::create_dir_all(&dir).await {
            warn!(dir = %dir.display(), "Failed to create history dir: {e}");
            return;
        }

        let name = format!(
            "{}_{:013}_{}.{}",
            slot.stem(),
            chrono::Utc::now().timestamp_millis(),
            &Uuid::new_v4().simple().to_string()[..8],
            kind.extension()
        );
        let path = dir.join(name);
        if let Err(e) = tokio::fs::write(&path, data).await {
            warn!(path = %path.display(), "Failed to write history copy: {e}");
            return;
        }

        if let Err(e) = self.prune_history(slot).await {
            warn!(%slot, "Failed to prune history: {e}");
        }
    }

    /// Timestamped copies for `slot`, oldest first.
    pub async fn history(&self, slot: Slot) -> io::Result<Vec<String>> {
        let dir = self.history_dir();
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let prefix = format!("{}_", slot.stem());
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(&prefix) {
                names.push(name);
            }
        }
        // Zero-padded millis make lexical order chronological.
        names.sort();
        Ok(names)
    }

    async fn prune_history(&self, slot: Slot) -> io::Result<()> {
        let names = self.history(slot).await?;
        let excess = names.len().saturating_sub(self.config.history_limit);
        let dir = self.history_dir();

        for name in names.into_iter().take(excess) {
            match tokio::fs::remove_file(dir.join(&name)).await {
                Ok(()) => debug!(%name, "Pruned history copy"),
                // Another publish pruned it first.
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
