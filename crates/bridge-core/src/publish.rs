//! Atomic promotion of uploaded artifacts.
//!
//! # Atomicity
//! 1. Write the payload to a hidden, uniquely named `.part` file in the
//!    publish directory and sync it.
//! 2. Rename it onto `<stem>.<ext>` (atomic replace on Unix and Windows).
//! 3. Remove the canonical file of every other kind in the same slot.
//!
//! Readers of `<stem>.<ext>` see either the previous or the new payload,
//! never a mixture. Concurrent publishes to one slot are unordered: the last
//! rename wins.

use std::io;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::artifact::{ArtifactKind, Container, Slot, classify};
use crate::error::{PublishError, PublishResult};
use crate::store::ArtifactStore;

/// Successful promotion details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub slot: Slot,
    /// Public URL of the promoted file.
    pub url: String,
    pub bytes_written: usize,
    /// Raw sniffer verdict.
    pub detected: Container,
    /// Kind the artifact was stored as.
    pub kind: ArtifactKind,
    /// Content type the client declared, lowercased; empty when absent.
    pub declared_content_type: String,
}

/// Result of a publish call that did not hit an I/O failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published(PublishReceipt),
    /// The payload was empty; nothing was written or replaced.
    Skipped,
}

impl ArtifactStore {
    /// Write `data` and promote it to the current artifact of `slot`.
    pub async fn publish(
        &self,
        slot: Slot,
        data: &[u8],
        declared_content_type: Option<&str>,
    ) -> PublishResult<PublishOutcome> {
        if data.is_empty() {
            debug!(%slot, "Skipping empty publish");
            return Ok(PublishOutcome::Skipped);
        }

        let classification = classify(data, declared_content_type);
        let kind = slot.admit(classification.kind);

        let root = self.config.root.clone();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| PublishError::PrepareDir {
                path: root.clone(),
                source,
            })?;

        let temp_path = root.join(temp_file_name(slot, kind));
        write_synced(&temp_path, data).await?;

        let final_path = self.canonical_path(slot, kind);
        if let Err(source) = tokio::fs::rename(&temp_path, &final_path).await {
            discard(&temp_path).await;
            return Err(PublishError::Promote {
                from: temp_path,
                to: final_path,
                source,
            });
        }

        for &other in slot.kinds().iter().filter(|&&k| k != kind) {
            self.retire(slot, other).await;
        }

        if self.config.history_limit > 0 {
            self.record_history(slot, kind, data).await;
        }

        let receipt = PublishReceipt {
            slot,
            url: self.canonical_url(slot, kind),
            bytes_written: data.len(),
            detected: classification.container,
            kind,
            declared_content_type: declared_content_type
                .unwrap_or_default()
                .to_ascii_lowercase(),
        };

        info!(
            slot = %slot,
            kind = %kind,
            detected = %receipt.detected,
            bytes = receipt.bytes_written,
            "Promoted artifact"
        );

        Ok(PublishOutcome::Published(receipt))
    }

    /// Remove the canonical file of `kind`, swallowing failures.
    async fn retire(&self, slot: Slot, kind: ArtifactKind) {
        let path = self.canonical_path(slot, kind);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => debug!(path = %path.display(), "Removed stale sibling"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), "Failed to remove stale sibling: {e}"),
        }
    }
}

/// Unique hidden temp name, e.g. `.current_1718000000000_3f2a....webm.part`.
fn temp_file_name(slot: Slot, kind: ArtifactKind) -> String {
    format!(
        ".{}_{}_{}.{}.part",
        slot.stem(),
        chrono::Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        kind.extension()
    )
}

async fn write_synced(path: &Path, data: &[u8]) -> PublishResult<()> {
    let result = async {
        let mut file = tokio::fs::File::create(path).await?;
        file.write_all(data).await?;
        file.sync_all().await
    }
    .await;

    if let Err(source) = result {
        discard(path).await;
        return Err(PublishError::Write {
            path: PathBuf::from(path),
            source,
        });
    }
    Ok(())
}

async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await
        && e.kind() != io::ErrorKind::NotFound
    {
        warn!(path = %path.display(), "Failed to remove temp file: {e}");
    }
}
