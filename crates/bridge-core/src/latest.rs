//! Latest-pointer lookup.

use serde::Serialize;
use tracing::debug;

use crate::artifact::{ArtifactKind, Slot};
use crate::store::ArtifactStore;

/// Where viewers can fetch the current artifact of a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pointer {
    pub url: String,
    pub content_type: String,
    #[serde(skip)]
    pub kind: ArtifactKind,
}

impl ArtifactStore {
    /// Return the current artifact of `slot`, checking kinds in the slot's
    /// priority order. `None` means nothing has been published yet.
    pub async fn latest(&self, slot: Slot) -> Option<Pointer> {
        for &kind in slot.kinds() {
            let path = self.canonical_path(slot, kind);
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                return Some(Pointer {
                    url: self.canonical_url(slot, kind),
                    content_type: kind.content_type().to_string(),
                    kind,
                });
            }
        }
        debug!(%slot, "No current artifact");
        None
    }
}
