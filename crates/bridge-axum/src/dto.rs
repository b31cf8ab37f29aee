//! Response bodies for the stream API.

use bridge_core::{Container, PublishReceipt, Slot};
use serde::{Deserialize, Serialize};

/// `POST /api/stream/segment` success body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPublished {
    pub ok: bool,
    pub url: String,
    pub bytes: usize,
    pub detected: Container,
    /// Declared content type of the upload.
    pub content_type: String,
}

impl From<PublishReceipt> for SegmentPublished {
    fn from(receipt: PublishReceipt) -> Self {
        Self {
            ok: true,
            url: receipt.url,
            bytes: receipt.bytes_written,
            detected: receipt.detected,
            content_type: receipt.declared_content_type,
        }
    }
}

/// `POST /api/stream/frame` success body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FramePublished {
    pub ok: bool,
    pub url: String,
    pub bytes: usize,
    pub content_type: String,
}

impl From<PublishReceipt> for FramePublished {
    fn from(receipt: PublishReceipt) -> Self {
        Self {
            ok: true,
            url: receipt.url,
            bytes: receipt.bytes_written,
            content_type: receipt.declared_content_type,
        }
    }
}

/// Body returned when an empty segment was ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Skipped {
    pub ok: bool,
    pub skipped: bool,
    pub reason: String,
}

impl Skipped {
    pub fn empty() -> Self {
        Self {
            ok: false,
            skipped: true,
            reason: "empty".to_string(),
        }
    }
}

/// Query for `GET /api/stream/history`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_slot")]
    pub slot: Slot,
}

const fn default_history_slot() -> Slot {
    Slot::Segment
}

/// Retained history copies of one slot, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryListing {
    pub slot: Slot,
    pub urls: Vec<String>,
}
