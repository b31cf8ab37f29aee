//! Artifact kinds, publication slots and the binary classifier.
//!
//! Classification is two-stage: magic-byte sniffing always wins, and the
//! client-declared content type is only consulted when sniffing is
//! inconclusive. Content-type headers are client controlled and unreliable.

use serde::{Deserialize, Serialize};

/// EBML magic that opens every WebM/Matroska stream.
const EBML_MAGIC: [u8; 4] = [0x1A, 0x45, 0xDF, 0xA3];

/// ISO BMFF box type carried by MP4 files right after the first box size.
const FTYP_BOX: &[u8; 4] = b"ftyp";

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Shortest blob the container sniffer is willing to judge.
pub const MIN_SNIFF_LEN: usize = 12;

/// Verdict of the container sniffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    Webm,
    Mp4,
    Unknown,
}

impl Container {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete format of a stored artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Png,
    Jpeg,
    Webm,
    Mp4,
}

impl ArtifactKind {
    /// File extension used for the canonical file, without the dot.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
        }
    }

    /// MIME type advertised to viewers.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webm => "video/webm",
            Self::Mp4 => "video/mp4",
        }
    }

    const fn from_container(container: Container) -> Option<Self> {
        match container {
            Container::Webm => Some(Self::Webm),
            Container::Mp4 => Some(Self::Mp4),
            Container::Unknown => None,
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// A logical publication target holding at most one current artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Single camera frames (`latest.png` / `latest.jpg`).
    Frame,
    /// Short video segments (`current.webm` / `current.mp4`).
    Segment,
}

impl Slot {
    pub const ALL: [Self; 2] = [Self::Frame, Self::Segment];

    /// File stem of the canonical file for this slot.
    #[must_use]
    pub const fn stem(&self) -> &'static str {
        match self {
            Self::Frame => "latest",
            Self::Segment => "current",
        }
    }

    /// Kinds this slot may hold, in lookup priority order.
    #[must_use]
    pub const fn kinds(&self) -> &'static [ArtifactKind] {
        match self {
            Self::Frame => &[ArtifactKind::Png, ArtifactKind::Jpeg],
            Self::Segment => &[ArtifactKind::Webm, ArtifactKind::Mp4],
        }
    }

    /// Kind used when classification lands outside this slot.
    #[must_use]
    pub const fn default_kind(&self) -> ArtifactKind {
        match self {
            Self::Frame => ArtifactKind::Png,
            Self::Segment => ArtifactKind::Mp4,
        }
    }

    /// Narrow a classified kind to one this slot accepts.
    #[must_use]
    pub fn admit(&self, kind: ArtifactKind) -> ArtifactKind {
        if self.kinds().contains(&kind) {
            kind
        } else {
            self.default_kind()
        }
    }

    /// Canonical file name for `kind` in this slot, e.g. `current.webm`.
    #[must_use]
    pub fn file_name(&self, kind: ArtifactKind) -> String {
        format!("{}.{}", self.stem(), kind.extension())
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Frame => "frame",
            Self::Segment => "segment",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a blob as one of the known video containers by magic bytes.
#[must_use]
pub fn sniff_container(data: &[u8]) -> Container {
    if data.len() < MIN_SNIFF_LEN {
        return Container::Unknown;
    }
    if data[..4] == EBML_MAGIC {
        return Container::Webm;
    }
    if data[4..MIN_SNIFF_LEN].windows(FTYP_BOX.len()).any(|w| w == FTYP_BOX) {
        return Container::Mp4;
    }
    Container::Unknown
}

/// Recognise PNG and JPEG signatures.
#[must_use]
pub fn sniff_image(data: &[u8]) -> Option<ArtifactKind> {
    if data.starts_with(&PNG_MAGIC) {
        Some(ArtifactKind::Png)
    } else if data.starts_with(&JPEG_MAGIC) {
        Some(ArtifactKind::Jpeg)
    } else {
        None
    }
}

/// Map a client-declared content type onto a kind.
///
/// Matching is case-insensitive and ignores parameters such as
/// `;codecs=vp8`. Returns `None` when the header says nothing useful.
#[must_use]
pub fn kind_from_content_type(declared: &str) -> Option<ArtifactKind> {
    let declared = declared.trim().to_ascii_lowercase();
    if declared.starts_with("video/webm") {
        Some(ArtifactKind::Webm)
    } else if declared.starts_with("video/mp4") {
        Some(ArtifactKind::Mp4)
    } else if declared.contains("jpeg") || declared.contains("jpg") {
        Some(ArtifactKind::Jpeg)
    } else if declared.starts_with("image/png") {
        Some(ArtifactKind::Png)
    } else {
        None
    }
}

/// Outcome of classifying a blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Raw container verdict, reported back to clients as `detected`.
    pub container: Container,
    /// Kind chosen after both stages, before slot narrowing.
    pub kind: ArtifactKind,
}

/// Binary sniff first, declared content type second, PNG last.
#[must_use]
pub fn classify(data: &[u8], declared: Option<&str>) -> Classification {
    let container = sniff_container(data);
    let kind = ArtifactKind::from_container(container)
        .or_else(|| sniff_image(data))
        .or_else(|| declared.and_then(kind_from_content_type))
        .unwrap_or(ArtifactKind::Png);
    Classification { container, kind }
}
