//! Core of speak-bridge: artifact classification, atomic publication,
//! latest-pointer lookup and the frame interpretation port.
//!
//! Nothing here knows about HTTP. Adapters (`bridge-axum`, `bridge-cli`)
//! compose an [`ArtifactStore`] with a [`FrameInterpreter`] implementation.

#![deny(unsafe_code)]

pub mod artifact;
pub mod error;
mod history;
pub mod interpret;
pub mod latest;
pub mod publish;
pub mod store;

pub use artifact::{
    ArtifactKind, Classification, Container, Slot, classify, kind_from_content_type,
    sniff_container, sniff_image,
};
pub use error::{PublishError, PublishResult};
pub use interpret::{FrameInterpreter, FrameRequest, TokenStream};
pub use latest::Pointer;
pub use publish::{PublishOutcome, PublishReceipt};
pub use store::{ArtifactStore, DEFAULT_URL_PREFIX, StoreConfig};
