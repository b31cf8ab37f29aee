//! Error types for artifact publication.

use std::path::PathBuf;

use thiserror::Error;

/// Hard failures while publishing an artifact.
///
/// Only the write and the promoting rename can fail a publish. Removing the
/// stale sibling and maintaining history copies are best-effort and never
/// surface here.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The publish directory could not be created.
    #[error("Failed to prepare publish directory {path}: {source}")]
    PrepareDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the temporary file failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Renaming the temporary file onto the canonical path failed.
    #[error("Failed to promote {from} to {to}: {source}")]
    Promote {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type PublishResult<T> = Result<T, PublishError>;
