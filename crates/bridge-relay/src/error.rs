//! Relay failures.
//!
//! These never reach the downstream transport as errors. Each one is
//! rendered through `Display` into a single diagnostic token that ends the
//! session.

use std::time::Duration;

use thiserror::Error;

pub type RelayResult<T> = Result<T, RelayError>;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The HTTP client could not be constructed.
    #[error("[relay error] failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("[upstream error {status}] {body}")]
    Status { status: u16, body: String },

    /// Connection-level failure (DNS, refused, reset, TLS).
    #[error("[relay error] upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// No bytes arrived from upstream for too long.
    #[error("[relay error] upstream idle for {}s", .0.as_secs_f32())]
    IdleTimeout(Duration),
}

impl RelayError {
    /// Diagnostic token forwarded downstream in place of the failure.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        self.to_string()
    }
}

/// Cut an upstream error body to at most `limit` characters.
pub(crate) fn truncate_body(body: &str, limit: usize) -> String {
    let body = body.trim();
    match body.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
