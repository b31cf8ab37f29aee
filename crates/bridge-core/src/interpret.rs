//! Port for streaming frame interpretation.
//!
//! The HTTP adapter depends only on this trait; `bridge-relay` provides the
//! upstream-backed implementation and tests plug in scripted ones.

use bytes::Bytes;
use futures_util::stream::BoxStream;

/// Input for one relay session.
#[derive(Debug, Clone, Default)]
pub struct FrameRequest {
    /// Encoded image bytes as uploaded by the client.
    pub frame: Bytes,
    /// Rolling context carried by the caller between frames.
    pub prior_hypothesis: String,
}

impl FrameRequest {
    pub fn new(frame: impl Into<Bytes>, prior_hypothesis: impl Into<String>) -> Self {
        Self {
            frame: frame.into(),
            prior_hypothesis: prior_hypothesis.into(),
        }
    }
}

/// Lazily produced interpretation tokens.
///
/// Streams are infallible: failures arrive as a final diagnostic token.
pub type TokenStream = BoxStream<'static, String>;

/// Turns one frame into a stream of interpretation tokens.
pub trait FrameInterpreter: Send + Sync {
    /// Start a session. No I/O happens until the stream is first polled, and
    /// dropping the stream ends the session.
    fn interpret(&self, request: FrameRequest) -> TokenStream;
}
