//! Streaming relay between a frame uploader and the inference service.
//!
//! One upstream HTTP request is opened per frame. Its body is read line by
//! line, SSE `data:` framing is stripped, and each payload is reduced to a
//! token: the first configured text field of a JSON object, or the raw line
//! when the payload is not JSON or carries none of those fields.

#![deny(unsafe_code)]

mod client;
pub mod config;
pub mod error;
pub mod lines;
pub mod payload;

pub use client::InferenceClient;
pub use config::{DEFAULT_AGENT_NAME, DEFAULT_STREAM_URL, DEFAULT_TOKEN_FIELDS, RelayConfig};
pub use error::{RelayError, RelayResult};
pub use lines::LineBuffer;
pub use payload::{LineEvent, UpstreamRequest, interpret_line};
